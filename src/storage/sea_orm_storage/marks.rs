//! 成绩存储操作

use super::{SeaOrmStorage, is_unique_violation};
use crate::entity::marks::{ActiveModel, Column, Entity as Marks};
use crate::errors::{Result, SchoolError};
use crate::models::{
    AcademicPeriod,
    marks::{
        entities::Mark,
        requests::{MarkListQuery, NewMark, UpdateMarkRequest},
    },
};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

impl SeaOrmStorage {
    /// 录入成绩
    pub async fn create_mark_impl(&self, mark: NewMark) -> Result<Mark> {
        let now = chrono::Utc::now().timestamp();
        let student_id = mark.student_id;
        let subject_id = mark.subject_id;

        let model = ActiveModel {
            student_id: Set(mark.student_id),
            subject_id: Set(mark.subject_id),
            class_name: Set(mark.class_name),
            trimester: Set(mark.period.trimester.to_string()),
            academic_year: Set(mark.period.academic_year),
            score: Set(mark.score),
            total_score: Set(mark.total_score),
            coefficient: Set(mark.coefficient),
            remarks: Set(mark.remarks),
            entered_at: Set(now),
            ..Default::default()
        };

        let result = model.insert(&self.db).await.map_err(|e| {
            if is_unique_violation(&e) {
                SchoolError::duplicate_mark(format!(
                    "Mark already exists for student {student_id}, subject {subject_id} in this period"
                ))
            } else {
                SchoolError::database_operation(format!("录入成绩失败: {e}"))
            }
        })?;

        result.into_mark()
    }

    /// 通过 ID 获取成绩
    pub async fn get_mark_by_id_impl(&self, id: i64) -> Result<Option<Mark>> {
        let result = Marks::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询成绩失败: {e}")))?;

        result.map(|m| m.into_mark()).transpose()
    }

    /// 更新成绩
    pub async fn update_mark_impl(
        &self,
        id: i64,
        update: UpdateMarkRequest,
    ) -> Result<Option<Mark>> {
        // 先检查成绩是否存在
        let existing = self.get_mark_by_id_impl(id).await?;
        if existing.is_none() {
            return Ok(None);
        }

        let mut model = ActiveModel {
            id: Set(id),
            ..Default::default()
        };

        if let Some(score) = update.score {
            model.score = Set(score);
        }

        if let Some(total_score) = update.total_score {
            model.total_score = Set(total_score);
        }

        if let Some(coefficient) = update.coefficient {
            model.coefficient = Set(coefficient);
        }

        if let Some(remarks) = update.remarks {
            model.remarks = Set(Some(remarks));
        }

        // 没有任何字段需要更新
        if !model.is_changed() {
            return Ok(existing);
        }

        model
            .update(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("更新成绩失败: {e}")))?;

        self.get_mark_by_id_impl(id).await
    }

    /// 删除成绩
    pub async fn delete_mark_impl(&self, id: i64) -> Result<bool> {
        let result = Marks::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("删除成绩失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 按条件列出成绩
    pub async fn list_marks_impl(&self, query: MarkListQuery) -> Result<Vec<Mark>> {
        let mut select = Marks::find();

        if let Some(student_id) = query.student_id {
            select = select.filter(Column::StudentId.eq(student_id));
        }

        if let Some(class_name) = query.class_name {
            select = select.filter(Column::ClassName.eq(class_name));
        }

        if let Some(trimester) = query.trimester {
            select = select.filter(Column::Trimester.eq(trimester.as_str()));
        }

        if let Some(academic_year) = query.academic_year {
            select = select.filter(Column::AcademicYear.eq(academic_year));
        }

        let marks = select
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询成绩列表失败: {e}")))?;

        marks.into_iter().map(|m| m.into_mark()).collect()
    }

    /// 获取学生在某学期的全部成绩
    pub async fn find_marks_by_student_and_period_impl(
        &self,
        student_id: i64,
        period: &AcademicPeriod,
    ) -> Result<Vec<Mark>> {
        let marks = Marks::find()
            .filter(Column::StudentId.eq(student_id))
            .filter(Column::Trimester.eq(period.trimester.as_str()))
            .filter(Column::AcademicYear.eq(period.academic_year.as_str()))
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询学生成绩失败: {e}")))?;

        marks.into_iter().map(|m| m.into_mark()).collect()
    }
}
