//! 学期结果存储操作

use super::{SeaOrmStorage, is_unique_violation};
use crate::entity::results::{ActiveModel, Column, Entity as Results};
use crate::errors::{Result, SchoolError};
use crate::models::{
    AcademicPeriod,
    results::{
        entities::{ResultDraft, StudentResult},
        requests::ResultQuery,
    },
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DbErr, EntityTrait, QueryFilter, QueryOrder, Select, Set,
};

/// 学期与学年的可选筛选
fn apply_query(mut select: Select<Results>, query: &ResultQuery) -> Select<Results> {
    if let Some(trimester) = query.trimester {
        select = select.filter(Column::Trimester.eq(trimester.as_str()));
    }

    if let Some(academic_year) = &query.academic_year {
        select = select.filter(Column::AcademicYear.eq(academic_year.as_str()));
    }

    select
}

impl SeaOrmStorage {
    /// 按 (学生, 学期, 学年) 获取结果
    pub async fn find_result_by_key_impl(
        &self,
        student_id: i64,
        period: &AcademicPeriod,
    ) -> Result<Option<StudentResult>> {
        let result = Results::find()
            .filter(Column::StudentId.eq(student_id))
            .filter(Column::Trimester.eq(period.trimester.as_str()))
            .filter(Column::AcademicYear.eq(period.academic_year.as_str()))
            .one(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询结果失败: {e}")))?;

        result.map(|m| m.into_student_result()).transpose()
    }

    /// 通过 ID 获取结果
    pub async fn get_result_by_id_impl(&self, id: i64) -> Result<Option<StudentResult>> {
        let result = Results::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询结果失败: {e}")))?;

        result.map(|m| m.into_student_result()).transpose()
    }

    /// 列出学生的结果
    pub async fn list_results_by_student_impl(
        &self,
        student_id: i64,
        query: &ResultQuery,
    ) -> Result<Vec<StudentResult>> {
        // 学期名按字母序恰好为 First < Second < Third
        let results = apply_query(
            Results::find().filter(Column::StudentId.eq(student_id)),
            query,
        )
        .order_by_desc(Column::AcademicYear)
        .order_by_asc(Column::Trimester)
        .all(&self.db)
        .await
        .map_err(|e| SchoolError::database_operation(format!("查询学生结果失败: {e}")))?;

        results
            .into_iter()
            .map(|m| m.into_student_result())
            .collect()
    }

    /// 列出班级的结果
    pub async fn list_results_by_class_impl(
        &self,
        class_name: &str,
        query: &ResultQuery,
    ) -> Result<Vec<StudentResult>> {
        let results = apply_query(
            Results::find().filter(Column::ClassName.eq(class_name)),
            query,
        )
        .order_by_asc(Column::Id)
        .all(&self.db)
        .await
        .map_err(|e| SchoolError::database_operation(format!("查询班级结果失败: {e}")))?;

        let mut results = results
            .into_iter()
            .map(|m| m.into_student_result())
            .collect::<Result<Vec<_>>>()?;

        // NULL 的排序位置因数据库而异，这里统一放到最后
        results.sort_by_key(|r| (r.class_position.is_none(), r.class_position));
        Ok(results)
    }

    /// 写入新结果
    pub async fn insert_result_impl(&self, draft: ResultDraft) -> Result<StudentResult> {
        let now = chrono::Utc::now().timestamp();
        let student_id = draft.student_id;

        let model = ActiveModel {
            student_id: Set(draft.student_id),
            class_name: Set(draft.class_name),
            trimester: Set(draft.period.trimester.to_string()),
            academic_year: Set(draft.period.academic_year),
            total_subjects: Set(draft.total_subjects),
            total_coefficient: Set(draft.total_coefficient),
            total_score: Set(draft.total_score),
            average: Set(draft.average),
            grade: Set(draft.grade.to_string()),
            decision: Set(draft.decision.to_string()),
            remarks: Set(draft.remarks),
            class_position: Set(None),
            total_students: Set(None),
            generated_at: Set(now),
            ..Default::default()
        };

        let result = model.insert(&self.db).await.map_err(|e| {
            if is_unique_violation(&e) {
                SchoolError::duplicate_result(format!(
                    "Result already exists for student {student_id} in this period"
                ))
            } else {
                SchoolError::database_operation(format!("写入结果失败: {e}"))
            }
        })?;

        result.into_student_result()
    }

    /// 整体更新已有结果
    pub async fn update_result_impl(&self, result: &StudentResult) -> Result<StudentResult> {
        let model = ActiveModel {
            id: Set(result.id),
            student_id: Set(result.student_id),
            class_name: Set(result.class_name.clone()),
            trimester: Set(result.trimester.to_string()),
            academic_year: Set(result.academic_year.clone()),
            total_subjects: Set(result.total_subjects),
            total_coefficient: Set(result.total_coefficient),
            total_score: Set(result.total_score),
            average: Set(result.average),
            grade: Set(result.grade.to_string()),
            decision: Set(result.decision.to_string()),
            remarks: Set(result.remarks.clone()),
            class_position: Set(result.class_position),
            total_students: Set(result.total_students),
            generated_at: Set(result.generated_at.timestamp()),
        };

        let updated = model.update(&self.db).await.map_err(|e| match e {
            DbErr::RecordNotUpdated => {
                SchoolError::result_not_found(format!("Result {} not found", result.id))
            }
            e => SchoolError::database_operation(format!("更新结果失败: {e}")),
        })?;

        updated.into_student_result()
    }
}
