//! 学期结果实体

use sea_orm::entity::prelude::*;

use crate::errors::SchoolError;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "results")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub student_id: i64,
    pub class_name: String,
    pub trimester: String,
    pub academic_year: String,
    pub total_subjects: i32,
    pub total_coefficient: i32,
    pub total_score: f64,
    pub average: f64,
    pub grade: String,
    pub decision: String,
    #[sea_orm(column_type = "Text")]
    pub remarks: String,
    pub class_position: Option<i32>,
    pub total_students: Option<i32>,
    pub generated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::students::Entity",
        from = "Column::StudentId",
        to = "super::students::Column::Id"
    )]
    Student,
}

impl Related<super::students::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Student.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    pub fn into_student_result(
        self,
    ) -> crate::errors::Result<crate::models::results::entities::StudentResult> {
        use crate::models::results::entities::StudentResult;
        use chrono::{DateTime, Utc};

        Ok(StudentResult {
            id: self.id,
            student_id: self.student_id,
            class_name: self.class_name,
            trimester: self
                .trimester
                .parse()
                .map_err(SchoolError::database_operation)?,
            academic_year: self.academic_year,
            total_subjects: self.total_subjects,
            total_coefficient: self.total_coefficient,
            total_score: self.total_score,
            average: self.average,
            grade: self.grade.parse().map_err(SchoolError::database_operation)?,
            decision: self
                .decision
                .parse()
                .map_err(SchoolError::database_operation)?,
            remarks: self.remarks,
            class_position: self.class_position,
            total_students: self.total_students,
            generated_at: DateTime::<Utc>::from_timestamp(self.generated_at, 0)
                .unwrap_or_default(),
        })
    }
}
