//! 成绩实体

use sea_orm::entity::prelude::*;

use crate::errors::SchoolError;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "marks")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub student_id: i64,
    pub subject_id: i64,
    pub class_name: String,
    pub trimester: String,
    pub academic_year: String,
    pub score: f64,
    pub total_score: f64,
    pub coefficient: i32,
    #[sea_orm(column_type = "Text", nullable)]
    pub remarks: Option<String>,
    pub entered_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::students::Entity",
        from = "Column::StudentId",
        to = "super::students::Column::Id"
    )]
    Student,
    #[sea_orm(
        belongs_to = "super::subjects::Entity",
        from = "Column::SubjectId",
        to = "super::subjects::Column::Id"
    )]
    Subject,
}

impl Related<super::students::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Student.def()
    }
}

impl Related<super::subjects::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Subject.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    pub fn into_mark(self) -> crate::errors::Result<crate::models::marks::entities::Mark> {
        use crate::models::marks::entities::Mark;
        use chrono::{DateTime, Utc};

        Ok(Mark {
            id: self.id,
            student_id: self.student_id,
            subject_id: self.subject_id,
            class_name: self.class_name,
            trimester: self
                .trimester
                .parse()
                .map_err(SchoolError::database_operation)?,
            academic_year: self.academic_year,
            score: self.score,
            total_score: self.total_score,
            coefficient: self.coefficient,
            remarks: self.remarks,
            entered_at: DateTime::<Utc>::from_timestamp(self.entered_at, 0).unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Trimester;

    fn model(trimester: &str) -> Model {
        Model {
            id: 7,
            student_id: 1,
            subject_id: 10,
            class_name: "Form 1A".to_string(),
            trimester: trimester.to_string(),
            academic_year: "2023-2024".to_string(),
            score: 14.5,
            total_score: 20.0,
            coefficient: 3,
            remarks: Some("Good".to_string()),
            entered_at: 1_700_000_000,
        }
    }

    #[test]
    fn test_into_mark() {
        let mark = model("Second").into_mark().unwrap();

        assert_eq!(mark.id, 7);
        assert_eq!(mark.trimester, Trimester::Second);
        assert_eq!(mark.score, 14.5);
        assert_eq!(mark.coefficient, 3);
        assert_eq!(mark.entered_at.timestamp(), 1_700_000_000);
    }

    #[test]
    fn test_into_mark_rejects_unknown_trimester() {
        let err = model("Fourth").into_mark().unwrap_err();

        assert!(matches!(err, SchoolError::DatabaseOperation(_)));
    }
}
