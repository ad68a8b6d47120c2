//! 学生实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "students")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    // ISO 8601 日期，例如 2010-05-17
    pub date_of_birth: String,
    pub gender: String,
    pub class_name: String,
    pub parent_contact: String,
    pub address: Option<String>,
    pub registration_date: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::marks::Entity")]
    Marks,
    #[sea_orm(has_many = "super::results::Entity")]
    Results,
}

impl Related<super::marks::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Marks.def()
    }
}

impl Related<super::results::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Results.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    pub fn into_student(self) -> crate::errors::Result<crate::models::students::entities::Student> {
        use crate::models::students::entities::Student;
        use chrono::{DateTime, NaiveDate, Utc};

        Ok(Student {
            id: self.id,
            first_name: self.first_name,
            last_name: self.last_name,
            date_of_birth: NaiveDate::parse_from_str(&self.date_of_birth, "%Y-%m-%d")?,
            gender: self.gender,
            class_name: self.class_name,
            parent_contact: self.parent_contact,
            address: self.address,
            registration_date: DateTime::<Utc>::from_timestamp(self.registration_date, 0)
                .unwrap_or_default(),
        })
    }
}
