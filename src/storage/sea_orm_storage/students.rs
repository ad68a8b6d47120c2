//! 学生目录存储操作

use super::SeaOrmStorage;
use crate::entity::students::{Column, Entity as Students};
use crate::errors::{Result, SchoolError};
use crate::models::students::entities::Student;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder};

impl SeaOrmStorage {
    /// 通过 ID 获取学生
    pub async fn get_student_by_id_impl(&self, id: i64) -> Result<Option<Student>> {
        let result = Students::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询学生失败: {e}")))?;

        result.map(|m| m.into_student()).transpose()
    }

    /// 列出班级学生
    pub async fn list_students_by_class_impl(&self, class_name: &str) -> Result<Vec<Student>> {
        let students = Students::find()
            .filter(Column::ClassName.eq(class_name))
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询班级学生失败: {e}")))?;

        students.into_iter().map(|m| m.into_student()).collect()
    }
}
