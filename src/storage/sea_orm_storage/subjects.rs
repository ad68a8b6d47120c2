//! 科目目录存储操作

use super::SeaOrmStorage;
use crate::entity::subjects::Entity as Subjects;
use crate::errors::{Result, SchoolError};
use crate::models::subjects::entities::Subject;
use sea_orm::EntityTrait;

impl SeaOrmStorage {
    /// 通过 ID 获取科目
    pub async fn get_subject_by_id_impl(&self, id: i64) -> Result<Option<Subject>> {
        let result = Subjects::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询科目失败: {e}")))?;

        Ok(result.map(|m| m.into_subject()))
    }
}
