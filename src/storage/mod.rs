//! 数据存储层
//!
//! 结果计算只通过下面四个接口访问外部数据：学生目录、科目目录、成绩库与结果库。
//! `Storage` 是四者的组合，服务层持有 `Arc<dyn Storage>`。

use std::sync::Arc;

use crate::config::AppConfig;
use crate::errors::{Result, SchoolError};
use crate::models::{
    AcademicPeriod,
    marks::{
        entities::Mark,
        requests::{MarkListQuery, NewMark, UpdateMarkRequest},
    },
    results::{
        entities::{ResultDraft, StudentResult},
        requests::ResultQuery,
    },
    students::entities::Student,
    subjects::entities::Subject,
};

pub mod memory;
pub mod sea_orm_storage;

pub use memory::MemoryStorage;

/// 学生目录
#[async_trait::async_trait]
pub trait StudentDirectory: Send + Sync {
    // 通过ID获取学生
    async fn get_student_by_id(&self, id: i64) -> Result<Option<Student>>;
    // 列出班级内的学生，按 ID 升序
    async fn list_students_by_class(&self, class_name: &str) -> Result<Vec<Student>>;
}

/// 科目目录
#[async_trait::async_trait]
pub trait SubjectDirectory: Send + Sync {
    // 通过ID获取科目
    async fn get_subject_by_id(&self, id: i64) -> Result<Option<Subject>>;
}

/// 成绩库
#[async_trait::async_trait]
pub trait MarkRepository: Send + Sync {
    // 录入成绩，(学生, 科目, 学期, 学年) 冲突时返回 DuplicateMark
    async fn create_mark(&self, mark: NewMark) -> Result<Mark>;
    // 通过ID获取成绩
    async fn get_mark_by_id(&self, id: i64) -> Result<Option<Mark>>;
    // 更新成绩
    async fn update_mark(&self, id: i64, update: UpdateMarkRequest) -> Result<Option<Mark>>;
    // 删除成绩，不存在时返回 false
    async fn delete_mark(&self, id: i64) -> Result<bool>;
    // 按条件列出成绩
    async fn list_marks(&self, query: MarkListQuery) -> Result<Vec<Mark>>;
    // 获取学生在某学期的全部成绩
    async fn find_marks_by_student_and_period(
        &self,
        student_id: i64,
        period: &AcademicPeriod,
    ) -> Result<Vec<Mark>>;
}

/// 结果库
#[async_trait::async_trait]
pub trait ResultRepository: Send + Sync {
    // 按 (学生, 学期, 学年) 获取结果
    async fn find_result_by_key(
        &self,
        student_id: i64,
        period: &AcademicPeriod,
    ) -> Result<Option<StudentResult>>;
    // 通过ID获取结果
    async fn get_result_by_id(&self, id: i64) -> Result<Option<StudentResult>>;
    // 列出学生的结果，按学年降序、学期升序
    async fn list_results_by_student(
        &self,
        student_id: i64,
        query: &ResultQuery,
    ) -> Result<Vec<StudentResult>>;
    // 列出班级的结果，按班级排名升序，未排名的在最后
    async fn list_results_by_class(
        &self,
        class_name: &str,
        query: &ResultQuery,
    ) -> Result<Vec<StudentResult>>;
    // 写入新结果，键冲突时返回 DuplicateResult（检查与写入是原子的）
    async fn insert_result(&self, draft: ResultDraft) -> Result<StudentResult>;
    // 整体更新已有结果
    async fn update_result(&self, result: &StudentResult) -> Result<StudentResult>;
}

pub trait Storage: StudentDirectory + SubjectDirectory + MarkRepository + ResultRepository {}

impl<T> Storage for T where T: StudentDirectory + SubjectDirectory + MarkRepository + ResultRepository
{}

/// 按配置创建存储后端
pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let config = AppConfig::get();
    if use_memory_storage(config)? {
        tracing::warn!(
            "Using in-process memory storage: it starts empty and data will not be persisted"
        );
        return Ok(Arc::new(MemoryStorage::new()));
    }
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}

/// `memory://` 只是空的沙盒（学生与科目目录没有写入入口），生产环境拒绝使用
fn use_memory_storage(config: &AppConfig) -> Result<bool> {
    if !config.database.url.starts_with(memory::MEMORY_URL_SCHEME) {
        return Ok(false);
    }
    if config.is_production() {
        return Err(SchoolError::database_config(
            "memory:// storage is not available in production",
        ));
    }
    Ok(true)
}
