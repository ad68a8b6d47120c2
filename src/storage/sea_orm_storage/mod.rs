//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。
//! 成绩与结果的唯一性由数据库唯一索引保证，冲突时返回 Duplicate 类错误。

mod marks;
mod results;
mod students;
mod subjects;

use crate::config::AppConfig;
use crate::errors::{Result, SchoolError};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr, SqlErr};
use std::time::Duration;
use tracing::info;

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    /// 创建新的 SeaORM 存储实例
    pub async fn new_async() -> Result<Self> {
        let config = AppConfig::get();
        let db_url = Self::build_database_url(&config.database.url)?;

        // 根据数据库类型选择连接方式
        let db = if db_url.starts_with("sqlite://") {
            Self::connect_sqlite(&db_url, config).await?
        } else {
            Self::connect_generic(&db_url, config).await?
        };

        // 运行迁移
        Migrator::up(&db, None)
            .await
            .map_err(|e| SchoolError::database_operation(format!("数据库迁移失败: {e}")))?;

        info!("SeaORM 存储初始化完成，数据库: {}", db_url);

        Ok(Self { db })
    }

    /// SQLite 专用连接（WAL + pragma 优化）
    async fn connect_sqlite(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| SchoolError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .create_if_missing(true)
            .foreign_keys(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(5))
            .pragma("cache_size", "-64000")
            .pragma("temp_store", "memory");

        let pool = SqlitePoolOptions::new()
            .max_connections(config.database.pool_size)
            .min_connections(1)
            .test_before_acquire(true)
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(300))
            .connect_with(opt)
            .await
            .map_err(|e| SchoolError::database_connection(format!("SQLite 连接失败: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(config.database.pool_size)
            .min_connections(1)
            .connect_timeout(Duration::from_secs(config.database.timeout))
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false);

        Database::connect(opt)
            .await
            .map_err(|e| SchoolError::database_connection(format!("无法连接到数据库: {e}")))
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite://") {
            Ok(url.to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") {
            Ok(format!("sqlite://{}?mode=rwc", url))
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(SchoolError::database_config(format!(
                "无法从 URL 推断数据库类型: {url}. 支持: sqlite://, postgres://, mysql://, memory://, 或 .db/.sqlite 文件路径"
            )))
        }
    }
}

/// 唯一索引冲突
fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}

// 存储接口实现
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
use crate::storage::{MarkRepository, ResultRepository, StudentDirectory, SubjectDirectory};
use async_trait::async_trait;

#[async_trait]
impl StudentDirectory for SeaOrmStorage {
    async fn get_student_by_id(&self, id: i64) -> Result<Option<Student>> {
        self.get_student_by_id_impl(id).await
    }

    async fn list_students_by_class(&self, class_name: &str) -> Result<Vec<Student>> {
        self.list_students_by_class_impl(class_name).await
    }
}

#[async_trait]
impl SubjectDirectory for SeaOrmStorage {
    async fn get_subject_by_id(&self, id: i64) -> Result<Option<Subject>> {
        self.get_subject_by_id_impl(id).await
    }
}

#[async_trait]
impl MarkRepository for SeaOrmStorage {
    async fn create_mark(&self, mark: NewMark) -> Result<Mark> {
        self.create_mark_impl(mark).await
    }

    async fn get_mark_by_id(&self, id: i64) -> Result<Option<Mark>> {
        self.get_mark_by_id_impl(id).await
    }

    async fn update_mark(&self, id: i64, update: UpdateMarkRequest) -> Result<Option<Mark>> {
        self.update_mark_impl(id, update).await
    }

    async fn delete_mark(&self, id: i64) -> Result<bool> {
        self.delete_mark_impl(id).await
    }

    async fn list_marks(&self, query: MarkListQuery) -> Result<Vec<Mark>> {
        self.list_marks_impl(query).await
    }

    async fn find_marks_by_student_and_period(
        &self,
        student_id: i64,
        period: &AcademicPeriod,
    ) -> Result<Vec<Mark>> {
        self.find_marks_by_student_and_period_impl(student_id, period)
            .await
    }
}

#[async_trait]
impl ResultRepository for SeaOrmStorage {
    async fn find_result_by_key(
        &self,
        student_id: i64,
        period: &AcademicPeriod,
    ) -> Result<Option<StudentResult>> {
        self.find_result_by_key_impl(student_id, period).await
    }

    async fn get_result_by_id(&self, id: i64) -> Result<Option<StudentResult>> {
        self.get_result_by_id_impl(id).await
    }

    async fn list_results_by_student(
        &self,
        student_id: i64,
        query: &ResultQuery,
    ) -> Result<Vec<StudentResult>> {
        self.list_results_by_student_impl(student_id, query).await
    }

    async fn list_results_by_class(
        &self,
        class_name: &str,
        query: &ResultQuery,
    ) -> Result<Vec<StudentResult>> {
        self.list_results_by_class_impl(class_name, query).await
    }

    async fn insert_result(&self, draft: ResultDraft) -> Result<StudentResult> {
        self.insert_result_impl(draft).await
    }

    async fn update_result(&self, result: &StudentResult) -> Result<StudentResult> {
        self.update_result_impl(result).await
    }
}
