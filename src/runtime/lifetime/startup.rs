use std::sync::Arc;

use tracing::{debug, warn};

use crate::config::AppConfig;
use crate::errors::{Result, SchoolError};
use crate::storage::Storage;

pub struct StartupContext {
    pub storage: Arc<dyn Storage>,
}

/// 准备服务器启动的上下文
/// 包括 TLS 加密后端与存储后端（含数据库迁移）
pub async fn prepare_server_startup() -> Result<StartupContext> {
    // 数据库驱动的 TLS 连接使用 ring 后端
    if rustls::crypto::ring::default_provider()
        .install_default()
        .is_err()
    {
        debug!("rustls crypto provider already installed");
    }

    let config = AppConfig::get();
    let storage = crate::storage::create_storage().await.map_err(|e| {
        SchoolError::database_connection(format!("Failed to create storage backend: {e}"))
    })?;
    warn!("Storage backend initialized and migrations completed");

    warn!(
        "Class result generation runs with concurrency {}",
        config.results.batch_concurrency
    );

    Ok(StartupContext { storage })
}
