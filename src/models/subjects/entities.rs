use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "subject.ts")]
pub struct Subject {
    // 科目ID
    pub id: i64,
    // 科目名称，例如 "Mathematics"
    pub name: String,
    // 科目代码，例如 "MATH"
    pub code: String,
    // 描述
    pub description: Option<String>,
    // 系数（权重），未设置或为 0 时按 1 计算
    pub coefficient: Option<i32>,
    // 是否启用
    pub is_active: bool,
    // 创建时间
    pub created_at: chrono::DateTime<chrono::Utc>,
}
