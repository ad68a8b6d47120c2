use serde::Serialize;
use ts_rs::TS;

use super::entities::StudentResult;
use crate::models::students::entities::StudentSummary;

// 附带学生姓名的结果
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "result.ts")]
pub struct ResultWithStudent {
    #[serde(flatten)]
    #[ts(flatten)]
    pub result: StudentResult,
    pub student: Option<StudentSummary>,
}

// 批量生成时被跳过的学生
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "result.ts")]
pub struct SkippedStudent {
    pub student_id: i64,
    pub error_code: String,
    pub reason: String,
}

// 班级结果生成响应
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "result.ts")]
pub struct ClassResultsResponse {
    pub message: String,
    // 本次新生成的结果数
    pub generated: usize,
    // 已存在而直接复用的结果数
    pub reused: usize,
    pub skipped: Vec<SkippedStudent>,
    pub results: Vec<ResultWithStudent>,
}
