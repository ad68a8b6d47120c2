use serde::Serialize;
use ts_rs::TS;

use crate::models::Trimester;

// 平均分预览，不生成结果
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export, export_to = "mark.ts")]
pub struct MarkAverage {
    pub student_id: i64,
    pub trimester: Trimester,
    pub academic_year: String,
    // 加权平均分，保留两位小数
    pub average: f64,
    // 参与计算的成绩条数
    pub total_marks: i32,
    pub total_coefficient: i32,
}
