use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::{AcademicPeriod, Trimester};

/// 默认满分
pub const DEFAULT_TOTAL_SCORE: f64 = 20.0;

/// 默认系数
pub const DEFAULT_COEFFICIENT: i32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "mark.ts")]
pub struct Mark {
    // 成绩ID
    pub id: i64,
    // 学生ID
    pub student_id: i64,
    // 科目ID
    pub subject_id: i64,
    // 录入时学生所在班级
    pub class_name: String,
    // 学期
    pub trimester: Trimester,
    // 学年，例如 "2023-2024"
    pub academic_year: String,
    // 得分 (0-20)
    pub score: f64,
    // 满分，通常为 20
    pub total_score: f64,
    // 录入时的科目系数快照
    pub coefficient: i32,
    // 教师评语
    pub remarks: Option<String>,
    // 录入时间
    pub entered_at: chrono::DateTime<chrono::Utc>,
}

impl Mark {
    pub fn period(&self) -> AcademicPeriod {
        AcademicPeriod {
            trimester: self.trimester,
            academic_year: self.academic_year.clone(),
        }
    }
}
