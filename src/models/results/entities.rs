use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::{AcademicPeriod, Trimester};

// 等级
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "result.ts")]
pub enum Grade {
    A,
    B,
    C,
    D,
    E,
    F,
}

impl Grade {
    pub fn as_str(&self) -> &'static str {
        match self {
            Grade::A => "A",
            Grade::B => "B",
            Grade::C => "C",
            Grade::D => "D",
            Grade::E => "E",
            Grade::F => "F",
        }
    }
}

impl std::fmt::Display for Grade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Grade {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "A" => Ok(Grade::A),
            "B" => Ok(Grade::B),
            "C" => Ok(Grade::C),
            "D" => Ok(Grade::D),
            "E" => Ok(Grade::E),
            "F" => Ok(Grade::F),
            _ => Err(format!("Invalid grade: {s}")),
        }
    }
}

// 升级决定，声明顺序即优劣顺序：Fail < Repeat < Pass
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, TS,
)]
#[ts(export, export_to = "result.ts")]
pub enum Decision {
    Fail,   // 不及格
    Repeat, // 留级
    Pass,   // 升级
}

impl Decision {
    pub const PASS: &'static str = "Pass";
    pub const REPEAT: &'static str = "Repeat";
    pub const FAIL: &'static str = "Fail";

    pub fn as_str(&self) -> &'static str {
        match self {
            Decision::Pass => Self::PASS,
            Decision::Repeat => Self::REPEAT,
            Decision::Fail => Self::FAIL,
        }
    }
}

impl std::fmt::Display for Decision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Decision {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            Decision::PASS => Ok(Decision::Pass),
            Decision::REPEAT => Ok(Decision::Repeat),
            Decision::FAIL => Ok(Decision::Fail),
            _ => Err(format!("Invalid decision: {s}")),
        }
    }
}

/// 学期结果，由成绩派生的快照
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "result.ts")]
pub struct StudentResult {
    // 结果ID
    pub id: i64,
    // 学生ID
    pub student_id: i64,
    // 生成时学生所在班级（快照）
    pub class_name: String,
    // 学期
    pub trimester: Trimester,
    // 学年
    pub academic_year: String,
    // 参与汇总的成绩条数
    pub total_subjects: i32,
    // 系数之和
    pub total_coefficient: i32,
    // 得分 × 系数之和
    pub total_score: f64,
    // 加权平均分，保留两位小数
    pub average: f64,
    // 等级
    pub grade: Grade,
    // 升级决定
    pub decision: Decision,
    // 评语
    pub remarks: String,
    // 班级排名，排名前为空
    pub class_position: Option<i32>,
    // 参与排名的学生总数，排名前为空
    pub total_students: Option<i32>,
    // 生成时间
    pub generated_at: chrono::DateTime<chrono::Utc>,
}

impl StudentResult {
    pub fn period(&self) -> AcademicPeriod {
        AcademicPeriod {
            trimester: self.trimester,
            academic_year: self.academic_year.clone(),
        }
    }
}

/// 待写入的结果（尚无 ID、尚未排名）
#[derive(Debug, Clone, PartialEq)]
pub struct ResultDraft {
    pub student_id: i64,
    pub class_name: String,
    pub period: AcademicPeriod,
    pub total_subjects: i32,
    pub total_coefficient: i32,
    pub total_score: f64,
    pub average: f64,
    pub grade: Grade,
    pub decision: Decision,
    pub remarks: String,
}

impl ResultDraft {
    /// 用重新计算的数据覆盖已有结果，保留 ID 并清空排名
    pub fn apply_to(self, existing: &StudentResult) -> StudentResult {
        StudentResult {
            id: existing.id,
            student_id: self.student_id,
            class_name: self.class_name,
            trimester: self.period.trimester,
            academic_year: self.period.academic_year,
            total_subjects: self.total_subjects,
            total_coefficient: self.total_coefficient,
            total_score: self.total_score,
            average: self.average,
            grade: self.grade,
            decision: self.decision,
            remarks: self.remarks,
            class_position: None,
            total_students: None,
            generated_at: chrono::Utc::now(),
        }
    }
}
