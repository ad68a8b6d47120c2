use serde::Deserialize;
use ts_rs::TS;

use crate::errors::{Result, SchoolError};
use crate::models::{AcademicPeriod, Trimester};
use crate::utils::validate::{validate_coefficient, validate_score, validate_total_score};

// 录入成绩请求
//
// # 默认值
// - `class_name` 未填写时使用学生当前班级
// - `total_score` 未填写时为 20
// - `coefficient` 未填写时使用科目系数，科目未设置系数时为 1
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "mark.ts")]
pub struct CreateMarkRequest {
    pub student_id: i64,
    pub subject_id: i64,
    pub class_name: Option<String>,
    pub trimester: Option<Trimester>,
    pub academic_year: Option<String>,
    pub score: f64,
    pub total_score: Option<f64>,
    pub coefficient: Option<i32>,
    pub remarks: Option<String>,
}

impl CreateMarkRequest {
    /// 校验请求字段并返回成绩所属学期
    pub fn validate(&self) -> Result<AcademicPeriod> {
        let period = AcademicPeriod::from_parts(self.trimester, self.academic_year.clone())?;
        validate_score(self.score).map_err(SchoolError::validation)?;
        if let Some(total_score) = self.total_score {
            validate_total_score(total_score).map_err(SchoolError::validation)?;
        }
        if let Some(coefficient) = self.coefficient {
            validate_coefficient(coefficient).map_err(SchoolError::validation)?;
        }
        Ok(period)
    }
}

// 更新成绩请求
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "mark.ts")]
pub struct UpdateMarkRequest {
    pub score: Option<f64>,
    pub total_score: Option<f64>,
    pub coefficient: Option<i32>,
    pub remarks: Option<String>,
}

impl UpdateMarkRequest {
    pub fn validate(&self) -> Result<()> {
        if let Some(score) = self.score {
            validate_score(score).map_err(SchoolError::validation)?;
        }
        if let Some(total_score) = self.total_score {
            validate_total_score(total_score).map_err(SchoolError::validation)?;
        }
        if let Some(coefficient) = self.coefficient {
            validate_coefficient(coefficient).map_err(SchoolError::validation)?;
        }
        Ok(())
    }
}

// 成绩查询参数（用于 HTTP 与存储层）
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "mark.ts")]
pub struct MarkListQuery {
    pub student_id: Option<i64>,
    pub class_name: Option<String>,
    pub trimester: Option<Trimester>,
    pub academic_year: Option<String>,
}

// 平均分预览查询参数，学期与学年均为必填
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "mark.ts")]
pub struct MarkAverageQuery {
    pub trimester: Option<Trimester>,
    pub academic_year: Option<String>,
}

impl MarkAverageQuery {
    pub fn period(&self) -> Result<AcademicPeriod> {
        AcademicPeriod::from_parts(self.trimester, self.academic_year.clone())
    }
}

// 默认值已解析完毕、可直接写入存储层的成绩
#[derive(Debug, Clone)]
pub struct NewMark {
    pub student_id: i64,
    pub subject_id: i64,
    pub class_name: String,
    pub period: AcademicPeriod,
    pub score: f64,
    pub total_score: f64,
    pub coefficient: i32,
    pub remarks: Option<String>,
}
