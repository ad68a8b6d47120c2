use serde::Deserialize;
use ts_rs::TS;

use crate::errors::Result;
use crate::models::{AcademicPeriod, Trimester};

// 生成学生结果请求
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "result.ts")]
pub struct GenerateResultRequest {
    pub trimester: Option<Trimester>,
    pub academic_year: Option<String>,
    // 为 true 时按当前成绩重新计算并覆盖已有结果
    #[serde(default)]
    pub regenerate: bool,
}

impl GenerateResultRequest {
    pub fn period(&self) -> Result<AcademicPeriod> {
        AcademicPeriod::from_parts(self.trimester, self.academic_year.clone())
    }
}

// 生成班级结果请求
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "result.ts")]
pub struct GenerateClassResultsRequest {
    pub trimester: Option<Trimester>,
    pub academic_year: Option<String>,
}

impl GenerateClassResultsRequest {
    pub fn period(&self) -> Result<AcademicPeriod> {
        AcademicPeriod::from_parts(self.trimester, self.academic_year.clone())
    }
}

// 结果查询参数（学期与学年均可选）
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "result.ts")]
pub struct ResultQuery {
    pub trimester: Option<Trimester>,
    pub academic_year: Option<String>,
}

impl ResultQuery {
    pub fn for_period(period: &AcademicPeriod) -> Self {
        Self {
            trimester: Some(period.trimester),
            academic_year: Some(period.academic_year.clone()),
        }
    }

    pub fn matches(&self, trimester: Trimester, academic_year: &str) -> bool {
        self.trimester.is_none_or(|t| t == trimester)
            && self
                .academic_year
                .as_deref()
                .is_none_or(|y| y == academic_year)
    }
}
