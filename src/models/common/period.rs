use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::errors::{Result, SchoolError};
use crate::utils::validate::validate_academic_year;

// 学期
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, TS,
)]
#[ts(export, export_to = "period.ts")]
pub enum Trimester {
    First,  // 第一学期
    Second, // 第二学期
    Third,  // 第三学期
}

impl Trimester {
    pub const FIRST: &'static str = "First";
    pub const SECOND: &'static str = "Second";
    pub const THIRD: &'static str = "Third";

    pub fn as_str(&self) -> &'static str {
        match self {
            Trimester::First => Self::FIRST,
            Trimester::Second => Self::SECOND,
            Trimester::Third => Self::THIRD,
        }
    }
}

impl std::fmt::Display for Trimester {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Trimester {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            Trimester::FIRST => Ok(Trimester::First),
            Trimester::SECOND => Ok(Trimester::Second),
            Trimester::THIRD => Ok(Trimester::Third),
            _ => Err(format!("Invalid trimester: {s}")),
        }
    }
}

/// 学期 + 学年，结果与成绩的时间维度
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "period.ts")]
pub struct AcademicPeriod {
    pub trimester: Trimester,
    pub academic_year: String,
}

impl AcademicPeriod {
    pub fn new(trimester: Trimester, academic_year: impl Into<String>) -> Result<Self> {
        let academic_year = academic_year.into().trim().to_string();
        validate_academic_year(&academic_year).map_err(SchoolError::validation)?;
        Ok(Self {
            trimester,
            academic_year,
        })
    }

    /// 从请求中的可选字段构造，两者都必须提供
    pub fn from_parts(trimester: Option<Trimester>, academic_year: Option<String>) -> Result<Self> {
        match (trimester, academic_year) {
            (Some(trimester), Some(academic_year)) => Self::new(trimester, academic_year),
            _ => Err(SchoolError::validation(
                "Trimester and academic year are required",
            )),
        }
    }
}

impl std::fmt::Display for AcademicPeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} trimester {}", self.trimester, self.academic_year)
    }
}
