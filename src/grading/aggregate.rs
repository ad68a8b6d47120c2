//! 加权平均汇总

use crate::errors::{Result, SchoolError};

/// 参与汇总的一条成绩：得分与已解析的系数
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightedScore {
    pub score: f64,
    pub coefficient: i32,
}

impl WeightedScore {
    /// 解析系数：取科目当前系数，缺失或非正数时为 1
    pub fn resolve(score: f64, subject_coefficient: Option<i32>) -> Self {
        let coefficient = subject_coefficient.filter(|c| *c > 0).unwrap_or(1);
        Self { score, coefficient }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aggregate {
    pub total_subjects: i32,
    pub total_score: f64,
    pub total_coefficient: i32,
    pub average: f64,
}

/// 四舍五入到两位小数（远离零）
pub fn round_to_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn count_to_i32(count: usize) -> Result<i32> {
    i32::try_from(count)
        .map_err(|_| SchoolError::validation(format!("Too many marks to aggregate: {count}")))
}

pub fn aggregate(scores: &[WeightedScore]) -> Result<Aggregate> {
    if scores.is_empty() {
        return Err(SchoolError::no_marks_found("No marks to aggregate"));
    }

    let total_coefficient: i32 = scores.iter().map(|s| s.coefficient).sum();
    let total_score: f64 = scores.iter().map(|s| s.score * f64::from(s.coefficient)).sum();

    Ok(Aggregate {
        total_subjects: count_to_i32(scores.len())?,
        total_score,
        total_coefficient,
        average: round_to_cents(total_score / f64::from(total_coefficient)),
    })
}
