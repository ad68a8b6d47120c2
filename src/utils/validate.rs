use once_cell::sync::Lazy;
use regex::Regex;

static ACADEMIC_YEAR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{4})-(\d{4})$").expect("Invalid academic year regex"));

/// 成绩满分（喀麦隆 20 分制）
pub const MAX_SCORE: f64 = 20.0;

pub fn validate_academic_year(academic_year: &str) -> Result<(), &'static str> {
    if academic_year.trim().is_empty() {
        return Err("Academic year is required");
    }
    // 格式校验：YYYY-YYYY
    let caps = ACADEMIC_YEAR_RE
        .captures(academic_year)
        .ok_or("Academic year must be formatted as YYYY-YYYY")?;
    let start: u32 = caps[1]
        .parse()
        .map_err(|_| "Academic year must be formatted as YYYY-YYYY")?;
    let end: u32 = caps[2]
        .parse()
        .map_err(|_| "Academic year must be formatted as YYYY-YYYY")?;
    // 学年必须跨越连续两年
    if end != start + 1 {
        return Err("Academic year must span two consecutive years");
    }
    Ok(())
}

pub fn validate_score(score: f64) -> Result<(), &'static str> {
    if !score.is_finite() || !(0.0..=MAX_SCORE).contains(&score) {
        return Err("Score must be between 0 and 20");
    }
    Ok(())
}

pub fn validate_total_score(total_score: f64) -> Result<(), &'static str> {
    if !total_score.is_finite() || total_score <= 0.0 {
        return Err("Total score must be greater than 0");
    }
    Ok(())
}

pub fn validate_coefficient(coefficient: i32) -> Result<(), &'static str> {
    if coefficient < 1 {
        return Err("Coefficient must be at least 1");
    }
    Ok(())
}
