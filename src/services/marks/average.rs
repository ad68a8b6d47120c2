//! 平均分预览：与结果生成使用同一套系数解析与汇总，但不写入结果

use std::sync::Arc;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::MarkService;
use crate::errors::{Result, SchoolError};
use crate::grading::{aggregate, builder::weighted_scores};
use crate::models::{
    AcademicPeriod, ApiResponse,
    marks::{requests::MarkAverageQuery, responses::MarkAverage},
};
use crate::storage::Storage;
use crate::utils::error_response;

pub async fn calculate_average(
    service: &MarkService,
    request: &HttpRequest,
    student_id: i64,
    query: MarkAverageQuery,
) -> ActixResult<HttpResponse> {
    let period = match query.period() {
        Ok(period) => period,
        Err(e) => return Ok(error_response(&e)),
    };
    let storage = service.get_storage(request);

    match mark_average(&storage, student_id, &period).await {
        Ok(average) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            average,
            "Average calculated successfully",
        ))),
        // 预览时没有成绩视为资源不存在
        Err(e @ SchoolError::NoMarksFound(_)) => {
            Ok(HttpResponse::NotFound().json(ApiResponse::from_error(&e)))
        }
        Err(e) => Ok(error_response(&e)),
    }
}

pub(crate) async fn mark_average(
    storage: &Arc<dyn Storage>,
    student_id: i64,
    period: &AcademicPeriod,
) -> Result<MarkAverage> {
    let marks = storage
        .find_marks_by_student_and_period(student_id, period)
        .await?;
    if marks.is_empty() {
        return Err(SchoolError::no_marks_found(format!(
            "No marks found for student {student_id} ({period})"
        )));
    }

    let totals = aggregate(&weighted_scores(storage, &marks).await?)?;

    Ok(MarkAverage {
        student_id,
        trimester: period.trimester,
        academic_year: period.academic_year.clone(),
        average: totals.average,
        total_marks: totals.total_subjects,
        total_coefficient: totals.total_coefficient,
    })
}
