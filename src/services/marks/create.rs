use std::sync::Arc;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::MarkService;
use crate::errors::{Result, SchoolError};
use crate::models::{
    ApiResponse,
    marks::{
        entities::{DEFAULT_COEFFICIENT, DEFAULT_TOTAL_SCORE, Mark},
        requests::{CreateMarkRequest, NewMark},
    },
};
use crate::storage::Storage;
use crate::utils::error_response;

pub async fn create_mark(
    service: &MarkService,
    request: &HttpRequest,
    body: CreateMarkRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match record_mark(&storage, body).await {
        Ok(mark) => Ok(HttpResponse::Created()
            .json(ApiResponse::success(mark, "Mark recorded successfully"))),
        Err(e) => Ok(error_response(&e)),
    }
}

/// 校验并补全默认值后写入成绩
pub(crate) async fn record_mark(storage: &Arc<dyn Storage>, body: CreateMarkRequest) -> Result<Mark> {
    let period = body.validate()?;

    let student = storage
        .get_student_by_id(body.student_id)
        .await?
        .ok_or_else(|| {
            SchoolError::student_not_found(format!("Student {} not found", body.student_id))
        })?;
    let subject = storage
        .get_subject_by_id(body.subject_id)
        .await?
        .ok_or_else(|| {
            SchoolError::subject_not_found(format!("Subject {} not found", body.subject_id))
        })?;

    // 系数快照：请求值 > 科目系数 > 1
    let coefficient = body
        .coefficient
        .or(subject.coefficient.filter(|c| *c > 0))
        .unwrap_or(DEFAULT_COEFFICIENT);

    let class_name = body
        .class_name
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(str::to_string)
        .unwrap_or(student.class_name);

    let mark = storage
        .create_mark(NewMark {
            student_id: body.student_id,
            subject_id: body.subject_id,
            class_name,
            period,
            score: body.score,
            total_score: body.total_score.unwrap_or(DEFAULT_TOTAL_SCORE),
            coefficient,
            remarks: body.remarks,
        })
        .await?;

    info!(
        "Mark {} recorded for student {} in subject {} ({})",
        mark.id,
        mark.student_id,
        mark.subject_id,
        mark.period()
    );
    Ok(mark)
}
