use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{ResultService, with_student};
use crate::grading::ResultBuilder;
use crate::models::{ApiResponse, ErrorCode, results::requests::GenerateResultRequest};
use crate::utils::error_response;

pub async fn generate_student_result(
    service: &ResultService,
    request: &HttpRequest,
    student_id: i64,
    body: GenerateResultRequest,
) -> ActixResult<HttpResponse> {
    let period = match body.period() {
        Ok(period) => period,
        Err(e) => return Ok(error_response(&e)),
    };

    let storage = service.get_storage(request);
    let builder = ResultBuilder::new(storage.clone());

    let outcome = if body.regenerate {
        builder.regenerate_for_student(student_id, &period).await
    } else {
        builder.generate_for_student(student_id, &period).await
    };

    let generated = match outcome {
        Ok(generated) => generated,
        Err(e) => return Ok(error_response(&e)),
    };

    let created = generated.is_created();
    let result = match with_student(&storage, generated.into_result()).await {
        Ok(result) => result,
        Err(e) => return Ok(error_response(&e)),
    };

    Ok(match (created, body.regenerate) {
        (true, _) => HttpResponse::Created().json(ApiResponse::success(
            result,
            "Result generated successfully",
        )),
        (false, true) => HttpResponse::Ok().json(ApiResponse::success(
            result,
            "Result regenerated successfully",
        )),
        // 已存在：返回已有记录，不覆盖
        (false, false) => HttpResponse::Conflict().json(ApiResponse::error(
            ErrorCode::ResultAlreadyExists,
            result,
            "Result already exists for this trimester",
        )),
    })
}

