use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{ResultService, with_student};
use crate::errors::SchoolError;
use crate::models::ApiResponse;
use crate::utils::error_response;

pub async fn get_result(
    service: &ResultService,
    request: &HttpRequest,
    result_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let result = match storage.get_result_by_id(result_id).await {
        Ok(Some(result)) => result,
        Ok(None) => {
            return Ok(error_response(&SchoolError::result_not_found(format!(
                "Result {result_id} not found"
            ))));
        }
        Err(e) => return Ok(error_response(&e)),
    };

    match with_student(&storage, result).await {
        Ok(result) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            result,
            "Result retrieved successfully",
        ))),
        Err(e) => Ok(error_response(&e)),
    }
}
