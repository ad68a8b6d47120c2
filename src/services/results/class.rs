use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{ResultService, with_students};
use crate::models::{ApiResponse, results::requests::ResultQuery};
use crate::utils::error_response;

pub async fn get_class_results(
    service: &ResultService,
    request: &HttpRequest,
    class_name: String,
    query: ResultQuery,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let results = match storage.list_results_by_class(&class_name, &query).await {
        Ok(results) => results,
        Err(e) => return Ok(error_response(&e)),
    };

    match with_students(&storage, results).await {
        Ok(results) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            results,
            "Class results retrieved successfully",
        ))),
        Err(e) => Ok(error_response(&e)),
    }
}
