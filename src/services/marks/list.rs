use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::MarkService;
use crate::models::{ApiResponse, marks::requests::MarkListQuery};
use crate::utils::error_response;

pub async fn list_marks(
    service: &MarkService,
    request: &HttpRequest,
    query: MarkListQuery,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_marks(query).await {
        Ok(marks) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            marks,
            "Marks retrieved successfully",
        ))),
        Err(e) => Ok(error_response(&e)),
    }
}
