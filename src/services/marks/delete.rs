use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::MarkService;
use crate::models::{ApiResponse, ErrorCode};
use crate::utils::error_response;

pub async fn delete_mark(
    service: &MarkService,
    request: &HttpRequest,
    mark_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.delete_mark(mark_id).await {
        Ok(true) => {
            info!("Mark {} deleted", mark_id);
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Mark deleted successfully")))
        }
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::MarkNotFound,
            format!("Mark {mark_id} not found"),
        ))),
        Err(e) => Ok(error_response(&e)),
    }
}
