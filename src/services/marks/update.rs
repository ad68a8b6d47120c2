use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::MarkService;
use crate::errors::SchoolError;
use crate::models::{ApiResponse, marks::requests::UpdateMarkRequest};
use crate::utils::error_response;

pub async fn update_mark(
    service: &MarkService,
    request: &HttpRequest,
    mark_id: i64,
    body: UpdateMarkRequest,
) -> ActixResult<HttpResponse> {
    if let Err(e) = body.validate() {
        return Ok(error_response(&e));
    }

    let storage = service.get_storage(request);

    match storage.update_mark(mark_id, body).await {
        Ok(Some(mark)) => {
            info!("Mark {} updated", mark.id);
            Ok(HttpResponse::Ok().json(ApiResponse::success(mark, "Mark updated successfully")))
        }
        Ok(None) => Ok(error_response(&SchoolError::mark_not_found(format!(
            "Mark {mark_id} not found"
        )))),
        Err(e) => Ok(error_response(&e)),
    }
}
