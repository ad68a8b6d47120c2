use actix_web::{HttpResponse, http::StatusCode};
use tracing::error;

use crate::errors::{ErrorKind, SchoolError};
use crate::models::ApiResponse;

/// 错误种类对应的 HTTP 状态码
pub fn status_for(err: &SchoolError) -> StatusCode {
    match err.kind() {
        ErrorKind::Validation => StatusCode::BAD_REQUEST,
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::Duplicate => StatusCode::CONFLICT,
        ErrorKind::NoData => StatusCode::BAD_REQUEST,
        ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// 将领域错误转换为 HTTP 响应
pub fn error_response(err: &SchoolError) -> HttpResponse {
    let status = status_for(err);
    if status.is_server_error() {
        #[cfg(debug_assertions)]
        error!("{}", err.format_colored());
        #[cfg(not(debug_assertions))]
        error!("{}", err.format_simple());
    }
    HttpResponse::build(status).json(ApiResponse::from_error(err))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            status_for(&SchoolError::validation("x")),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_for(&SchoolError::student_not_found("x")),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_for(&SchoolError::no_students_in_class("x")),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_for(&SchoolError::duplicate_mark("x")),
            StatusCode::CONFLICT
        );
        assert_eq!(
            status_for(&SchoolError::no_marks_found("x")),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_for(&SchoolError::database_operation("x")),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_error_response_status() {
        let resp = error_response(&SchoolError::result_not_found("Result 3 not found"));
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}
