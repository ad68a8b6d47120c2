use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ResultService;
use crate::errors::SchoolError;
use crate::models::{
    ApiResponse,
    results::{requests::ResultQuery, responses::ResultWithStudent},
};
use crate::utils::error_response;

pub async fn get_student_results(
    service: &ResultService,
    request: &HttpRequest,
    student_id: i64,
    query: ResultQuery,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let student = match storage.get_student_by_id(student_id).await {
        Ok(Some(student)) => student.summary(),
        Ok(None) => {
            return Ok(error_response(&SchoolError::student_not_found(format!(
                "Student {student_id} not found"
            ))));
        }
        Err(e) => return Ok(error_response(&e)),
    };

    match storage.list_results_by_student(student_id, &query).await {
        Ok(results) => {
            let results: Vec<ResultWithStudent> = results
                .into_iter()
                .map(|result| ResultWithStudent {
                    result,
                    student: Some(student.clone()),
                })
                .collect();
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                results,
                "Student results retrieved successfully",
            )))
        }
        Err(e) => Ok(error_response(&e)),
    }
}
