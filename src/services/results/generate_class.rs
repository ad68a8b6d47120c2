use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ResultService;
use crate::config::AppConfig;
use crate::grading::ClassRanker;
use crate::models::{
    ApiResponse,
    results::{requests::GenerateClassResultsRequest, responses::ClassResultsResponse},
};
use crate::utils::error_response;

pub async fn generate_class_results(
    service: &ResultService,
    request: &HttpRequest,
    class_name: String,
    body: GenerateClassResultsRequest,
) -> ActixResult<HttpResponse> {
    let period = match body.period() {
        Ok(period) => period,
        Err(e) => return Ok(error_response(&e)),
    };

    let storage = service.get_storage(request);
    let concurrency = AppConfig::get().results.batch_concurrency;
    let ranker = ClassRanker::new(storage, concurrency);

    match ranker.rank_class(&class_name, &period).await {
        Ok(ranking) => {
            let message = format!(
                "Generated results for {} students in {}",
                ranking.results.len(),
                class_name
            );
            let response = ClassResultsResponse {
                message: message.clone(),
                generated: ranking.generated,
                reused: ranking.reused,
                skipped: ranking.skipped,
                results: ranking.results,
            };
            Ok(HttpResponse::Ok().json(ApiResponse::success(response, message)))
        }
        Err(e) => Ok(error_response(&e)),
    }
}
