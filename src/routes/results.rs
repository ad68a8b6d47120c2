use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::models::results::requests::{
    GenerateClassResultsRequest, GenerateResultRequest, ResultQuery,
};
use crate::services::ResultService;
use crate::utils::{SafeClassName, SafeIDI64, SafeStudentIdI64};

// 懒加载的全局 RESULT_SERVICE 实例
static RESULT_SERVICE: Lazy<ResultService> = Lazy::new(ResultService::new_lazy);

// HTTP处理程序
pub async fn generate_student_result(
    req: HttpRequest,
    student_id: SafeStudentIdI64,
    body: web::Json<GenerateResultRequest>,
) -> ActixResult<HttpResponse> {
    RESULT_SERVICE
        .generate_student_result(&req, student_id.0, body.into_inner())
        .await
}

pub async fn generate_class_results(
    req: HttpRequest,
    class_name: SafeClassName,
    body: web::Json<GenerateClassResultsRequest>,
) -> ActixResult<HttpResponse> {
    RESULT_SERVICE
        .generate_class_results(&req, class_name.0, body.into_inner())
        .await
}

pub async fn get_student_results(
    req: HttpRequest,
    student_id: SafeStudentIdI64,
    query: web::Query<ResultQuery>,
) -> ActixResult<HttpResponse> {
    RESULT_SERVICE
        .get_student_results(&req, student_id.0, query.into_inner())
        .await
}

pub async fn get_class_results(
    req: HttpRequest,
    class_name: SafeClassName,
    query: web::Query<ResultQuery>,
) -> ActixResult<HttpResponse> {
    RESULT_SERVICE
        .get_class_results(&req, class_name.0, query.into_inner())
        .await
}

pub async fn get_result(req: HttpRequest, result_id: SafeIDI64) -> ActixResult<HttpResponse> {
    RESULT_SERVICE.get_result(&req, result_id.0).await
}

// 配置路由
pub fn configure_results_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/results")
            .service(
                web::resource("/generate/{student_id}")
                    .route(web::post().to(generate_student_result)),
            )
            .service(
                web::resource("/generate-class/{class_name}")
                    .route(web::post().to(generate_class_results)),
            )
            .service(
                web::resource("/student/{student_id}").route(web::get().to(get_student_results)),
            )
            .service(web::resource("/class/{class_name}").route(web::get().to(get_class_results)))
            .service(web::resource("/{id}").route(web::get().to(get_result))),
    );
}
