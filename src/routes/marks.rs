use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::models::marks::requests::{
    CreateMarkRequest, MarkAverageQuery, MarkListQuery, UpdateMarkRequest,
};
use crate::services::MarkService;
use crate::utils::{SafeIDI64, SafeStudentIdI64};

// 懒加载的全局 MARK_SERVICE 实例
static MARK_SERVICE: Lazy<MarkService> = Lazy::new(MarkService::new_lazy);

pub async fn create_mark(
    req: HttpRequest,
    body: web::Json<CreateMarkRequest>,
) -> ActixResult<HttpResponse> {
    MARK_SERVICE.create_mark(&req, body.into_inner()).await
}

pub async fn list_marks(
    req: HttpRequest,
    query: web::Query<MarkListQuery>,
) -> ActixResult<HttpResponse> {
    MARK_SERVICE.list_marks(&req, query.into_inner()).await
}

pub async fn update_mark(
    req: HttpRequest,
    mark_id: SafeIDI64,
    body: web::Json<UpdateMarkRequest>,
) -> ActixResult<HttpResponse> {
    MARK_SERVICE
        .update_mark(&req, mark_id.0, body.into_inner())
        .await
}

pub async fn delete_mark(req: HttpRequest, mark_id: SafeIDI64) -> ActixResult<HttpResponse> {
    MARK_SERVICE.delete_mark(&req, mark_id.0).await
}

pub async fn calculate_average(
    req: HttpRequest,
    student_id: SafeStudentIdI64,
    query: web::Query<MarkAverageQuery>,
) -> ActixResult<HttpResponse> {
    MARK_SERVICE
        .calculate_average(&req, student_id.0, query.into_inner())
        .await
}

// 配置路由
pub fn configure_marks_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/marks")
            .service(
                web::resource("")
                    .route(web::get().to(list_marks))
                    .route(web::post().to(create_mark)),
            )
            .service(
                web::resource("/calculate-average/{student_id}")
                    .route(web::get().to(calculate_average)),
            )
            .service(
                web::resource("/{id}")
                    .route(web::put().to(update_mark))
                    .route(web::delete().to(delete_mark)),
            ),
    );
}
