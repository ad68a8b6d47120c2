pub mod average;
pub mod create;
pub mod delete;
pub mod list;
pub mod update;

use std::sync::Arc;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::marks::requests::{
    CreateMarkRequest, MarkAverageQuery, MarkListQuery, UpdateMarkRequest,
};
use crate::storage::Storage;

pub struct MarkService {
    storage: Option<Arc<dyn Storage>>,
}

impl MarkService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    // 录入成绩
    pub async fn create_mark(
        &self,
        request: &HttpRequest,
        body: CreateMarkRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_mark(self, request, body).await
    }

    // 按条件列出成绩
    pub async fn list_marks(
        &self,
        request: &HttpRequest,
        query: MarkListQuery,
    ) -> ActixResult<HttpResponse> {
        list::list_marks(self, request, query).await
    }

    // 更新成绩
    pub async fn update_mark(
        &self,
        request: &HttpRequest,
        mark_id: i64,
        body: UpdateMarkRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_mark(self, request, mark_id, body).await
    }

    // 删除成绩
    pub async fn delete_mark(
        &self,
        request: &HttpRequest,
        mark_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_mark(self, request, mark_id).await
    }

    // 预览学生某学期的加权平均分
    pub async fn calculate_average(
        &self,
        request: &HttpRequest,
        student_id: i64,
        query: MarkAverageQuery,
    ) -> ActixResult<HttpResponse> {
        average::calculate_average(self, request, student_id, query).await
    }
}
