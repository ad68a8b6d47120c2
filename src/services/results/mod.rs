pub mod class;
pub mod generate;
pub mod generate_class;
pub mod get;
pub mod student;

use std::collections::HashMap;
use std::sync::Arc;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::errors::Result;
use crate::models::{
    results::{
        entities::StudentResult,
        requests::{GenerateClassResultsRequest, GenerateResultRequest, ResultQuery},
        responses::ResultWithStudent,
    },
    students::entities::StudentSummary,
};
use crate::storage::Storage;

pub struct ResultService {
    storage: Option<Arc<dyn Storage>>,
}

impl ResultService {
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

    // 生成（或重新生成）学生学期结果
    pub async fn generate_student_result(
        &self,
        request: &HttpRequest,
        student_id: i64,
        body: GenerateResultRequest,
    ) -> ActixResult<HttpResponse> {
        generate::generate_student_result(self, request, student_id, body).await
    }

    // 生成班级学期结果并排名
    pub async fn generate_class_results(
        &self,
        request: &HttpRequest,
        class_name: String,
        body: GenerateClassResultsRequest,
    ) -> ActixResult<HttpResponse> {
        generate_class::generate_class_results(self, request, class_name, body).await
    }

    // 获取学生的历次结果
    pub async fn get_student_results(
        &self,
        request: &HttpRequest,
        student_id: i64,
        query: ResultQuery,
    ) -> ActixResult<HttpResponse> {
        student::get_student_results(self, request, student_id, query).await
    }

    // 获取班级结果（按名次）
    pub async fn get_class_results(
        &self,
        request: &HttpRequest,
        class_name: String,
        query: ResultQuery,
    ) -> ActixResult<HttpResponse> {
        class::get_class_results(self, request, class_name, query).await
    }

    pub async fn get_result(&self, request: &HttpRequest, result_id: i64) -> ActixResult<HttpResponse> {
        get::get_result(self, request, result_id).await
    }
}

/// 为结果附上学生姓名，同一学生只查询一次
pub(crate) async fn with_students(
    storage: &Arc<dyn Storage>,
    results: Vec<StudentResult>,
) -> Result<Vec<ResultWithStudent>> {
    let mut students: HashMap<i64, Option<StudentSummary>> = HashMap::new();
    let mut out = Vec::with_capacity(results.len());

    for result in results {
        let student = match students.get(&result.student_id) {
            Some(s) => s.clone(),
            None => {
                let s = storage
                    .get_student_by_id(result.student_id)
                    .await?
                    .map(|s| s.summary());
                students.insert(result.student_id, s.clone());
                s
            }
        };
        out.push(ResultWithStudent { result, student });
    }

    Ok(out)
}

pub(crate) async fn with_student(
    storage: &Arc<dyn Storage>,
    result: StudentResult,
) -> Result<ResultWithStudent> {
    let student = storage
        .get_student_by_id(result.student_id)
        .await?
        .map(|s| s.summary());
    Ok(ResultWithStudent { result, student })
}
