use std::sync::Arc;

use actix_web::{App, http::StatusCode, test, web};
use chrono::{NaiveDate, Utc};
use serde_json::{Value, json};

use rust_school_results::models::{students::entities::Student, subjects::entities::Subject};
use rust_school_results::routes;
use rust_school_results::storage::{MemoryStorage, Storage};
use rust_school_results::utils::{json_error_handler, query_error_handler};

const CLASS: &str = "Form1A";

fn student(id: i64, first_name: &str, class_name: &str) -> Student {
    Student {
        id,
        first_name: first_name.to_string(),
        last_name: "Nkemdirim".to_string(),
        date_of_birth: NaiveDate::from_ymd_opt(2011, 5, 14).unwrap(),
        gender: "M".to_string(),
        class_name: class_name.to_string(),
        parent_contact: "+237 677 000 111".to_string(),
        address: Some("Bamenda".to_string()),
        registration_date: Utc::now(),
    }
}

fn subject(id: i64, name: &str, coefficient: Option<i32>) -> Subject {
    Subject {
        id,
        name: name.to_string(),
        code: name.to_uppercase(),
        description: None,
        coefficient,
        is_active: true,
        created_at: Utc::now(),
    }
}

fn seeded_storage() -> Arc<dyn Storage> {
    let storage = MemoryStorage::new();
    storage.upsert_student(student(1, "Amara", CLASS));
    storage.upsert_student(student(2, "Bih", CLASS));
    storage.upsert_student(student(3, "Che", CLASS));
    storage.upsert_subject(subject(10, "Mathematics", Some(3)));
    storage.upsert_subject(subject(11, "English", Some(2)));
    Arc::new(storage)
}

macro_rules! app {
    ($storage:expr) => {
        test::init_service(
            App::new()
                .app_data(web::QueryConfig::default().error_handler(query_error_handler))
                .app_data(web::JsonConfig::default().error_handler(json_error_handler))
                .app_data(web::Data::new($storage.clone()))
                .configure(routes::configure_results_routes)
                .configure(routes::configure_marks_routes),
        )
        .await
    };
}

fn period() -> Value {
    json!({ "trimester": "First", "academic_year": "2023-2024" })
}

fn mark(student_id: i64, subject_id: i64, score: f64) -> Value {
    json!({
        "student_id": student_id,
        "subject_id": subject_id,
        "trimester": "First",
        "academic_year": "2023-2024",
        "score": score,
    })
}

#[actix_web::test]
async fn test_student_result_lifecycle() {
    let storage = seeded_storage();
    let app = app!(storage);

    for (subject_id, score) in [(10, 18.0), (11, 12.0)] {
        let req = test::TestRequest::post()
            .uri("/api/v1/marks")
            .set_json(mark(1, subject_id, score))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
    }

    let req = test::TestRequest::post()
        .uri("/api/v1/results/generate/1")
        .set_json(period())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    let data = &body["data"];
    assert_eq!(body["code"], 0);
    assert_eq!(data["total_coefficient"], 5);
    assert_eq!(data["total_score"], 78.0);
    assert_eq!(data["average"], 15.6);
    assert_eq!(data["grade"], "B");
    assert_eq!(data["decision"], "Pass");
    assert_eq!(data["student"]["first_name"], "Amara");
    let result_id = data["id"].as_i64().unwrap();

    // 再次生成：返回已有记录
    let req = test::TestRequest::post()
        .uri("/api/v1/results/generate/1")
        .set_json(period())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], 4002);
    assert_eq!(body["data"]["id"], result_id);

    // 修改成绩后显式重新生成
    let req = test::TestRequest::get()
        .uri("/api/v1/marks?student_id=1&trimester=First")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    let marks = body["data"].as_array().unwrap();
    assert_eq!(marks.len(), 2);
    let english = marks
        .iter()
        .find(|m| m["subject_id"] == 11)
        .unwrap()["id"]
        .as_i64()
        .unwrap();

    let req = test::TestRequest::put()
        .uri(&format!("/api/v1/marks/{english}"))
        .set_json(json!({ "score": 17.0 }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let mut body = period();
    body["regenerate"] = json!(true);
    let req = test::TestRequest::post()
        .uri("/api/v1/results/generate/1")
        .set_json(body)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["id"], result_id);
    assert_eq!(body["data"]["average"], 17.6);
    assert_eq!(body["data"]["grade"], "A");

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/results/{result_id}"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::get()
        .uri("/api/v1/results/student/1?academic_year=2023-2024")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
}

#[actix_web::test]
async fn test_generation_errors() {
    let storage = seeded_storage();
    let app = app!(storage);

    // 没有成绩
    let req = test::TestRequest::post()
        .uri("/api/v1/results/generate/2")
        .set_json(period())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], 4003);

    // 学生不存在
    let req = test::TestRequest::post()
        .uri("/api/v1/results/generate/404")
        .set_json(period())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    // 缺少学年
    let req = test::TestRequest::post()
        .uri("/api/v1/results/generate/1")
        .set_json(json!({ "trimester": "First" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], 1001);

    // 非法学期
    let req = test::TestRequest::post()
        .uri("/api/v1/results/generate/1")
        .set_json(json!({ "trimester": "Fourth", "academic_year": "2023-2024" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], 1000);

    let req = test::TestRequest::post()
        .uri("/api/v1/results/generate/abc")
        .set_json(period())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::get()
        .uri("/api/v1/results/999")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_class_generation_and_ranking() {
    let storage = seeded_storage();
    let app = app!(storage);

    // 学生 1、2 平均分相同，学生 3 没有成绩
    for (student_id, score) in [(1, 15.0), (2, 15.0)] {
        let req = test::TestRequest::post()
            .uri("/api/v1/marks")
            .set_json(mark(student_id, 10, score))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
    }

    let req = test::TestRequest::post()
        .uri(&format!("/api/v1/results/generate-class/{CLASS}"))
        .set_json(period())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    let data = &body["data"];
    assert_eq!(data["generated"], 2);
    assert_eq!(data["reused"], 0);
    assert_eq!(data["skipped"][0]["student_id"], 3);
    assert_eq!(data["skipped"][0]["error_code"], "E013");
    let results = data["results"].as_array().unwrap();
    assert_eq!(results[0]["student_id"], 1);
    assert_eq!(results[0]["class_position"], 1);
    assert_eq!(results[1]["student_id"], 2);
    assert_eq!(results[1]["class_position"], 2);
    assert!(results.iter().all(|r| r["total_students"] == 2));

    // 重复执行：全部复用，名次不变
    let req = test::TestRequest::post()
        .uri(&format!("/api/v1/results/generate-class/{CLASS}"))
        .set_json(period())
        .to_request();
    let resp = test::call_service(&app, req).await;
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["generated"], 0);
    assert_eq!(body["data"]["reused"], 2);

    let req = test::TestRequest::get()
        .uri(&format!(
            "/api/v1/results/class/{CLASS}?trimester=First&academic_year=2023-2024"
        ))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    let results = body["data"].as_array().unwrap();
    assert_eq!(results.len(), 2);
    assert_eq!(results[0]["class_position"], 1);
    assert_eq!(results[0]["student"]["first_name"], "Amara");

    let req = test::TestRequest::post()
        .uri("/api/v1/results/generate-class/Form9Z")
        .set_json(period())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], 2003);
}

#[actix_web::test]
async fn test_mark_validation() {
    let storage = seeded_storage();
    let app = app!(storage);

    let req = test::TestRequest::post()
        .uri("/api/v1/marks")
        .set_json(mark(1, 10, 21.0))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let mut body = mark(1, 10, 12.0);
    body["academic_year"] = json!("2023-2025");
    let req = test::TestRequest::post()
        .uri("/api/v1/marks")
        .set_json(body)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::post()
        .uri("/api/v1/marks")
        .set_json(mark(1, 10, 12.0))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["coefficient"], 3);
    assert_eq!(body["data"]["class_name"], CLASS);
    assert_eq!(body["data"]["total_score"], 20.0);

    let req = test::TestRequest::post()
        .uri("/api/v1/marks")
        .set_json(mark(1, 10, 14.0))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], 3002);

    let req = test::TestRequest::post()
        .uri("/api/v1/marks")
        .set_json(mark(1, 77, 14.0))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::put()
        .uri("/api/v1/marks/999")
        .set_json(json!({ "score": 10.0 }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::post()
        .uri("/api/v1/marks")
        .insert_header(("content-type", "application/json"))
        .set_payload("{not json")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_average_preview_and_mark_deletion() {
    let storage = seeded_storage();
    let app = app!(storage);

    let mut english = 0;
    for (subject_id, score) in [(10, 18.0), (11, 12.0)] {
        let req = test::TestRequest::post()
            .uri("/api/v1/marks")
            .set_json(mark(1, subject_id, score))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let body: Value = test::read_body_json(resp).await;
        english = body["data"]["id"].as_i64().unwrap();
    }

    let average_uri = "/api/v1/marks/calculate-average/1?trimester=First&academic_year=2023-2024";
    let req = test::TestRequest::get().uri(average_uri).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["average"], 15.6);
    assert_eq!(body["data"]["total_marks"], 2);
    assert_eq!(body["data"]["total_coefficient"], 5);

    // 预览不生成结果
    let req = test::TestRequest::get()
        .uri("/api/v1/results/student/1")
        .to_request();
    let resp = test::call_service(&app, req).await;
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"].as_array().map(Vec::len), Some(0));

    let req = test::TestRequest::get()
        .uri("/api/v1/marks/calculate-average/1?trimester=First")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::get()
        .uri("/api/v1/marks/calculate-average/2?trimester=First&academic_year=2023-2024")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], 4003);

    let req = test::TestRequest::delete()
        .uri(&format!("/api/v1/marks/{english}"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::delete()
        .uri(&format!("/api/v1/marks/{english}"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], 3001);

    let req = test::TestRequest::get().uri(average_uri).to_request();
    let resp = test::call_service(&app, req).await;
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["average"], 18.0);
    assert_eq!(body["data"]["total_marks"], 1);

    // 删除后同一科目可以重新录入
    let req = test::TestRequest::post()
        .uri("/api/v1/marks")
        .set_json(mark(1, 11, 14.0))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
}
