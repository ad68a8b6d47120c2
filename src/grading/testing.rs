//! 单元测试用的数据构造

use chrono::{NaiveDate, Utc};

use crate::models::{
    AcademicPeriod, Trimester,
    marks::{entities::DEFAULT_COEFFICIENT, requests::NewMark},
    students::entities::Student,
    subjects::entities::Subject,
};
use crate::storage::{MarkRepository, MemoryStorage, StudentDirectory};

pub fn period() -> AcademicPeriod {
    AcademicPeriod {
        trimester: Trimester::First,
        academic_year: "2023-2024".to_string(),
    }
}

pub fn student(id: i64, class_name: &str) -> Student {
    Student {
        id,
        first_name: format!("First{id}"),
        last_name: format!("Last{id}"),
        date_of_birth: NaiveDate::from_ymd_opt(2010, 1, 1).unwrap_or_default(),
        gender: "F".to_string(),
        class_name: class_name.to_string(),
        parent_contact: "+237 600 000 000".to_string(),
        address: None,
        registration_date: Utc::now(),
    }
}

pub fn seed_student(storage: &MemoryStorage, id: i64, class_name: &str) {
    storage.upsert_student(student(id, class_name));
}

pub fn seed_subject(storage: &MemoryStorage, id: i64, coefficient: Option<i32>) {
    storage.upsert_subject(Subject {
        id,
        name: format!("Subject {id}"),
        code: format!("S{id}"),
        description: None,
        coefficient,
        is_active: true,
        created_at: Utc::now(),
    });
}

/// 按学生当前班级录入一条成绩，快照系数为 1
pub async fn seed_mark(storage: &MemoryStorage, student_id: i64, subject_id: i64, score: f64) {
    seed_mark_with_coefficient(storage, student_id, subject_id, score, DEFAULT_COEFFICIENT).await;
}

pub async fn seed_mark_with_coefficient(
    storage: &MemoryStorage,
    student_id: i64,
    subject_id: i64,
    score: f64,
    coefficient: i32,
) {
    let class_name = storage
        .get_student_by_id(student_id)
        .await
        .unwrap()
        .map(|s| s.class_name)
        .unwrap_or_else(|| "Unassigned".to_string());
    storage
        .create_mark(NewMark {
            student_id,
            subject_id,
            class_name,
            period: period(),
            score,
            total_score: 20.0,
            coefficient,
            remarks: None,
        })
        .await
        .unwrap();
}
