use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "student.ts")]
pub struct Student {
    // 学生ID
    pub id: i64,
    // 名
    pub first_name: String,
    // 姓
    pub last_name: String,
    // 出生日期
    pub date_of_birth: chrono::NaiveDate,
    // 性别
    pub gender: String,
    // 当前所在班级，例如 "Form 1A"
    pub class_name: String,
    // 家长联系方式
    pub parent_contact: String,
    // 住址
    pub address: Option<String>,
    // 注册时间
    pub registration_date: chrono::DateTime<chrono::Utc>,
}

// 结果展示用的学生摘要
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "student.ts")]
pub struct StudentSummary {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub class_name: String,
}

impl Student {
    pub fn summary(&self) -> StudentSummary {
        StudentSummary {
            id: self.id,
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            class_name: self.class_name.clone(),
        }
    }
}
