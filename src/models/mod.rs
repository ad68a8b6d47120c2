pub mod common;
pub mod marks;
pub mod results;
pub mod students;
pub mod subjects;

pub use common::{AcademicPeriod, ApiResponse, Trimester};

use crate::errors::SchoolError;

// 业务错误码，随响应体返回
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ErrorCode {
    Success = 0,

    // 通用错误
    BadRequest = 1000,
    ValidationFailed = 1001,
    NotFound = 1004,
    InternalServerError = 1500,

    // 学生 / 科目
    StudentNotFound = 2001,
    SubjectNotFound = 2002,
    ClassHasNoStudents = 2003,

    // 成绩
    MarkNotFound = 3001,
    MarkAlreadyExists = 3002,

    // 学期结果
    ResultNotFound = 4001,
    ResultAlreadyExists = 4002,
    NoMarksFound = 4003,
    ResultClassMismatch = 4004,
}

impl From<&SchoolError> for ErrorCode {
    fn from(err: &SchoolError) -> Self {
        match err {
            SchoolError::Validation(_) => ErrorCode::ValidationFailed,
            SchoolError::NotFound(_) => ErrorCode::NotFound,
            SchoolError::StudentNotFound(_) => ErrorCode::StudentNotFound,
            SchoolError::ResultNotFound(_) => ErrorCode::ResultNotFound,
            SchoolError::NoStudentsInClass(_) => ErrorCode::ClassHasNoStudents,
            SchoolError::DuplicateMark(_) => ErrorCode::MarkAlreadyExists,
            SchoolError::DuplicateResult(_) => ErrorCode::ResultAlreadyExists,
            SchoolError::NoMarksFound(_) => ErrorCode::NoMarksFound,
            SchoolError::ResultClassMismatch(_) => ErrorCode::ResultClassMismatch,
            SchoolError::SubjectNotFound(_) => ErrorCode::SubjectNotFound,
            SchoolError::MarkNotFound(_) => ErrorCode::MarkNotFound,
            SchoolError::DatabaseConfig(_)
            | SchoolError::DatabaseConnection(_)
            | SchoolError::DatabaseOperation(_)
            | SchoolError::Serialization(_)
            | SchoolError::DateParse(_) => ErrorCode::InternalServerError,
        }
    }
}
