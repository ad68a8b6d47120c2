//! 统一错误处理模块
//!
//! 使用宏自动生成错误类型，支持错误代码、类型名称和错误种类。
//! 错误种类 (`ErrorKind`) 决定边界层的响应方式以及批量操作是否继续。

use std::fmt;

/// 错误种类
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// 输入缺失或越界，不应重试
    Validation,
    /// 学生、科目、班级或结果不存在
    NotFound,
    /// 唯一键冲突（成绩或结果）
    Duplicate,
    /// 没有可汇总的成绩
    NoData,
    /// 数据库等内部错误
    Internal,
}

/// 定义错误类型的宏
///
/// 自动生成：
/// - enum 定义
/// - code() 方法 - 返回错误代码
/// - error_type() 方法 - 返回错误类型名称
/// - kind() 方法 - 返回错误种类
/// - message() 方法 - 返回错误详情
/// - 便捷构造函数
macro_rules! define_school_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal, $kind:ident)
    ),* $(,)?) => {
        #[derive(Debug, Clone)]
        pub enum SchoolError {
            $($variant(String),)*
        }

        impl SchoolError {
            /// 获取错误代码
            pub fn code(&self) -> &'static str {
                match self {
                    $(SchoolError::$variant(_) => $code,)*
                }
            }

            /// 获取错误类型名称
            pub fn error_type(&self) -> &'static str {
                match self {
                    $(SchoolError::$variant(_) => $type_name,)*
                }
            }

            /// 获取错误种类
            pub fn kind(&self) -> ErrorKind {
                match self {
                    $(SchoolError::$variant(_) => ErrorKind::$kind,)*
                }
            }

            /// 获取错误详情
            pub fn message(&self) -> &str {
                match self {
                    $(SchoolError::$variant(msg) => msg,)*
                }
            }
        }

        // 生成便捷构造函数
        paste::paste! {
            impl SchoolError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        SchoolError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_school_errors! {
    DatabaseConfig("E001", "Database Configuration Error", Internal),
    DatabaseConnection("E002", "Database Connection Error", Internal),
    DatabaseOperation("E003", "Database Operation Error", Internal),
    Serialization("E004", "Serialization Error", Internal),
    DateParse("E005", "Date Parse Error", Internal),
    Validation("E006", "Validation Error", Validation),
    NotFound("E007", "Resource Not Found", NotFound),
    StudentNotFound("E008", "Student Not Found", NotFound),
    ResultNotFound("E009", "Result Not Found", NotFound),
    NoStudentsInClass("E010", "No Students In Class", NotFound),
    DuplicateMark("E011", "Duplicate Mark", Duplicate),
    DuplicateResult("E012", "Duplicate Result", Duplicate),
    NoMarksFound("E013", "No Marks Found", NoData),
    ResultClassMismatch("E014", "Result Class Mismatch", Validation),
    SubjectNotFound("E015", "Subject Not Found", NotFound),
    MarkNotFound("E016", "Mark Not Found", NotFound),
}

impl SchoolError {
    /// 格式化为彩色输出（用于开发环境）
    #[cfg(debug_assertions)]
    pub fn format_colored(&self) -> String {
        format!(
            "\x1b[1;31m[ERROR]\x1b[0m \x1b[33m{}\x1b[0m \x1b[31m{}\x1b[0m\n  {}",
            self.code(),
            self.error_type(),
            self.message()
        )
    }

    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }

    pub fn is_duplicate(&self) -> bool {
        self.kind() == ErrorKind::Duplicate
    }
}

impl fmt::Display for SchoolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for SchoolError {}

// 为常见的错误类型实现 From trait
impl From<sea_orm::DbErr> for SchoolError {
    fn from(err: sea_orm::DbErr) -> Self {
        SchoolError::DatabaseOperation(err.to_string())
    }
}

impl From<serde_json::Error> for SchoolError {
    fn from(err: serde_json::Error) -> Self {
        SchoolError::Serialization(err.to_string())
    }
}

impl From<chrono::ParseError> for SchoolError {
    fn from(err: chrono::ParseError) -> Self {
        SchoolError::DateParse(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, SchoolError>;
