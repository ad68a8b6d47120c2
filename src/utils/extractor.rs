//! 路径参数提取器
//!
//! 解析失败时直接返回统一格式的 400 响应，处理函数只需处理合法值。

use std::future::{Ready, ready};

use actix_web::{
    FromRequest, HttpRequest, HttpResponse, dev::Payload, error::InternalError,
};

use crate::models::{ApiResponse, ErrorCode};

fn bad_request(message: String) -> actix_web::Error {
    let response = HttpResponse::BadRequest()
        .json(ApiResponse::error_empty(ErrorCode::BadRequest, &message));
    InternalError::from_response(message, response).into()
}

fn parse_positive_id(req: &HttpRequest, name: &str) -> Result<i64, actix_web::Error> {
    let raw = req
        .match_info()
        .get(name)
        .ok_or_else(|| bad_request(format!("Missing path parameter: {name}")))?;
    match raw.parse::<i64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(bad_request(format!("Invalid {name}: {raw}"))),
    }
}

macro_rules! define_safe_id {
    ($($name:ident => $param:literal),* $(,)?) => {
        $(
            /// 路径中的正整数 ID
            #[derive(Debug, Clone, Copy)]
            pub struct $name(pub i64);

            impl FromRequest for $name {
                type Error = actix_web::Error;
                type Future = Ready<Result<Self, Self::Error>>;

                fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
                    ready(parse_positive_id(req, $param).map($name))
                }
            }
        )*
    };
}

define_safe_id! {
    SafeIDI64 => "id",
    SafeStudentIdI64 => "student_id",
}

/// 路径中的班级名称，去除首尾空白后不能为空
#[derive(Debug, Clone)]
pub struct SafeClassName(pub String);

impl FromRequest for SafeClassName {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let class_name = req
            .match_info()
            .get("class_name")
            .map(str::trim)
            .unwrap_or_default();
        if class_name.is_empty() || class_name.len() > 64 {
            return ready(Err(bad_request("Invalid class name".to_string())));
        }
        ready(Ok(SafeClassName(class_name.to_string())))
    }
}
