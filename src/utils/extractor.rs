//! 安全的路径参数提取器
//!
//! 路径中的 ID 必须是正整数，否则直接返回 400 统一响应，不会进入处理函数。

use actix_web::{
    FromRequest, HttpRequest, HttpResponse, dev::Payload, error::InternalError,
};
use futures_util::future::{Ready, ready};

use crate::models::{ApiResponse, ErrorCode};

fn invalid_param(name: &str) -> actix_web::Error {
    let response = HttpResponse::BadRequest().json(ApiResponse::<()>::error_empty(
        ErrorCode::BadRequest,
        format!("Invalid path parameter: {name}"),
    ));
    InternalError::from_response(format!("invalid {name}"), response).into()
}

fn parse_positive_i64(req: &HttpRequest, name: &str) -> Result<i64, actix_web::Error> {
    req.match_info()
        .get(name)
        .and_then(|raw| raw.parse::<i64>().ok())
        .filter(|id| *id > 0)
        .ok_or_else(|| invalid_param(name))
}

macro_rules! define_safe_i64_extractor {
    ($($name:ident => $param:literal),* $(,)?) => {
        $(
            #[derive(Debug, Clone, Copy, PartialEq, Eq)]
            pub struct $name(pub i64);

            impl FromRequest for $name {
                type Error = actix_web::Error;
                type Future = Ready<Result<Self, Self::Error>>;

                fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
                    ready(parse_positive_i64(req, $param).map($name))
                }
            }
        )*
    };
}

define_safe_i64_extractor! {
    SafeCourseId => "course_id",
    SafeLessonId => "lesson_id",
    SafeExamId => "exam_id",
    SafeUserId => "user_id",
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{App, test, web};

    async fn echo(course: SafeCourseId) -> HttpResponse {
        HttpResponse::Ok().body(course.0.to_string())
    }

    #[actix_web::test]
    async fn test_rejects_non_positive_ids() {
        let app = test::init_service(
            App::new().route("/courses/{course_id}", web::get().to(echo)),
        )
        .await;

        let ok = test::TestRequest::get().uri("/courses/12").to_request();
        let body = test::call_and_read_body(&app, ok).await;
        assert_eq!(body, "12");

        for bad in ["/courses/0", "/courses/-4", "/courses/abc"] {
            let req = test::TestRequest::get().uri(bad).to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), actix_web::http::StatusCode::BAD_REQUEST);
        }
    }
}
