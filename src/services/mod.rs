pub mod auth;
pub mod courses;
pub mod enrollments;
pub mod exams;
pub mod lessons;
pub mod system;
pub mod users;
pub mod wallet;

pub use auth::AuthService;
pub use courses::CourseService;
pub use enrollments::EnrollmentService;
pub use exams::ExamService;
pub use lessons::LessonService;
pub use system::SystemService;
pub use users::UserService;
pub use wallet::WalletService;

use actix_web::HttpResponse;
use tracing::error;

use crate::errors::AcademyError;
use crate::middlewares::RequireJWT;
use crate::models::{ApiResponse, ErrorCode, users::entities::User};

/// 取出 RequireJWT 放入请求扩展的当前用户
pub(crate) fn current_user(request: &actix_web::HttpRequest) -> Result<User, HttpResponse> {
    RequireJWT::extract_user_claims(request).ok_or_else(|| {
        HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "Unauthorized access, please login",
        ))
    })
}

/// 将存储层错误转换为统一响应
///
/// 内部错误只记录日志，不把细节返回给客户端。
pub(crate) fn error_response(err: AcademyError, fallback: ErrorCode) -> HttpResponse {
    match err {
        AcademyError::Validation(msg) => {
            HttpResponse::BadRequest().json(ApiResponse::error_empty(fallback, msg))
        }
        AcademyError::NotFound(msg) => {
            HttpResponse::NotFound().json(ApiResponse::error_empty(ErrorCode::NotFound, msg))
        }
        AcademyError::Conflict(msg) => {
            HttpResponse::Conflict().json(ApiResponse::error_empty(fallback, msg))
        }
        AcademyError::InsufficientBalance(msg) => HttpResponse::PaymentRequired()
            .json(ApiResponse::error_empty(ErrorCode::InsufficientBalance, msg)),
        AcademyError::BalanceChanged(msg) => {
            HttpResponse::Conflict().json(ApiResponse::error_empty(ErrorCode::WalletBusy, msg))
        }
        AcademyError::CapacityReached(msg) => {
            HttpResponse::Conflict().json(ApiResponse::error_empty(ErrorCode::CourseFull, msg))
        }
        AcademyError::Authentication(msg) => {
            HttpResponse::Unauthorized().json(ApiResponse::error_empty(ErrorCode::Unauthorized, msg))
        }
        AcademyError::Authorization(msg) => {
            HttpResponse::Forbidden().json(ApiResponse::error_empty(ErrorCode::Forbidden, msg))
        }
        other => {
            error!("{}", other.format_simple());
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                "Internal server error",
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;

    #[test]
    fn test_error_status_mapping() {
        let cases = [
            (AcademyError::validation("x"), StatusCode::BAD_REQUEST),
            (AcademyError::not_found("x"), StatusCode::NOT_FOUND),
            (AcademyError::conflict("x"), StatusCode::CONFLICT),
            (AcademyError::capacity_reached("x"), StatusCode::CONFLICT),
            (AcademyError::insufficient_balance("x"), StatusCode::PAYMENT_REQUIRED),
            (AcademyError::authorization("x"), StatusCode::FORBIDDEN),
            (AcademyError::database_operation("x"), StatusCode::INTERNAL_SERVER_ERROR),
            (AcademyError::password_hash("x"), StatusCode::INTERNAL_SERVER_ERROR),
            (AcademyError::balance_changed("x"), StatusCode::CONFLICT),
        ];
        for (err, status) in cases {
            assert_eq!(error_response(err, ErrorCode::BadRequest).status(), status);
        }
    }

    async fn body_json(response: HttpResponse) -> serde_json::Value {
        let bytes = actix_web::body::to_bytes(response.into_body())
            .await
            .unwrap_or_default();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[actix_web::test]
    async fn test_internal_errors_hide_details() {
        let response = error_response(
            AcademyError::password_hash("Argon2 参数错误: memory cost is too small"),
            ErrorCode::UserUpdateFailed,
        );
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert_eq!(body["code"], ErrorCode::InternalServerError as i32);
        assert_eq!(body["message"], "Internal server error");
    }

    #[actix_web::test]
    async fn test_wallet_race_has_its_own_code() {
        let response = error_response(
            AcademyError::balance_changed("Wallet balance changed during enrollment, please retry"),
            ErrorCode::AlreadyEnrolled,
        );
        assert_eq!(response.status(), StatusCode::CONFLICT);
        let body = body_json(response).await;
        assert_eq!(body["code"], ErrorCode::WalletBusy as i32);
    }
}
