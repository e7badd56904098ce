use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::UserService;
use crate::models::users::{entities::UserRole, requests::UpdateUserRequest, responses::UserResponse};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::error_response;

/// 审核教师（幂等）
pub async fn approve_teacher(
    service: &UserService,
    user_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let user = match storage.get_user_by_id(user_id).await {
        Ok(Some(user)) if user.role == UserRole::Teacher => user,
        Ok(_) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::UserNotFound,
                "Teacher not found",
            )));
        }
        Err(e) => return Ok(error_response(e, ErrorCode::UserUpdateFailed)),
    };

    if user.approved {
        return Ok(HttpResponse::Ok().json(ApiResponse::success(
            UserResponse { user },
            "Teacher already approved",
        )));
    }

    let update = UpdateUserRequest {
        approved: Some(true),
        ..Default::default()
    };

    match storage.update_user(user_id, update).await {
        Ok(Some(user)) => {
            info!("Teacher {} ({}) approved", user.username, user.id);
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                UserResponse { user },
                "Teacher approved",
            )))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::UserNotFound,
            "Teacher not found",
        ))),
        Err(e) => Ok(error_response(e, ErrorCode::UserUpdateFailed)),
    }
}
