use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::middlewares::RequireJWT;
use crate::models::auth::requests::UpdateProfileRequest;
use crate::models::users::requests::UpdateUserRequest;
use crate::models::users::responses::UserResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::error_response;
use crate::utils::password::hash_password;
use crate::utils::validate::{validate_email, validate_password};

use super::AuthService;

pub async fn handle_update_profile(
    service: &AuthService,
    update_data: UpdateProfileRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    // 获取当前用户信息
    let current_user = match RequireJWT::extract_user_claims(request) {
        Some(user) => user,
        None => {
            return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
                ErrorCode::Unauthorized,
                "Unauthorized access, please login",
            )));
        }
    };

    // 验证邮箱格式与唯一性（如果提供了新邮箱）
    let email = update_data
        .email
        .map(|e| e.trim().to_string())
        .filter(|e| !e.is_empty());
    if let Some(ref email) = email {
        if let Err(msg) = validate_email(email) {
            return Ok(HttpResponse::BadRequest()
                .json(ApiResponse::error_empty(ErrorCode::UserEmailInvalid, msg)));
        }

        match storage.get_user_by_email(email).await {
            Ok(Some(existing_user)) if existing_user.id != current_user.id => {
                return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                    ErrorCode::UserEmailAlreadyExists,
                    "Email already exists",
                )));
            }
            Ok(_) => {}
            Err(e) => return Ok(error_response(e, ErrorCode::UserUpdateFailed)),
        }
    }

    // 处理密码（如果提供了新密码）
    let hashed_password = match update_data.password {
        Some(ref password) => {
            if let Err(msg) = validate_password(password) {
                return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                    ErrorCode::UserPasswordInvalid,
                    msg,
                )));
            }

            match hash_password(password) {
                Ok(hash) => Some(hash),
                Err(e) => return Ok(error_response(e, ErrorCode::UserUpdateFailed)),
            }
        }
        None => None,
    };

    // 普通用户无权修改角色、审核状态和余额
    let storage_update = UpdateUserRequest {
        email,
        password: hashed_password,
        approved: None,
        full_name: update_data.full_name,
        level: update_data.level,
        specialty: update_data.specialty,
    };

    match storage.update_user(current_user.id, storage_update).await {
        Ok(Some(user)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            UserResponse { user },
            "Profile updated successfully",
        ))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::UserNotFound,
            "User not found",
        ))),
        Err(e) if e.is_conflict() => Ok(HttpResponse::BadRequest().json(
            ApiResponse::error_empty(ErrorCode::UserEmailAlreadyExists, "Email already exists"),
        )),
        Err(e) => Ok(error_response(e, ErrorCode::UserUpdateFailed)),
    }
}
