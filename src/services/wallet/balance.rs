use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::WalletService;
use crate::models::wallet::responses::BalanceResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{current_user, error_response};

pub async fn get_balance(
    service: &WalletService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let user = match current_user(request) {
        Ok(user) => user,
        Err(response) => return Ok(response),
    };

    match storage.get_wallet_balance(user.id).await {
        Ok(Some(balance)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            BalanceResponse { balance },
            "Wallet balance retrieved successfully",
        ))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::UserNotFound,
            "User not found",
        ))),
        Err(e) => Ok(error_response(e, ErrorCode::InternalServerError)),
    }
}
