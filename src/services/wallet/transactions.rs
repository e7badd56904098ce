use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::WalletService;
use crate::models::wallet::requests::TransactionListParams;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{current_user, error_response};

pub async fn list_transactions(
    service: &WalletService,
    query: TransactionListParams,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let user = match current_user(request) {
        Ok(user) => user,
        Err(response) => return Ok(response),
    };

    match storage
        .list_wallet_transactions_with_pagination(
            user.id,
            Some(query.pagination.page),
            Some(query.pagination.size),
        )
        .await
    {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Wallet transactions retrieved successfully",
        ))),
        Err(e) => Ok(error_response(e, ErrorCode::InternalServerError)),
    }
}
