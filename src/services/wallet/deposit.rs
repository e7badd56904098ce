use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::WalletService;
use crate::config::AppConfig;
use crate::models::wallet::requests::DepositRequest;
use crate::models::wallet::responses::DepositResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{current_user, error_response};

/// 充值：余额变更与流水写入在同一事务中完成
pub async fn deposit(
    service: &WalletService,
    deposit_data: DepositRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let user = match current_user(request) {
        Ok(user) => user,
        Err(response) => return Ok(response),
    };

    let max_deposit = AppConfig::get().wallet.max_deposit;
    if let Err(msg) = deposit_data.validate(max_deposit) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::WalletAmountInvalid, msg)));
    }

    match storage.deposit(user.id, deposit_data.amount).await {
        Ok((balance, transaction)) => {
            info!(
                "User {} deposited {} (reference {})",
                user.id, transaction.amount, transaction.reference
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                DepositResponse {
                    balance,
                    transaction,
                },
                "Deposit successful",
            )))
        }
        Err(e) => Ok(error_response(e, ErrorCode::DepositFailed)),
    }
}
