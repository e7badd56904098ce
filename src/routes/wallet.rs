use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::wallet::requests::{DepositRequest, TransactionListParams};
use crate::services::WalletService;

// 懒加载的全局 WalletService 实例
static WALLET_SERVICE: Lazy<WalletService> = Lazy::new(WalletService::new_lazy);

pub async fn get_balance(req: HttpRequest) -> ActixResult<HttpResponse> {
    WALLET_SERVICE.get_balance(&req).await
}

pub async fn deposit(
    req: HttpRequest,
    deposit_data: web::Json<DepositRequest>,
) -> ActixResult<HttpResponse> {
    WALLET_SERVICE.deposit(deposit_data.into_inner(), &req).await
}

pub async fn list_transactions(
    req: HttpRequest,
    query: web::Query<TransactionListParams>,
) -> ActixResult<HttpResponse> {
    WALLET_SERVICE
        .list_transactions(query.into_inner(), &req)
        .await
}

// 配置路由
pub fn configure_wallet_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/wallet")
            .wrap(middlewares::RequireJWT)
            .route("", web::get().to(get_balance))
            .route("/deposit", web::post().to(deposit))
            .route("/transactions", web::get().to(list_transactions)),
    );
}
