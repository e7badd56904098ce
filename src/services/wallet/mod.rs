pub mod balance;
pub mod deposit;
pub mod transactions;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::wallet::requests::{DepositRequest, TransactionListParams};
use crate::storage::Storage;

pub struct WalletService {
    storage: Option<Arc<dyn Storage>>,
}

impl WalletService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    // 查询余额
    pub async fn get_balance(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        balance::get_balance(self, request).await
    }

    // 充值
    pub async fn deposit(
        &self,
        deposit_data: DepositRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        deposit::deposit(self, deposit_data, request).await
    }

    // 钱包流水
    pub async fn list_transactions(
        &self,
        query: TransactionListParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        transactions::list_transactions(self, query, request).await
    }
}
