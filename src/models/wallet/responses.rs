use super::entities::WalletTransaction;
use crate::models::common::PaginationInfo;
use serde::Serialize;
use ts_rs::TS;

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../clients/types/wallet.ts")]
pub struct BalanceResponse {
    pub balance: i64,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../clients/types/wallet.ts")]
pub struct DepositResponse {
    pub balance: i64,
    pub transaction: WalletTransaction,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../clients/types/wallet.ts")]
pub struct TransactionListResponse {
    pub items: Vec<WalletTransaction>,
    pub pagination: PaginationInfo,
}
