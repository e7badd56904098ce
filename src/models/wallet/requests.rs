use crate::models::common::PaginationQuery;
use serde::Deserialize;
use ts_rs::TS;

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../clients/types/wallet.ts")]
pub struct DepositRequest {
    pub amount: i64,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../clients/types/wallet.ts")]
pub struct TransactionListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
}

impl DepositRequest {
    pub fn validate(&self, max_deposit: i64) -> Result<(), String> {
        if self.amount <= 0 {
            return Err("Deposit amount must be positive".to_string());
        }
        if self.amount > max_deposit {
            return Err(format!("Deposit amount must not exceed {max_deposit}"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deposit_bounds() {
        assert!(DepositRequest { amount: 0 }.validate(100).is_err());
        assert!(DepositRequest { amount: -3 }.validate(100).is_err());
        assert!(DepositRequest { amount: 101 }.validate(100).is_err());
        assert!(DepositRequest { amount: 100 }.validate(100).is_ok());
    }
}
