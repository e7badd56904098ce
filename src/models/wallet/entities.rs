use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 流水类型
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../clients/types/wallet.ts")]
pub enum TransactionKind {
    Deposit,
    Purchase,
}

impl std::fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransactionKind::Deposit => write!(f, "deposit"),
            TransactionKind::Purchase => write!(f, "purchase"),
        }
    }
}

impl std::str::FromStr for TransactionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "deposit" => Ok(TransactionKind::Deposit),
            "purchase" => Ok(TransactionKind::Purchase),
            _ => Err(format!("Invalid transaction kind: {s}")),
        }
    }
}

// 钱包流水（只追加）
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../clients/types/wallet.ts")]
pub struct WalletTransaction {
    pub id: i64,
    pub user_id: i64,
    pub kind: TransactionKind,
    /// 充值为正，消费为负
    pub amount: i64,
    pub balance_after: i64,
    pub reference: String,
    pub course_id: Option<i64>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}
