//! 钱包流水实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "wallet_transactions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub user_id: i64,
    pub kind: String,
    pub amount: i64,
    pub balance_after: i64,
    #[sea_orm(unique)]
    pub reference: String,
    pub course_id: Option<i64>,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id"
    )]
    User,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_transaction(self) -> crate::models::wallet::entities::WalletTransaction {
        use crate::models::wallet::entities::{TransactionKind, WalletTransaction};

        WalletTransaction {
            id: self.id,
            user_id: self.user_id,
            kind: self
                .kind
                .parse::<TransactionKind>()
                .unwrap_or(TransactionKind::Deposit),
            amount: self.amount,
            balance_after: self.balance_after,
            reference: self.reference,
            course_id: self.course_id,
            created_at: super::to_datetime(self.created_at),
        }
    }
}
