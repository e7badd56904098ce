use super::{SeaOrmStorage, write_err};
use crate::entity::users;
use crate::entity::wallet_transactions::{ActiveModel, Column, Entity as WalletTransactions};
use crate::errors::{AcademyError, Result};
use crate::models::{
    PaginationInfo,
    common::pagination::normalize,
    wallet::{
        entities::{TransactionKind, WalletTransaction},
        responses::TransactionListResponse,
    },
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait, sea_query::Expr,
};

impl SeaOrmStorage {
    /// 查询余额
    pub async fn get_wallet_balance_impl(&self, user_id: i64) -> Result<Option<i64>> {
        let user = users::Entity::find_by_id(user_id)
            .one(&self.db)
            .await
            .map_err(|e| AcademyError::database_operation(format!("查询余额失败: {e}")))?;

        Ok(user.map(|u| u.wallet_balance))
    }

    /// 充值：余额增加与流水写入在同一事务中
    pub async fn deposit_impl(&self, user_id: i64, amount: i64) -> Result<(i64, WalletTransaction)> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| AcademyError::database_operation(format!("开启事务失败: {e}")))?;

        let user = users::Entity::find_by_id(user_id)
            .one(&txn)
            .await
            .map_err(|e| AcademyError::database_operation(format!("查询用户失败: {e}")))?
            .ok_or_else(|| AcademyError::not_found(format!("User {user_id} not found")))?;

        let balance_after = user
            .wallet_balance
            .checked_add(amount)
            .ok_or_else(|| AcademyError::validation("Wallet balance overflow"))?;

        let result = users::Entity::update_many()
            .col_expr(users::Column::WalletBalance, Expr::value(balance_after))
            .col_expr(
                users::Column::UpdatedAt,
                Expr::value(chrono::Utc::now().timestamp()),
            )
            .filter(users::Column::Id.eq(user_id))
            .filter(users::Column::WalletBalance.eq(user.wallet_balance))
            .exec(&txn)
            .await
            .map_err(|e| AcademyError::database_operation(format!("更新余额失败: {e}")))?;
        if result.rows_affected == 0 {
            return Err(AcademyError::balance_changed(
                "Wallet balance changed during deposit, please retry",
            ));
        }

        let transaction = append_ledger(
            &txn,
            user_id,
            TransactionKind::Deposit,
            amount,
            balance_after,
            None,
        )
        .await?;

        txn.commit()
            .await
            .map_err(|e| AcademyError::database_operation(format!("提交事务失败: {e}")))?;

        Ok((balance_after, transaction))
    }

    /// 分页列出流水，新的在前
    pub async fn list_wallet_transactions_with_pagination_impl(
        &self,
        user_id: i64,
        page: Option<i64>,
        size: Option<i64>,
    ) -> Result<TransactionListResponse> {
        let (page, size) = normalize(page, size);

        let paginator = WalletTransactions::find()
            .filter(Column::UserId.eq(user_id))
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
            .paginate(&self.db, size);

        let total = paginator
            .num_items()
            .await
            .map_err(|e| AcademyError::database_operation(format!("查询流水总数失败: {e}")))?;

        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| AcademyError::database_operation(format!("查询流水页数失败: {e}")))?;

        let rows = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| AcademyError::database_operation(format!("查询流水列表失败: {e}")))?;

        Ok(TransactionListResponse {
            items: rows.into_iter().map(|m| m.into_transaction()).collect(),
            pagination: PaginationInfo::new(page, size, total, pages),
        })
    }
}

/// 追加一条流水，调用方负责事务
pub(super) async fn append_ledger<C: ConnectionTrait>(
    conn: &C,
    user_id: i64,
    kind: TransactionKind,
    amount: i64,
    balance_after: i64,
    course_id: Option<i64>,
) -> Result<WalletTransaction> {
    let model = ActiveModel {
        user_id: Set(user_id),
        kind: Set(kind.to_string()),
        amount: Set(amount),
        balance_after: Set(balance_after),
        reference: Set(uuid::Uuid::new_v4().to_string()),
        course_id: Set(course_id),
        created_at: Set(chrono::Utc::now().timestamp()),
        ..Default::default()
    };

    let row = model.insert(conn).await.map_err(write_err("写入流水失败"))?;

    Ok(row.into_transaction())
}
