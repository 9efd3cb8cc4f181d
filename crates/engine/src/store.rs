//! Ledger store: durable access to wallets and transfer history.
//!
//! Every function is generic over [`ConnectionTrait`], so the same code runs
//! on the pooled connection for plain reads and on a [`DatabaseTransaction`]
//! when several steps must commit together. Nothing is cached; each call hits
//! the database.
//!
//! [`DatabaseTransaction`]: sea_orm::DatabaseTransaction

use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, DbBackend, EntityTrait,
    QueryFilter, QueryOrder, QuerySelect, SqlErr, sea_query::Expr,
};

use crate::{
    EngineError, MoneyCents, NewTransaction, ResultEngine, Transaction, Wallet, transactions,
    wallets,
};

/// Insert a new wallet.
///
/// Fails with [`EngineError::DuplicateId`] if a wallet with the same id
/// already exists.
pub async fn create_wallet<C: ConnectionTrait>(
    conn: &C,
    id: &str,
    initial_balance: MoneyCents,
) -> ResultEngine<Wallet> {
    if initial_balance.is_negative() {
        return Err(EngineError::InvalidAmount(
            "initial balance must be >= 0".to_string(),
        ));
    }

    let exists = wallets::Entity::find_by_id(id.to_string())
        .one(conn)
        .await?
        .is_some();
    if exists {
        return Err(EngineError::DuplicateId(id.to_string()));
    }

    let wallet = Wallet::new(id.to_string(), initial_balance);
    wallets::ActiveModel::from(&wallet)
        .insert(conn)
        .await
        .map_err(|err| match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => {
                EngineError::DuplicateId(id.to_string())
            }
            _ => EngineError::from(err),
        })?;
    Ok(wallet)
}

/// Load a wallet.
pub async fn wallet<C: ConnectionTrait>(conn: &C, id: &str) -> ResultEngine<Wallet> {
    wallets::Entity::find_by_id(id.to_string())
        .one(conn)
        .await?
        .map(Wallet::from)
        .ok_or_else(|| EngineError::WalletNotFound(id.to_string()))
}

/// Current balance of a wallet.
pub async fn balance<C: ConnectionTrait>(conn: &C, id: &str) -> ResultEngine<MoneyCents> {
    Ok(wallet(conn, id).await?.balance)
}

/// Overwrite the balance of a wallet.
pub async fn set_balance<C: ConnectionTrait>(
    conn: &C,
    id: &str,
    amount: MoneyCents,
) -> ResultEngine<()> {
    if amount.is_negative() {
        return Err(EngineError::InvalidAmount(format!(
            "balance of {id} would become {amount}"
        )));
    }

    let result = wallets::Entity::update_many()
        .col_expr(wallets::Column::Balance, Expr::value(amount.cents()))
        .filter(wallets::Column::Id.eq(id))
        .exec(conn)
        .await?;
    if result.rows_affected == 0 {
        return Err(EngineError::WalletNotFound(id.to_string()));
    }
    Ok(())
}

/// Load the given wallets for update.
///
/// Rows are visited in lexical id order so that two transfers touching the
/// same pair of wallets always lock them in the same sequence. On PostgreSQL
/// each row is selected `FOR UPDATE`. SQLite has no row locks, so a no-op
/// update claims its database write lock before anything is read; a
/// transaction that read first could otherwise fail with `SQLITE_BUSY` when
/// it later tries to write.
///
/// The returned wallets follow that lexical order, duplicates removed.
pub async fn lock_wallets<C: ConnectionTrait>(conn: &C, ids: &[&str]) -> ResultEngine<Vec<Wallet>> {
    let mut ordered = ids.to_vec();
    ordered.sort_unstable();
    ordered.dedup();

    let backend = conn.get_database_backend();
    if backend == DbBackend::Sqlite {
        wallets::Entity::update_many()
            .col_expr(
                wallets::Column::Balance,
                Expr::col(wallets::Column::Balance).into(),
            )
            .filter(wallets::Column::Id.is_in(ordered.iter().copied()))
            .exec(conn)
            .await?;
    }
    let row_locks = backend == DbBackend::Postgres;
    let mut locked = Vec::with_capacity(ordered.len());
    for id in ordered {
        let mut query = wallets::Entity::find_by_id(id.to_string());
        if row_locks {
            query = query.lock_exclusive();
        }
        let model = query
            .one(conn)
            .await?
            .ok_or_else(|| EngineError::WalletNotFound(id.to_string()))?;
        locked.push(Wallet::from(model));
    }
    Ok(locked)
}

/// Append one record to the history and return it with its assigned id.
pub async fn append_history<C: ConnectionTrait>(
    conn: &C,
    record: &NewTransaction,
) -> ResultEngine<Transaction> {
    let model = transactions::ActiveModel::from(record).insert(conn).await?;
    Ok(Transaction::from(model))
}

/// All records where `wallet_id` is sender or receiver, oldest first.
///
/// Records sharing a timestamp are ordered by their serial id, so repeated
/// calls always return the same sequence.
pub async fn history<C: ConnectionTrait>(
    conn: &C,
    wallet_id: &str,
) -> ResultEngine<Vec<Transaction>> {
    let models = transactions::Entity::find()
        .filter(
            Condition::any()
                .add(transactions::Column::FromWalletId.eq(wallet_id))
                .add(transactions::Column::ToWalletId.eq(wallet_id)),
        )
        .order_by_asc(transactions::Column::Time)
        .order_by_asc(transactions::Column::Id)
        .all(conn)
        .await?;

    Ok(models.into_iter().map(Transaction::from).collect())
}
