use sea_orm::TransactionTrait;

use crate::{ResultEngine, STARTING_BALANCE, Wallet, store};

use super::{Engine, with_tx};

impl Engine {
    /// Create a new wallet with a fresh random id and the starting balance
    /// of 100.00.
    ///
    /// A collision with an existing id fails with `DuplicateId`; the engine
    /// does not generate a second id.
    pub async fn create_wallet(&self) -> ResultEngine<Wallet> {
        let id = self.ids.next_id().inspect_err(|err| {
            tracing::error!("wallet id generation failed: {err}");
        })?;

        let wallet = with_tx!(self, |db_tx| {
            store::create_wallet(&db_tx, &id, STARTING_BALANCE).await
        })?;

        tracing::info!(wallet_id = %wallet.id, balance = %wallet.balance, "wallet created");
        Ok(wallet)
    }
}
