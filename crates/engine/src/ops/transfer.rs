use chrono::Utc;
use sea_orm::{DatabaseTransaction, TransactionTrait};

use crate::{
    EngineError, MoneyCents, NewTransaction, ResultEngine, Transaction, TransferCmd, Wallet, store,
};

use super::{Engine, normalize_wallet_id, with_tx};

impl Engine {
    /// Move money between two wallets.
    ///
    /// Locking both wallets, the balance check, both balance writes and the
    /// history append share one DB transaction: concurrent transfers on the
    /// same wallets never interleave, and a failure at any step (or a dropped
    /// future) leaves no partial state behind.
    ///
    /// Errors:
    /// - `InvalidId` if a wallet id is blank.
    /// - `InvalidAmount` if `amount <= 0`, if sender and receiver are the same
    ///   wallet, or if the receiver balance would overflow.
    /// - `WalletNotFound` if either wallet does not exist.
    /// - `InsufficientFunds` if the sender balance is lower than `amount`.
    pub async fn transfer(&self, cmd: TransferCmd) -> ResultEngine<Transaction> {
        let result = self.try_transfer(&cmd).await;
        match &result {
            Ok(tx) => tracing::info!(
                from = %tx.from,
                to = %tx.to,
                amount = %tx.amount,
                "transfer committed"
            ),
            Err(err) if err.is_client_error() => {
                tracing::debug!(from = %cmd.from, to = %cmd.to, "transfer rejected: {err}")
            }
            Err(err) => {
                tracing::error!(from = %cmd.from, to = %cmd.to, "transfer failed: {err}")
            }
        }
        result
    }

    async fn try_transfer(&self, cmd: &TransferCmd) -> ResultEngine<Transaction> {
        let from = normalize_wallet_id(&cmd.from, "sender")?;
        let to = normalize_wallet_id(&cmd.to, "receiver")?;
        if !cmd.amount.is_positive() {
            return Err(EngineError::InvalidAmount(
                "amount must be > 0".to_string(),
            ));
        }
        if from == to {
            return Err(EngineError::InvalidAmount(
                "sender and receiver must differ".to_string(),
            ));
        }

        with_tx!(self, |db_tx| {
            self.apply_transfer(&db_tx, &from, &to, cmd.amount).await
        })
    }

    async fn apply_transfer(
        &self,
        db_tx: &DatabaseTransaction,
        from: &str,
        to: &str,
        amount: MoneyCents,
    ) -> ResultEngine<Transaction> {
        let locked = store::lock_wallets(db_tx, &[from, to]).await?;
        let sender = find_locked(&locked, from)?;
        let receiver = find_locked(&locked, to)?;

        if sender.balance < amount {
            return Err(EngineError::InsufficientFunds(format!(
                "wallet {from} holds {}, requested {amount}",
                sender.balance
            )));
        }
        let sender_balance = sender
            .balance
            .checked_sub(amount)
            .ok_or_else(|| EngineError::InvalidAmount("sender balance overflow".to_string()))?;
        let receiver_balance = receiver
            .balance
            .checked_add(amount)
            .ok_or_else(|| EngineError::InvalidAmount("receiver balance overflow".to_string()))?;

        store::set_balance(db_tx, from, sender_balance).await?;
        store::set_balance(db_tx, to, receiver_balance).await?;

        let record = NewTransaction::new(from, to, amount, Utc::now())?;
        store::append_history(db_tx, &record).await
    }
}

fn find_locked<'a>(locked: &'a [Wallet], id: &str) -> ResultEngine<&'a Wallet> {
    locked
        .iter()
        .find(|wallet| wallet.id == id)
        .ok_or_else(|| EngineError::WalletNotFound(id.to_string()))
}
