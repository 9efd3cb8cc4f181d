use sea_orm::TransactionTrait;

use crate::{MoneyCents, ResultEngine, Transaction, Wallet, store};

use super::{Engine, normalize_wallet_id, with_tx};

impl Engine {
    /// Return a wallet snapshot from DB.
    pub async fn wallet(&self, wallet_id: &str) -> ResultEngine<Wallet> {
        let wallet_id = normalize_wallet_id(wallet_id, "requested")?;
        store::wallet(&self.database, &wallet_id).await
    }

    /// Current balance of a wallet.
    pub async fn balance(&self, wallet_id: &str) -> ResultEngine<MoneyCents> {
        Ok(self.wallet(wallet_id).await?.balance)
    }

    /// Transfers sent or received by a wallet, oldest first.
    ///
    /// An existing wallet without transfers yields an empty list; an unknown
    /// wallet fails with `WalletNotFound`.
    pub async fn history(&self, wallet_id: &str) -> ResultEngine<Vec<Transaction>> {
        let wallet_id = normalize_wallet_id(wallet_id, "requested")?;
        with_tx!(self, |db_tx| {
            store::wallet(&db_tx, &wallet_id).await?;
            store::history(&db_tx, &wallet_id).await
        })
    }
}
