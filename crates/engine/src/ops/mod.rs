use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::{EngineError, OsRandomIds, ResultEngine, WalletIdSource};

mod queries;
mod transfer;
mod wallets;

/// Run a block inside a DB transaction, committing on success and rolling back on error.
///
/// Rollback happens when the `DatabaseTransaction` is dropped, which also
/// covers a caller abandoning the future half way.
macro_rules! with_tx {
    ($self:expr, |$tx:ident| $body:expr) => {{
        let $tx = $self.database.begin().await?;
        let result = $body;
        match result {
            Ok(value) => {
                $tx.commit().await?;
                Ok(value)
            }
            Err(err) => Err(err),
        }
    }};
}

pub(crate) use with_tx;

/// Entry point of the ledger: wallet creation, transfers and queries.
///
/// The engine owns no balance state; it holds the store handle it was built
/// with and every operation reads from and writes to it.
#[derive(Debug)]
pub struct Engine {
    database: DatabaseConnection,
    ids: Arc<dyn WalletIdSource>,
}

impl Engine {
    /// Return a builder for `Engine`. Help to build the struct.
    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }
}

fn normalize_wallet_id(value: &str, label: &str) -> ResultEngine<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(EngineError::InvalidId(format!(
            "{label} wallet id must not be empty"
        )));
    }
    Ok(trimmed.to_string())
}

/// The builder for `Engine`
#[derive(Default)]
pub struct EngineBuilder {
    database: DatabaseConnection,
    ids: Option<Arc<dyn WalletIdSource>>,
}

impl EngineBuilder {
    /// Pass the required database
    pub fn database(mut self, db: DatabaseConnection) -> EngineBuilder {
        self.database = db;
        self
    }

    /// Replace the wallet id source (defaults to [`OsRandomIds`]).
    pub fn id_source(mut self, ids: impl WalletIdSource + 'static) -> EngineBuilder {
        self.ids = Some(Arc::new(ids));
        self
    }

    /// Construct `Engine`
    pub async fn build(self) -> ResultEngine<Engine> {
        Ok(Engine {
            database: self.database,
            ids: self.ids.unwrap_or_else(|| Arc::new(OsRandomIds)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wallet_ids_are_trimmed() {
        assert_eq!(normalize_wallet_id("  abc ", "sender").unwrap(), "abc");
    }

    #[test]
    fn blank_wallet_ids_are_rejected() {
        assert_eq!(
            normalize_wallet_id("   ", "receiver"),
            Err(EngineError::InvalidId(
                "receiver wallet id must not be empty".to_string()
            ))
        );
    }
}
