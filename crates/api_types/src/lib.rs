//! Request and response bodies of the HTTP API.
//!
//! Amounts are plain decimal numbers in currency units (`30.5` means 30.50).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub mod wallet {
    use super::*;

    /// Body of `POST /api/v1/wallet` (201) and `GET /api/v1/wallet/{id}`.
    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct WalletView {
        pub id: String,
        pub balance: f64,
    }
}

pub mod transaction {
    use super::*;

    /// Body of `POST /api/v1/wallet/{id}/send`.
    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct SendMoney {
        /// Receiver wallet id.
        pub to: String,
        pub amount: f64,
    }

    /// One history record, as listed by `GET /api/v1/wallet/{id}/history`
    /// and returned by a successful send.
    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct TransactionView {
        pub time: DateTime<Utc>,
        pub from: String,
        pub to: String,
        pub amount: f64,
    }
}

/// Error body returned with every non-2xx status.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Body of `GET /health`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Health {
    pub status: String,
}
