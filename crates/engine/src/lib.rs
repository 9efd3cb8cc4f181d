//! Wallet ledger engine.
//!
//! The engine creates wallets, moves money between them and answers balance
//! and history queries. All state lives in the relational store behind the
//! [`DatabaseConnection`](sea_orm::DatabaseConnection) passed to
//! [`EngineBuilder::database`]; the [`store`] module holds the queries.

pub use commands::TransferCmd;
pub use error::EngineError;
pub use ids::{OsRandomIds, WALLET_ID_BYTES, WalletIdSource};
pub use money::MoneyCents;
pub use ops::{Engine, EngineBuilder};
pub use transactions::{NewTransaction, Transaction};
pub use wallets::{STARTING_BALANCE, Wallet};

mod commands;
mod error;
mod ids;
mod money;
mod ops;
pub mod store;
mod transactions;
mod wallets;

type ResultEngine<T> = Result<T, EngineError>;
