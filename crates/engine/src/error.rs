//! The module contains the error the engine can throw.
//!
//! Validation errors are caused by the caller and are safe to report back:
//!
//! - [`InvalidAmount`] thrown when an amount is zero, negative, malformed or
//!   would overflow a balance.
//! - [`InvalidId`] thrown when a wallet id is blank.
//! - [`WalletNotFound`] thrown when a wallet id does not resolve.
//! - [`InsufficientFunds`] thrown when a debit would make a balance negative.
//!
//! Store errors are server-side failures:
//!
//! - [`DuplicateId`] thrown when a freshly generated id already exists.
//! - [`IdGeneration`] thrown when the randomness source fails.
//! - [`Database`] wraps any [`DbErr`] raised by the ledger store.
//!
//!  [`InvalidAmount`]: EngineError::InvalidAmount
//!  [`InvalidId`]: EngineError::InvalidId
//!  [`WalletNotFound`]: EngineError::WalletNotFound
//!  [`InsufficientFunds`]: EngineError::InsufficientFunds
//!  [`DuplicateId`]: EngineError::DuplicateId
//!  [`IdGeneration`]: EngineError::IdGeneration
//!  [`Database`]: EngineError::Database
use sea_orm::DbErr;
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Invalid wallet id: {0}")]
    InvalidId(String),
    #[error("\"{0}\" wallet not found!")]
    WalletNotFound(String),
    #[error("\"{0}\" already present!")]
    DuplicateId(String),
    #[error("Insufficient funds: {0}")]
    InsufficientFunds(String),
    #[error("Unable to generate wallet id: {0}")]
    IdGeneration(String),
    #[error(transparent)]
    Database(#[from] DbErr),
}

impl EngineError {
    /// Returns `true` for errors caused by the request itself (bad input or
    /// state that forbids it), as opposed to failures of the store.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidAmount(_)
                | Self::InvalidId(_)
                | Self::WalletNotFound(_)
                | Self::InsufficientFunds(_)
        )
    }
}

impl PartialEq for EngineError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::InvalidAmount(a), Self::InvalidAmount(b)) => a == b,
            (Self::InvalidId(a), Self::InvalidId(b)) => a == b,
            (Self::WalletNotFound(a), Self::WalletNotFound(b)) => a == b,
            (Self::DuplicateId(a), Self::DuplicateId(b)) => a == b,
            (Self::InsufficientFunds(a), Self::InsufficientFunds(b)) => a == b,
            (Self::IdGeneration(a), Self::IdGeneration(b)) => a == b,
            (Self::Database(a), Self::Database(b)) => a.to_string() == b.to_string(),
            _ => false,
        }
    }
}
