//! Wallet identifier generation.

use std::fmt;

use rand::{RngCore, rngs::OsRng};

use crate::{EngineError, ResultEngine};

/// Number of random bytes in a wallet id (128 bits, 32 hex characters).
pub const WALLET_ID_BYTES: usize = 16;

/// Source of fresh wallet identifiers.
///
/// The engine asks the source for exactly one id per created wallet and never
/// retries: a collision surfaces as [`EngineError::DuplicateId`].
pub trait WalletIdSource: Send + Sync + fmt::Debug {
    fn next_id(&self) -> ResultEngine<String>;
}

/// Default source: 16 bytes from the operating system CSPRNG, hex encoded.
#[derive(Clone, Copy, Debug, Default)]
pub struct OsRandomIds;

impl WalletIdSource for OsRandomIds {
    fn next_id(&self) -> ResultEngine<String> {
        let mut bytes = [0u8; WALLET_ID_BYTES];
        OsRng
            .try_fill_bytes(&mut bytes)
            .map_err(|err| EngineError::IdGeneration(err.to_string()))?;
        Ok(hex::encode(bytes))
    }
}
