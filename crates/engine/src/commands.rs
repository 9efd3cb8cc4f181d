//! Command structs for engine write operations.

use crate::MoneyCents;

/// Move `amount` from wallet `from` to wallet `to`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransferCmd {
    pub from: String,
    pub to: String,
    pub amount: MoneyCents,
}

impl TransferCmd {
    #[must_use]
    pub fn new(from: impl Into<String>, to: impl Into<String>, amount: MoneyCents) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            amount,
        }
    }
}
