//! Transaction history primitives.
//!
//! A `Transaction` is the immutable record of one completed transfer. Records
//! are appended as the last step of a transfer and never updated or deleted.

use chrono::{DateTime, Utc};
use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};

use crate::{EngineError, MoneyCents, ResultEngine};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Store-assigned serial id, used to break ties between equal timestamps.
    pub id: i64,
    pub time: DateTime<Utc>,
    pub from: String,
    pub to: String,
    pub amount: MoneyCents,
}

/// A history record that has not been stored yet.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewTransaction {
    pub time: DateTime<Utc>,
    pub from: String,
    pub to: String,
    pub amount: MoneyCents,
}

impl NewTransaction {
    pub fn new(
        from: impl Into<String>,
        to: impl Into<String>,
        amount: MoneyCents,
        time: DateTime<Utc>,
    ) -> ResultEngine<Self> {
        if !amount.is_positive() {
            return Err(EngineError::InvalidAmount(
                "amount must be > 0".to_string(),
            ));
        }
        Ok(Self {
            time,
            from: from.into(),
            to: to.into(),
            amount,
        })
    }
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "history")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub time: DateTimeUtc,
    pub from_wallet_id: String,
    pub to_wallet_id: String,
    /// Amount in cents.
    pub amount: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<&NewTransaction> for ActiveModel {
    fn from(tx: &NewTransaction) -> Self {
        Self {
            id: ActiveValue::NotSet,
            time: ActiveValue::Set(tx.time),
            from_wallet_id: ActiveValue::Set(tx.from.clone()),
            to_wallet_id: ActiveValue::Set(tx.to.clone()),
            amount: ActiveValue::Set(tx.amount.cents()),
        }
    }
}

impl From<Model> for Transaction {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            time: model.time,
            from: model.from_wallet_id,
            to: model.to_wallet_id,
            amount: MoneyCents::new(model.amount),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_transaction_requires_positive_amount() {
        let now = Utc::now();
        assert!(NewTransaction::new("a", "b", MoneyCents::new(1), now).is_ok());
        assert_eq!(
            NewTransaction::new("a", "b", MoneyCents::ZERO, now),
            Err(EngineError::InvalidAmount("amount must be > 0".to_string()))
        );
        assert!(NewTransaction::new("a", "b", MoneyCents::new(-5), now).is_err());
    }
}
