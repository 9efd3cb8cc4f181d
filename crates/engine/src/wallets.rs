//! The module contains `Wallet` struct and its storage model.

use sea_orm::entity::{ActiveValue, prelude::*};

use crate::MoneyCents;

/// Balance granted to every wallet when it is created (100.00).
pub const STARTING_BALANCE: MoneyCents = MoneyCents::new(100_00);

/// A wallet.
///
/// A wallet holds a non-negative balance and is identified by an opaque id
/// (32 lowercase hex characters for wallets created by the engine).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Wallet {
    pub id: String,
    pub balance: MoneyCents,
}

impl Wallet {
    pub fn new(id: String, balance: MoneyCents) -> Self {
        Self { id, balance }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "wallets")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    /// Balance in cents.
    pub balance: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Wallet> for ActiveModel {
    fn from(value: &Wallet) -> Self {
        Self {
            id: ActiveValue::Set(value.id.clone()),
            balance: ActiveValue::Set(value.balance.cents()),
        }
    }
}

impl From<Model> for Wallet {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            balance: MoneyCents::new(model.balance),
        }
    }
}
