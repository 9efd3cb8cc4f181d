//! Initial ledger schema.
//!
//! - `wallets`: one row per wallet, balance stored in cents.
//! - `history`: append-only log of completed transfers, amount in cents.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(Iden)]
enum Wallets {
    Table,
    Id,
    Balance,
}

#[derive(Iden)]
enum History {
    Table,
    Id,
    Time,
    FromWalletId,
    ToWalletId,
    Amount,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Wallets::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Wallets::Id)
                            .string_len(64)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Wallets::Balance).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        // No foreign keys: history outlives the wallets it mentions.
        manager
            .create_table(
                Table::create()
                    .table(History::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(History::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(History::Time)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(History::FromWalletId).string_len(64).not_null())
                    .col(ColumnDef::new(History::ToWalletId).string_len(64).not_null())
                    .col(ColumnDef::new(History::Amount).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-history-from_wallet_id")
                    .table(History::Table)
                    .col(History::FromWalletId)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-history-to_wallet_id")
                    .table(History::Table)
                    .col(History::ToWalletId)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(History::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Wallets::Table).if_exists().to_owned())
            .await?;
        Ok(())
    }
}
