use std::error::Error;

use clap::{Args, Parser, Subcommand};
use engine::{Engine, MoneyCents, TransferCmd};
use migration::MigratorTrait;
use sea_orm::{Database, DatabaseConnection};

#[derive(Parser, Debug)]
#[command(name = "wallet_ledger_admin")]
#[command(about = "Admin utilities for the wallet ledger (wallets, transfers, history)")]
struct Cli {
    /// Database connection string (also read from `DATABASE_URL`).
    #[arg(
        long,
        env = "DATABASE_URL",
        default_value = "sqlite:./wallet_ledger.db?mode=rwc"
    )]
    database_url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    Wallet(Wallet),
    /// Move money between two wallets.
    Transfer(TransferArgs),
}

#[derive(Args, Debug)]
struct Wallet {
    #[command(subcommand)]
    command: WalletCommand,
}

#[derive(Subcommand, Debug)]
enum WalletCommand {
    /// Create a wallet with the starting balance.
    Create,
    /// Print the balance of a wallet.
    Show(WalletIdArgs),
    /// Print the transfers of a wallet, oldest first.
    History(WalletIdArgs),
}

#[derive(Args, Debug)]
struct WalletIdArgs {
    #[arg(long)]
    id: String,
}

#[derive(Args, Debug)]
struct TransferArgs {
    #[arg(long)]
    from: String,
    #[arg(long)]
    to: String,
    /// Amount in currency units, e.g. `12.50`.
    #[arg(long, value_parser = parse_amount)]
    amount: MoneyCents,
}

fn parse_amount(raw: &str) -> Result<MoneyCents, String> {
    raw.parse::<MoneyCents>().map_err(|err| err.to_string())
}

async fn connect_db(
    database_url: &str,
) -> Result<DatabaseConnection, Box<dyn Error + Send + Sync>> {
    let db = Database::connect(database_url).await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    let cli = Cli::parse();

    let db = connect_db(&cli.database_url).await?;
    let engine = Engine::builder().database(db).build().await?;

    match cli.command {
        Command::Wallet(Wallet {
            command: WalletCommand::Create,
        }) => {
            let wallet = engine.create_wallet().await?;
            println!("created wallet: {} (balance {})", wallet.id, wallet.balance);
        }
        Command::Wallet(Wallet {
            command: WalletCommand::Show(args),
        }) => {
            let wallet = engine.wallet(&args.id).await?;
            println!("{} {}", wallet.id, wallet.balance);
        }
        Command::Wallet(Wallet {
            command: WalletCommand::History(args),
        }) => {
            let history = engine.history(&args.id).await?;
            if history.is_empty() {
                println!("no transfers for {}", args.id);
            }
            for tx in history {
                println!(
                    "{} {} -> {} {}",
                    tx.time.to_rfc3339(),
                    tx.from,
                    tx.to,
                    tx.amount
                );
            }
        }
        Command::Transfer(args) => {
            let tx = engine
                .transfer(TransferCmd::new(args.from, args.to, args.amount))
                .await?;
            println!("transferred {} from {} to {}", tx.amount, tx.from, tx.to);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_is_well_formed() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn transfer_amount_is_parsed_in_cents() {
        let cli = Cli::try_parse_from([
            "wallet_ledger_admin",
            "--database-url",
            "sqlite::memory:",
            "transfer",
            "--from",
            "a",
            "--to",
            "b",
            "--amount",
            "12.50",
        ])
        .unwrap();
        match cli.command {
            Command::Transfer(args) => assert_eq!(args.amount, MoneyCents::new(1250)),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn malformed_amount_is_rejected() {
        let result = Cli::try_parse_from([
            "wallet_ledger_admin",
            "transfer",
            "--from",
            "a",
            "--to",
            "b",
            "--amount",
            "1.234",
        ]);
        assert!(result.is_err());
    }
}
