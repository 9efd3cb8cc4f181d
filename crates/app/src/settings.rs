//! Handles settings for the application.
//!
//! Settings are read from `settings.toml` (or the file named by
//! `WALLET_LEDGER_SETTINGS`), then overridden by `WALLET_LEDGER__*`
//! environment variables, e.g. `WALLET_LEDGER__SERVER__PORT=9000` or
//! `WALLET_LEDGER__DATABASE__POSTGRES__HOST=db`.
use config::{Config, ConfigError, Environment, File};
use sea_orm::sqlx::postgres::PgConnectOptions;
use serde::Deserialize;

const DEFAULT_SETTINGS_PATH: &str = "settings";

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct App {
    pub level: String,
}

impl Default for App {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Server {
    pub bind: Option<String>,
    pub port: u16,
}

impl Default for Server {
    fn default() -> Self {
        Self {
            bind: None,
            port: 8080,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct Postgres {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Database {
    Memory,
    Sqlite(String),
    Postgres(Postgres),
}

impl Default for Database {
    fn default() -> Self {
        Self::Sqlite("wallet_ledger.db".to_string())
    }
}

impl Postgres {
    /// Credentials are handed over field by field, so the password may hold
    /// any character, including ones reserved in URLs.
    pub fn connect_options(&self) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .password(&self.password)
            .database(&self.name)
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub app: App,
    pub server: Server,
    pub database: Database,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let path = std::env::var("WALLET_LEDGER_SETTINGS")
            .unwrap_or_else(|_| DEFAULT_SETTINGS_PATH.to_string());

        Config::builder()
            .add_source(File::with_name(&path).required(false))
            .add_source(
                Environment::with_prefix("WALLET_LEDGER")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }
}
