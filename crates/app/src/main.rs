use migration::{Migrator, MigratorTrait};
use sea_orm::{
    ConnectOptions, SqlxPostgresConnector,
    sqlx::{ConnectOptions as _, postgres::PgPoolOptions},
};
use settings::Database;

mod settings;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let settings = settings::Settings::new()?;

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "wallet_ledger={level},server={level},engine={level},migration={level}",
            level = settings.app.level
        ))
        .init();

    let db = match parse_database(&settings.database).await {
        Ok(db) => db,
        Err(err) => {
            tracing::error!("failed to initialize database: {err}");
            return Err(err);
        }
    };

    let engine = engine::Engine::builder().database(db).build().await?;

    let bind = settings
        .server
        .bind
        .unwrap_or_else(|| "127.0.0.1".to_string());
    let addr = format!("{}:{}", bind, settings.server.port);
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(err) => {
            tracing::error!("failed to bind server listener on {addr}: {err}");
            return Err(err.into());
        }
    };

    server::run_with_listener(engine, listener).await?;
    Ok(())
}

async fn parse_database(
    config: &Database,
) -> Result<sea_orm::DatabaseConnection, Box<dyn std::error::Error + Send + Sync>> {
    let database = match config {
        Database::Memory => connect_sqlite(String::from("sqlite::memory:"), true).await?,
        Database::Sqlite(path) => connect_sqlite(format!("sqlite:{path}?mode=rwc"), false).await?,
        Database::Postgres(pg) => {
            let options = pg.connect_options().disable_statement_logging();
            let pool = PgPoolOptions::new().connect_with(options).await?;
            SqlxPostgresConnector::from_sqlx_postgres_pool(pool)
        }
    };

    Migrator::up(&database, None).await?;
    tracing::info!("database ready");
    Ok(database)
}

async fn connect_sqlite(
    url: String,
    in_memory: bool,
) -> Result<sea_orm::DatabaseConnection, sea_orm::DbErr> {
    let mut options = ConnectOptions::new(url);
    options.sqlx_logging(false);
    if in_memory {
        // Every pooled connection would otherwise open its own empty database.
        options.max_connections(1).min_connections(1);
    }
    sea_orm::Database::connect(options).await
}
