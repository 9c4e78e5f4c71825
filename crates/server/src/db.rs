use anyhow::Context;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use tracing::info;
use vibraze_migration::{Migrator, MigratorTrait};

pub async fn init_pool_and_migrate(database_url: &str) -> anyhow::Result<DatabaseConnection> {
    let mut options = ConnectOptions::new(database_url.to_owned());
    options.sqlx_logging(false);
    // Every pooled connection to an in-memory SQLite database would see its own empty database.
    if database_url.starts_with("sqlite::memory:") {
        options.max_connections(1);
    }

    let db = Database::connect(options)
        .await
        .context("failed to connect to database")?;

    Migrator::up(&db, None)
        .await
        .context("failed to run database migrations")?;
    info!("database migrations applied");

    Ok(db)
}
