use sea_orm::ConnectionTrait;
use tracing::info;
use tracing_subscriber::EnvFilter;

use store::config::AppConfig;
use store::database::init_db;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_target(false)
        .init();

    let config = AppConfig::load()?;
    info!(cache_capacity = config.cache.capacity, "Loaded configuration");

    let db = init_db(&config.database).await?;
    info!(backend = ?db.get_database_backend(), "Store schema is ready");

    db.close().await?;
    Ok(())
}
