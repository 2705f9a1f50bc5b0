//! Standalone migration runner: applies the full schema to the configured
//! database, then exits.

use anyhow::Context;
use tracing::info;

use almoxarifado_api::{config::AppConfig, db, logging};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cfg = AppConfig::load().context("loading configuration")?;
    logging::init(&cfg);

    let pool = db::establish_connection_from_app_config(&cfg)
        .await
        .context("connecting to database")?;

    db::run_migrations(&pool).await.context("applying migrations")?;

    info!("All migrations applied");

    Ok(())
}
