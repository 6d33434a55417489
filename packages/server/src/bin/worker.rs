// Standalone job worker: runs the generation pipeline without serving HTTP.

use std::sync::Arc;

use anyhow::{Context, Result};
use server_core::kernel::jobs::JobRunner;
use server_core::server::app::{build_deps, build_job_registry};
use server_core::Config;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,server_core=debug,sqlx=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting StudyKit worker");

    let config = Config::from_env().context("Failed to load configuration")?;

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run migrations")?;

    let deps = build_deps(pool, &config).await;
    let registry = Arc::new(build_job_registry());

    let runner = JobRunner::new(deps.jobs.clone(), registry, deps);
    runner.run_until_shutdown().await
}
