mod report;

use anyhow::{Context, Result};
use database::{
    db::{DbConfig, SQL_LOG_TARGET, create_connection},
    services::{seed::SeedService, university::UniversityService},
};
use env_logger::{Builder, Env};
use log::{LevelFilter, info};
use std::io;

/// `info` unless the environment says otherwise; SQL statements only with `sql_debug`
fn logger_builder(env: Env<'_>, config: &DbConfig) -> Builder {
    let mut builder = Builder::from_env(env.default_filter_or("info"));

    if config.sql_debug {
        builder.filter_module(SQL_LOG_TARGET, LevelFilter::Debug);
    }

    builder
}

/// Seeds the sample university if needed, then prints every example query
#[tokio::main]
async fn main() -> Result<()> {
    let config = DbConfig::from_env().context("Invalid configuration")?;
    logger_builder(Env::default(), &config).init();

    let db = create_connection(&config)
        .await
        .with_context(|| format!("Failed to open database at {}", config.url))?;

    SeedService::populate(&db)
        .await
        .context("Failed to seed the database")?;

    let counts = UniversityService::counts(&db).await?;
    info!(
        "{} departments, {} groups, {} courses, {} students",
        counts.departments, counts.groups, counts.courses, counts.students
    );

    let stdout = io::stdout();
    let mut out = stdout.lock();
    report::run_showcase(&db, &mut out).await?;

    db.close().await?;
    Ok(())
}
