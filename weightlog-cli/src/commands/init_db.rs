//! Database initialization command

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use weightlog_server::{Database, RecordRepo};

use crate::config::default_db_path;

/// Arguments for the init-db command
#[derive(Parser, Debug)]
pub struct InitDbArgs {
    /// SQLite database file (default: ~/.weightlog/weight_tracker.db)
    #[arg(long, env = "WEIGHTLOG_DB")]
    pub db_path: Option<PathBuf>,
}

/// Create the database file and table, then report the record count
pub async fn run_init_db(args: InitDbArgs) -> Result<()> {
    let path = args.db_path.unwrap_or_else(default_db_path);

    let db = Database::open(&path)
        .await
        .with_context(|| format!("Failed to open database at {}", path.display()))?;

    let count = {
        let mut conn = db.acquire().await?;
        RecordRepo::new(&mut conn).count().await?
    };
    db.close().await;

    tracing::info!(records = count, "Database ready at {}", path.display());
    Ok(())
}
