//! HTTP server command

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;

use weightlog_server::{run_server, ServerConfig};

use crate::config::default_db_path;

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to
    #[arg(long, short = 'b', env = "WEIGHTLOG_BIND", default_value = "127.0.0.1:5000")]
    pub bind: SocketAddr,

    /// SQLite database file (default: ~/.weightlog/weight_tracker.db)
    #[arg(long, env = "WEIGHTLOG_DB")]
    pub db_path: Option<PathBuf>,

    /// Request timeout in seconds
    #[arg(long, default_value = "30")]
    pub timeout: u64,
}

impl ServeArgs {
    fn into_config(self) -> ServerConfig {
        ServerConfig {
            bind_addr: self.bind,
            db_path: self.db_path.unwrap_or_else(default_db_path),
            request_timeout: Duration::from_secs(self.timeout),
        }
    }
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let config = args.into_config();
    tracing::info!("Starting weightlog server on {}", config.bind_addr);

    // Blocks until shutdown
    run_server(config).await.context("Server error")?;

    Ok(())
}
