//! weightlog CLI - run the weight log web server
//!
//! Subcommands:
//! - `serve`: open the database and serve the web pages
//! - `init-db`: create the database file and table, then exit

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod config;
mod tracing_setup;

use commands::{InitDbArgs, ServeArgs};

#[derive(Parser, Debug)]
#[command(
    name = "weightlog",
    author,
    version,
    about = "Personal daily weight log with chart and edit forms"
)]
struct Cli {
    /// Enable debug logging (RUST_LOG still takes precedence)
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP server
    Serve(ServeArgs),

    /// Create the database and record table if missing
    InitDb(InitDbArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env is fine; flags and the environment still apply.
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    tracing_setup::init(&tracing_setup::TracingConfig { debug: cli.debug })?;

    match cli.command {
        Commands::Serve(args) => commands::serve::run_serve(args).await,
        Commands::InitDb(args) => commands::init_db::run_init_db(args).await,
    }
}
