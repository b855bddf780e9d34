//! weightlog-server: daily weight log over HTTP
//!
//! Stores one weight record per calendar date in SQLite and serves the
//! list/chart page plus the create and edit forms.

pub mod db;
pub mod http;
pub mod models;

pub use db::{Database, DbError, RecordRepo};
pub use http::{build_router, run_server, AppState, ServerConfig, ServerError};
pub use models::{ChartSeries, DailyRecord, NewRecord, ValidationError};
