//! CLI subcommands

pub mod init_db;
pub mod serve;

pub use init_db::InitDbArgs;
pub use serve::ServeArgs;
