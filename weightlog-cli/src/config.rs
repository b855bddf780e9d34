//! Default locations for the weightlog CLI

use std::path::PathBuf;

/// Database file name
pub const DB_FILE_NAME: &str = "weight_tracker.db";

/// Default database path: ~/.weightlog/weight_tracker.db, or the working
/// directory when no home directory is known.
pub fn default_db_path() -> PathBuf {
    dirs::home_dir()
        .map(|home| home.join(".weightlog"))
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DB_FILE_NAME)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_path_ends_with_db_file() {
        let path = default_db_path();
        assert_eq!(path.file_name().unwrap(), DB_FILE_NAME);
    }
}
