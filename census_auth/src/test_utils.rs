//! Shared test initialization.
//!
//! Ensures every test sees the same environment configuration and an
//! initialized user store, regardless of execution order.

use std::env;
use std::sync::Once;

/// Centralized test initialization for all tests across the crate.
///
/// Loads `.env_test` (falling back to `.env`) once, fills in store defaults
/// so tests run without any external services, removes any stale test
/// database file, and initializes the user store tables.
pub async fn init_test_environment() {
    static ENV_INIT: Once = Once::new();
    ENV_INIT.call_once(|| {
        if dotenvy::from_filename(".env_test").is_err() {
            dotenvy::dotenv().ok();
        }

        set_default("GENERIC_DATA_STORE_TYPE", "sqlite");
        set_default(
            "GENERIC_DATA_STORE_URL",
            "sqlite:/tmp/census_auth_test.sqlite3",
        );
        set_default("GENERIC_CACHE_STORE_TYPE", "memory");
        set_default("GENERIC_CACHE_STORE_URL", "memory://");

        // Start from an empty database file
        if let Some(db_path) = sqlite_file_path() {
            let _ = std::fs::remove_file(db_path);
        }
    });

    if let Err(e) = crate::userdb::UserStore::init().await {
        eprintln!("Warning: failed to initialize UserStore: {e}");
    }
}

fn set_default(key: &str, value: &str) {
    if env::var(key).is_err() {
        // Env var manipulation affects global state; tests touching these
        // variables run serially.
        unsafe {
            env::set_var(key, value);
        }
    }
}

/// Extract the file path from a sqlite database URL, if it names a file
fn sqlite_file_path() -> Option<String> {
    let url = env::var("GENERIC_DATA_STORE_URL").ok()?;
    let path = url.strip_prefix("sqlite:")?;
    if path.is_empty() || path.starts_with(':') {
        return None;
    }
    Some(path.trim_start_matches("//").to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_sqlite_file_path_extraction() {
        let original = env::var("GENERIC_DATA_STORE_URL").ok();

        unsafe {
            env::set_var("GENERIC_DATA_STORE_URL", "sqlite:/tmp/some_test.db");
        }
        assert_eq!(sqlite_file_path().as_deref(), Some("/tmp/some_test.db"));

        unsafe {
            env::set_var("GENERIC_DATA_STORE_URL", "sqlite::memory:");
        }
        assert_eq!(sqlite_file_path(), None);

        unsafe {
            match original {
                Some(value) => env::set_var("GENERIC_DATA_STORE_URL", value),
                None => env::remove_var("GENERIC_DATA_STORE_URL"),
            }
        }
    }
}
