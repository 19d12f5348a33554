//! `.env` loading
//!
//! Priority order (highest to lowest):
//! 1. Variables already set in the process environment
//! 2. ./.env
//! 3. ~/.users-admin/.env
//!
//! dotenvy never overwrites a variable that is already set, so loading
//! in this order gives the priority above.

use std::path::PathBuf;

/// Get the users-admin config directory path (~/.users-admin)
pub fn config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".users-admin"))
}

/// Load `.env` files, returning where values came from.
///
/// Runs before tracing is initialized, so the caller logs the result.
pub fn load_dotenv() -> Vec<PathBuf> {
    let mut loaded_from = Vec::new();

    if let Ok(path) = dotenvy::dotenv() {
        loaded_from.push(path);
    }

    if let Some(env_file) = config_dir().map(|dir| dir.join(".env")) {
        if env_file.exists() && dotenvy::from_path(&env_file).is_ok() {
            loaded_from.push(env_file);
        }
    }

    loaded_from
}
