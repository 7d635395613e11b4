// src/config.rs
//! Runtime configuration from environment variables (`.env` is loaded by the
//! entry points via `dotenvy`).

use std::path::PathBuf;

// --- env defaults & names ---
pub const DEFAULT_WEIGHTS_PATH: &str = "config/weights.toml";
pub const DEFAULT_DOCUMENT_PATH: &str = "Inflamacija.pdf";
pub const DEFAULT_STATIC_DIR: &str = "static";

pub const ENV_WEIGHTS_PATH: &str = "BAROMETER_WEIGHTS_PATH";
pub const ENV_DOCUMENT_PATH: &str = "BAROMETER_DOCUMENT_PATH";
pub const ENV_STATIC_DIR: &str = "BAROMETER_STATIC_DIR";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub weights_path: PathBuf,
    pub document_path: PathBuf,
    pub static_dir: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            weights_path: PathBuf::from(DEFAULT_WEIGHTS_PATH),
            document_path: PathBuf::from(DEFAULT_DOCUMENT_PATH),
            static_dir: PathBuf::from(DEFAULT_STATIC_DIR),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            weights_path: env_path(ENV_WEIGHTS_PATH, DEFAULT_WEIGHTS_PATH),
            document_path: env_path(ENV_DOCUMENT_PATH, DEFAULT_DOCUMENT_PATH),
            static_dir: env_path(ENV_STATIC_DIR, DEFAULT_STATIC_DIR),
        }
    }
}

// blank values fall back to the default
fn env_path(name: &str, default: &str) -> PathBuf {
    std::env::var(name)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(default))
}
