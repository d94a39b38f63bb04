//! Layered CLI configuration: `~/.gotaxon.toml`, then environment
//! variables, then explicit CLI flags (applied last, by the caller).
//! Ported from `bdp-cli/src/config.rs`'s env-overlay idiom, generalized to a
//! `figment` layered provider per SPEC_FULL's ambient-stack requirement.

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::Result;

pub const DEFAULT_DB_DIR: &str = ".gotaxon";
pub const DEFAULT_DB_FILE: &str = "db.db";
pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_THREADS: usize = 4;
pub const DEFAULT_CHUNK_SIZE: usize = 100_000;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub db_dir: PathBuf,
    pub db_file: String,
    pub host: String,
    pub port: u16,
    pub threads: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            db_dir: default_db_dir(),
            db_file: DEFAULT_DB_FILE.to_string(),
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            threads: DEFAULT_THREADS,
        }
    }
}

fn default_db_dir() -> PathBuf {
    dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")).join(DEFAULT_DB_DIR)
}

impl Config {
    /// Load defaults, then `~/.gotaxon.toml` if present, then environment
    /// variables prefixed `GOTAXON_`.
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();

        let config_path = dirs::home_dir().map(|h| h.join(".gotaxon.toml"));

        let mut figment = Figment::from(Serialized::defaults(Config::default()));
        if let Some(path) = &config_path {
            if path.exists() {
                figment = figment.merge(Toml::file(path));
            }
        }
        figment = figment.merge(Env::prefixed("GOTAXON_"));

        figment
            .extract()
            .map_err(|e| crate::error::CliError::config(format!("failed to load configuration: {e}")))
    }

    /// Path to the store file, joining `db_dir`/`db_file`.
    pub fn db_path(&self) -> PathBuf {
        self.db_dir.join(&self.db_file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_db_path_joins_dir_and_file() {
        let config = Config {
            db_dir: PathBuf::from("/tmp/gotaxon"),
            db_file: "db.db".to_string(),
            ..Config::default()
        };
        assert_eq!(config.db_path(), PathBuf::from("/tmp/gotaxon/db.db"));
    }
}
