//! CLI error type. Ported from `bdp-cli/src/error.rs`, trimmed to the
//! failure modes this CLI actually has.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Usage(String),

    #[error("query error: {0}")]
    Query(#[from] gotaxon_common::Error),

    #[error("import error: {0}")]
    Import(#[from] gotaxon_import::ImportError),

    #[error("store error: {0}")]
    Store(#[from] gotaxon_store::StoreError),

    #[error("config error: {0}")]
    Config(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("remote server reported failure: {0}")]
    Remote(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CliError {
    pub fn usage(msg: impl Into<String>) -> Self {
        Self::Usage(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
