//! Dump-file parsing and per-bucket import pipelines for the NCBI taxonomy
//! reference data.

pub mod importers;
pub mod parser;
pub mod pipeline;

pub use importers::{import_division, import_gencode, import_gi_taxid, import_names, import_nodes, ImportOptions};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ImportError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Store(#[from] gotaxon_store::StoreError),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error("channel closed unexpectedly")]
    ChannelClosed,
}

pub type Result<T> = std::result::Result<T, ImportError>;
