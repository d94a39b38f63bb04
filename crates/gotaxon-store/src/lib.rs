//! Embedded bucketed key-value store.
//!
//! Wraps a single [`bbolt_rs`] database file: an ordered, bucketed store with
//! single-writer/multi-reader transactions. One file backs every taxonomy
//! bucket (`nodes`, `names`, `divisions`, `gencodes`, `gi_taxid_nucl`,
//! `gi_taxid_prot`).

mod pool;
mod store;

pub use pool::{PooledRead, ReadPool};
pub use store::Store;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("bbolt error: {0}")]
    Bolt(String),

    #[error("bucket not found: {0}")]
    BucketNotFound(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, StoreError>;

impl From<StoreError> for gotaxon_common::Error {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::BucketNotFound(bucket) => gotaxon_common::Error::not_found(format!("bucket not found: {bucket}")),
            StoreError::Parse(msg) => gotaxon_common::Error::parse(msg),
            other @ (StoreError::Bolt(_) | StoreError::Io(_)) => gotaxon_common::Error::store(other.to_string()),
        }
    }
}
