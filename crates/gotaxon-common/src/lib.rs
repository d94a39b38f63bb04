//! gotaxon Common Library
//!
//! Shared record model, error handling, and logging setup for the gotaxon
//! workspace.

pub mod error;
pub mod logging;
pub mod taxon;

pub use error::{Error, Kind, Result};
pub use taxon::{Division, GenCode, GeneticCodeItem, LineageExItem, Name, NameItem, Node, TaxId, Taxon};
