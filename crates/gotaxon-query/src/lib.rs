//! In-memory taxonomy graph and the four query families: accession lookup,
//! taxon hydration, name search, and lowest-common-ancestor.

mod graph;
mod lca;
mod lookup;

pub use graph::TaxonomyGraph;
pub use lca::lca;
pub use lookup::{gi_to_taxid, name_to_taxids, taxid_to_node, taxon_by_taxid};

use gotaxon_common::Error;

pub type Result<T> = std::result::Result<T, Error>;
