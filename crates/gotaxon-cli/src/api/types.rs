//! Response envelopes mirroring `gotaxon_server::response`'s wire shapes.
//! Kept as separate types (rather than a shared crate) the way
//! `bdp-cli/src/api/types.rs` mirrors `bdp-server`'s response DTOs.

use gotaxon_common::Taxon;
use serde::Deserialize;
use std::collections::HashMap;

#[derive(Debug, Deserialize)]
pub struct Gi2TaxidResponse {
    pub status: String,
    pub message: String,
    #[serde(default)]
    pub gi2taxid: HashMap<String, String>,
}

#[derive(Debug, Deserialize)]
pub struct Taxid2TaxonResponse {
    pub status: String,
    pub message: String,
    #[serde(default)]
    pub taxid2taxon: HashMap<String, Taxon>,
}

#[derive(Debug, Deserialize)]
pub struct TaxIdSciNameItem {
    #[serde(rename = "TaxID")]
    pub tax_id: String,
    #[serde(rename = "ScientificName")]
    pub scientific_name: String,
}

#[derive(Debug, Deserialize)]
pub struct Name2TaxidResponse {
    pub status: String,
    pub message: String,
    #[serde(default)]
    pub name2taxid: HashMap<String, Vec<TaxIdSciNameItem>>,
}

#[derive(Debug, Deserialize)]
pub struct LcaResponse {
    pub status: String,
    pub message: String,
    #[serde(default)]
    pub taxids2taxon: HashMap<String, Taxon>,
}
