//! Response envelopes. Every endpoint always answers `200 OK`; failure is
//! carried in-band via `status: "FAILED"`, ported from `taxon/server.go`'s
//! `Message*Map` types.

use axum::response::{IntoResponse, Json, Response};
use gotaxon_common::Taxon;
use serde::Serialize;
use std::collections::HashMap;

fn ok_response<T: Serialize>(body: T) -> Response {
    (axum::http::StatusCode::OK, Json(body)).into_response()
}

#[derive(Debug, Serialize)]
pub struct Gi2TaxidResponse {
    pub status: &'static str,
    pub message: String,
    pub gi2taxid: HashMap<String, String>,
}

impl IntoResponse for Gi2TaxidResponse {
    fn into_response(self) -> Response {
        ok_response(self)
    }
}

#[derive(Debug, Serialize)]
pub struct Taxid2TaxonResponse {
    pub status: &'static str,
    pub message: String,
    pub taxid2taxon: HashMap<String, Taxon>,
}

impl IntoResponse for Taxid2TaxonResponse {
    fn into_response(self) -> Response {
        ok_response(self)
    }
}

#[derive(Debug, Serialize)]
pub struct TaxIdSciNameItem {
    #[serde(rename = "TaxID")]
    pub tax_id: String,
    #[serde(rename = "ScientificName")]
    pub scientific_name: String,
}

#[derive(Debug, Serialize)]
pub struct Name2TaxidResponse {
    pub status: &'static str,
    pub message: String,
    pub name2taxid: HashMap<String, Vec<TaxIdSciNameItem>>,
}

impl IntoResponse for Name2TaxidResponse {
    fn into_response(self) -> Response {
        ok_response(self)
    }
}

#[derive(Debug, Serialize)]
pub struct LcaResponse {
    pub status: &'static str,
    pub message: String,
    pub taxids2taxon: HashMap<String, Taxon>,
}

impl IntoResponse for LcaResponse {
    fn into_response(self) -> Response {
        ok_response(self)
    }
}
