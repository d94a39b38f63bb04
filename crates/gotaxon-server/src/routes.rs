//! The four query endpoints. Ported handler-for-handler from
//! `taxon/server.go`'s `gi2taxid`/`taxid2taxon`/`name2taxid`/`lca`.

use axum::extract::{RawQuery, State};
use axum::routing::get;
use axum::Router;
use std::collections::HashMap;

use crate::response::{Gi2TaxidResponse, LcaResponse, Name2TaxidResponse, Taxid2TaxonResponse, TaxIdSciNameItem};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/gi2taxid", get(gi2taxid))
        .route("/taxid2taxon", get(taxid2taxon))
        .route("/name2taxid", get(name2taxid))
        .route("/lca", get(lca))
}

/// Parse `key=value` pairs out of a raw query string, collecting every value
/// for a repeated key in order of appearance, matching gin's
/// `c.Request.Form[key]` behavior for multi-value parameters.
fn multi_values(raw: &str, key: &str) -> Vec<String> {
    form_urlencoded::parse(raw.as_bytes())
        .filter(|(k, _)| k == key)
        .map(|(_, v)| v.into_owned())
        .collect()
}

fn single_value(raw: &str, key: &str) -> Option<String> {
    form_urlencoded::parse(raw.as_bytes())
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.into_owned())
}

/// Whether `key` appears at all in the query string, regardless of its
/// value (including a bare `key` or `key=`). Used for toggle-style params
/// like `regexp`, which the spec treats as "presence toggles regex".
fn has_key(raw: &str, key: &str) -> bool {
    form_urlencoded::parse(raw.as_bytes()).any(|(k, _)| k == key)
}

async fn gi2taxid(State(state): State<AppState>, RawQuery(raw): RawQuery) -> Gi2TaxidResponse {
    let raw = raw.unwrap_or_default();
    let gis = multi_values(&raw, "gi");

    if gis.is_empty() {
        return Gi2TaxidResponse {
            status: "FAILED",
            message: "no GIs given".to_string(),
            gi2taxid: HashMap::new(),
        };
    }

    let bucket = single_value(&raw, "db").unwrap_or_else(|| "gi_taxid_prot".to_string());
    if bucket != "gi_taxid_prot" && bucket != "gi_taxid_nucl" {
        return Gi2TaxidResponse {
            status: "FAILED",
            message: format!("invalid db: {bucket}. valid: gi_taxid_prot or gi_taxid_nucl"),
            gi2taxid: HashMap::new(),
        };
    }

    let handle = state.pool.acquire().await;
    match gotaxon_query::gi_to_taxid(&handle, &bucket, &gis) {
        Ok(taxids) => {
            let found = taxids.values().filter(|v| !v.is_empty()).count();
            Gi2TaxidResponse {
                status: "OK",
                message: format!("sum: {}, found: {found}", gis.len()),
                gi2taxid: taxids,
            }
        },
        Err(e) => Gi2TaxidResponse {
            status: "FAILED",
            message: format!("error: {e}"),
            gi2taxid: HashMap::new(),
        },
    }
}

async fn taxid2taxon(State(state): State<AppState>, RawQuery(raw): RawQuery) -> Taxid2TaxonResponse {
    let raw = raw.unwrap_or_default();
    let taxids = multi_values(&raw, "taxid");

    if taxids.is_empty() {
        return Taxid2TaxonResponse {
            status: "FAILED",
            message: "no Taxids given".to_string(),
            taxid2taxon: HashMap::new(),
        };
    }

    // Mirrors `taxid2taxon`'s `QueryNodeByTaxID` call in the Go original:
    // validates every taxid is a digit string (whole-call InvalidInput
    // otherwise) before any hydration is attempted.
    let handle = state.pool.acquire().await;
    let validation = gotaxon_query::taxid_to_node(&handle, &taxids);
    drop(handle);
    if let Err(e) = validation {
        return Taxid2TaxonResponse {
            status: "FAILED",
            message: format!("error: {e}"),
            taxid2taxon: HashMap::new(),
        };
    }

    // A taxid that fails to hydrate (missing Name/Division/GenCode) does not
    // abort the request; it contributes a zero-value Taxon, matching the Go
    // original's `taxon, _ := nodes.GetTaxonByTaxID(...)`.
    let mut result = HashMap::with_capacity(taxids.len());
    for taxid in &taxids {
        let taxon = gotaxon_query::taxon_by_taxid(&state.graph, taxid).unwrap_or_default();
        result.insert(taxid.clone(), taxon);
    }

    Taxid2TaxonResponse {
        status: "OK",
        message: format!("sum: {}", result.len()),
        taxid2taxon: result,
    }
}

async fn name2taxid(State(state): State<AppState>, RawQuery(raw): RawQuery) -> Name2TaxidResponse {
    let raw = raw.unwrap_or_default();
    let names = multi_values(&raw, "name");

    if names.is_empty() {
        return Name2TaxidResponse {
            status: "FAILED",
            message: "no names given".to_string(),
            name2taxid: HashMap::new(),
        };
    }

    let use_regex = has_key(&raw, "regexp");
    let name_class = single_value(&raw, "class").unwrap_or_default();

    let hits = match gotaxon_query::name_to_taxids(&state.graph, &names, use_regex, &name_class) {
        Ok(hits) => hits,
        Err(e) => {
            return Name2TaxidResponse {
                status: "FAILED",
                message: format!("error: {e}"),
                name2taxid: HashMap::new(),
            };
        },
    };

    let mut result = HashMap::with_capacity(names.len());
    for (query, matches) in hits {
        let items = matches
            .into_iter()
            .map(|(tax_id, _)| {
                let scientific_name = state
                    .graph
                    .names
                    .get(&tax_id)
                    .and_then(|n| n.scientific_name())
                    .unwrap_or_default()
                    .to_string();
                TaxIdSciNameItem { tax_id, scientific_name }
            })
            .collect();
        result.insert(query, items);
    }

    Name2TaxidResponse {
        status: "OK",
        message: format!("sum: {}", names.len()),
        name2taxid: result,
    }
}

async fn lca(State(state): State<AppState>, RawQuery(raw): RawQuery) -> LcaResponse {
    let raw = raw.unwrap_or_default();
    let queries = multi_values(&raw, "taxids");

    if queries.is_empty() {
        return LcaResponse {
            status: "FAILED",
            message: "no Taxids given".to_string(),
            taxids2taxon: HashMap::new(),
        };
    }

    let mut result = HashMap::with_capacity(queries.len());
    for query in &queries {
        let taxids: Vec<String> = query.split(',').map(|s| s.to_string()).collect();
        let node = match gotaxon_query::lca(&state.graph, &taxids) {
            Ok(node) => node,
            Err(e) => {
                return LcaResponse {
                    status: "FAILED",
                    message: format!("error: {e}"),
                    taxids2taxon: HashMap::new(),
                };
            },
        };
        // A hydration failure on the LCA node does not abort the request; it
        // contributes a zero-value Taxon, matching the Go original's
        // `msg.LCA[k], _ = nodes.GetTaxonByTaxID(node.TaxID)`.
        let taxon = gotaxon_query::taxon_by_taxid(&state.graph, &node.tax_id).unwrap_or_default();
        result.insert(query.clone(), taxon);
    }

    LcaResponse {
        status: "OK",
        message: format!("sum: {}", queries.len()),
        taxids2taxon: result,
    }
}
