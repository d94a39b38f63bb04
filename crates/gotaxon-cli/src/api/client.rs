//! HTTP client for `gotaxon-server`'s four query endpoints. Ported from
//! `bdp-cli/src/api/client.rs`'s thin `reqwest` wrapper, generalized from
//! `original_source/cmd/remote.go`'s per-endpoint query functions.

use std::collections::HashMap;
use std::time::Duration;

use gotaxon_common::Taxon;
use reqwest::Client;

use crate::api::endpoints;
use crate::api::types::{Gi2TaxidResponse, LcaResponse, Name2TaxidResponse, TaxIdSciNameItem, Taxid2TaxonResponse};
use crate::error::{CliError, Result};

/// Per-request HTTP timeout. Matches the server's own request deadline
/// (spec §5) so a hung connection fails on the client side too.
pub const DEFAULT_TIMEOUT_SECS: u64 = 2;

pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(host: &str, port: u16) -> Result<Self> {
        Self::with_timeout(host, port, DEFAULT_TIMEOUT_SECS)
    }

    pub fn with_timeout(host: &str, port: u16, timeout_secs: u64) -> Result<Self> {
        let client = Client::builder().timeout(Duration::from_secs(timeout_secs)).build()?;
        Ok(Self {
            client,
            base_url: format!("http://{host}:{port}"),
        })
    }

    /// Look up a batch of accession ids in `bucket` (`gi_taxid_prot` or
    /// `gi_taxid_nucl`), preserving the input's request/response pairing.
    pub async fn gi_to_taxid(&self, bucket: &str, gis: &[String]) -> Result<HashMap<String, String>> {
        let url = endpoints::gi2taxid_url(&self.base_url);
        let query: Vec<(&str, &str)> = gis
            .iter()
            .map(|g| ("gi", g.as_str()))
            .chain(std::iter::once(("db", bucket)))
            .collect();

        let body: Gi2TaxidResponse = self.client.get(&url).query(&query).send().await?.json().await?;
        if body.status != "OK" {
            return Err(CliError::Remote(body.message));
        }
        Ok(body.gi2taxid)
    }

    pub async fn taxid_to_taxon(&self, taxids: &[String]) -> Result<HashMap<String, Taxon>> {
        let url = endpoints::taxid2taxon_url(&self.base_url);
        let query: Vec<(&str, &str)> = taxids.iter().map(|t| ("taxid", t.as_str())).collect();

        let body: Taxid2TaxonResponse = self.client.get(&url).query(&query).send().await?.json().await?;
        if body.status != "OK" {
            return Err(CliError::Remote(body.message));
        }
        Ok(body.taxid2taxon)
    }

    pub async fn name_to_taxid(
        &self,
        names: &[String],
        use_regex: bool,
        name_class: &str,
    ) -> Result<HashMap<String, Vec<TaxIdSciNameItem>>> {
        let url = endpoints::name2taxid_url(&self.base_url);
        let mut query: Vec<(&str, &str)> = names.iter().map(|n| ("name", n.as_str())).collect();
        if use_regex {
            query.push(("regexp", "1"));
        }
        if !name_class.is_empty() {
            query.push(("class", name_class));
        }

        let body: Name2TaxidResponse = self.client.get(&url).query(&query).send().await?.json().await?;
        if body.status != "OK" {
            return Err(CliError::Remote(body.message));
        }
        Ok(body.name2taxid)
    }

    /// `taxid_groups` is one comma-separated list of tax ids per LCA query,
    /// matching the `/lca?taxids=a,b,c&taxids=d,e` wire shape.
    pub async fn lca(&self, taxid_groups: &[String]) -> Result<HashMap<String, Taxon>> {
        let url = endpoints::lca_url(&self.base_url);
        let query: Vec<(&str, &str)> = taxid_groups.iter().map(|g| ("taxids", g.as_str())).collect();

        let body: LcaResponse = self.client.get(&url).query(&query).send().await?.json().await?;
        if body.status != "OK" {
            return Err(CliError::Remote(body.message));
        }
        Ok(body.taxids2taxon)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn gi_to_taxid_parses_the_ok_envelope() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/gi2taxid"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "status": "OK",
                "message": "sum: 1, found: 1",
                "gi2taxid": {"12345": "9606"}
            })))
            .mount(&server)
            .await;

        let uri = server.uri();
        let (host, port) = parse_uri(&uri);
        let client = ApiClient::new(&host, port).unwrap();
        let result = client.gi_to_taxid("gi_taxid_prot", &["12345".to_string()]).await.unwrap();
        assert_eq!(result.get("12345"), Some(&"9606".to_string()));
    }

    #[tokio::test]
    async fn remote_failure_status_surfaces_as_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/lca"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "status": "FAILED",
                "message": "lca requires at least 2 tax ids",
                "taxids2taxon": {}
            })))
            .mount(&server)
            .await;

        let uri = server.uri();
        let (host, port) = parse_uri(&uri);
        let client = ApiClient::new(&host, port).unwrap();
        let err = client.lca(&["9606".to_string()]).await.unwrap_err();
        assert!(matches!(err, CliError::Remote(_)));
    }

    fn parse_uri(uri: &str) -> (String, u16) {
        let without_scheme = uri.trim_start_matches("http://");
        let mut parts = without_scheme.splitn(2, ':');
        let host = parts.next().unwrap().to_string();
        let port: u16 = parts.next().unwrap().parse().unwrap();
        (host, port)
    }
}
