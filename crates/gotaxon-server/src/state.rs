use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use gotaxon_query::TaxonomyGraph;
use gotaxon_store::{ReadPool, Store};
use tracing::info;

use crate::config::ServerConfig;

/// Shared application state. `graph` holds the four structured buckets
/// in memory; `pool` gates per-request access to the (unloaded)
/// `gi_taxid_nucl`/`gi_taxid_prot` buckets.
#[derive(Clone)]
pub struct AppState {
    pub pool: ReadPool,
    pub graph: TaxonomyGraph,
    pub request_timeout: Duration,
}

impl AppState {
    /// Open the store, load the taxonomy graph via four concurrent
    /// loaders, and return once every loader has finished. The listener
    /// must not start accepting connections before this returns.
    pub async fn boot(config: &ServerConfig) -> Result<Self> {
        let store = Arc::new(Store::open(&config.db_path)?);
        let pool = ReadPool::new(store, config.threads.max(1));

        info!("loading taxonomy graph (nodes, names, divisions, gencodes)");
        let graph = TaxonomyGraph::load_concurrent(&pool).await?;
        info!("taxonomy graph loaded");

        Ok(Self {
            pool,
            graph,
            request_timeout: Duration::from_secs(config.timeout_secs.max(1)),
        })
    }
}
