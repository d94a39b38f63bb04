//! Immutable in-memory taxonomy graph, built once at server/CLI startup from
//! the four structured buckets.

use gotaxon_common::{Division, GenCode, Name, Node};
use gotaxon_store::{ReadPool, Store, StoreError};
use std::collections::HashMap;
use std::sync::Arc;

/// The four structured taxonomy maps, loaded once and never mutated
/// afterward. Cheap to clone (`Arc` everywhere) so handlers can hold their
/// own copy without a lock in the hot path.
#[derive(Clone, Default)]
pub struct TaxonomyGraph {
    pub nodes: Arc<HashMap<String, Node>>,
    pub names: Arc<HashMap<String, Name>>,
    pub divisions: Arc<HashMap<String, Division>>,
    pub gencodes: Arc<HashMap<String, GenCode>>,
}

impl TaxonomyGraph {
    /// Load every structured bucket from `store`. The four buckets are read
    /// independently and may be absent (an absent bucket loads as empty).
    pub fn load(store: &Store) -> gotaxon_store::Result<Self> {
        Ok(Self {
            nodes: Arc::new(load_map(store, "nodes")?),
            names: Arc::new(load_map(store, "names")?),
            divisions: Arc::new(load_map(store, "divisions")?),
            gencodes: Arc::new(load_map(store, "gencodes")?),
        })
    }

    /// Load all four buckets concurrently, one `spawn_blocking` task per
    /// bucket, each acquiring its own pooled read handle. Mirrors
    /// `StartServer`'s four goroutines joined before the listener starts.
    pub async fn load_concurrent(pool: &ReadPool) -> gotaxon_store::Result<Self> {
        let (nodes, names, divisions, gencodes) = tokio::try_join!(
            load_bucket_concurrent::<Node>(pool, "nodes"),
            load_bucket_concurrent::<Name>(pool, "names"),
            load_bucket_concurrent::<Division>(pool, "divisions"),
            load_bucket_concurrent::<GenCode>(pool, "gencodes"),
        )?;

        Ok(Self {
            nodes: Arc::new(nodes),
            names: Arc::new(names),
            divisions: Arc::new(divisions),
            gencodes: Arc::new(gencodes),
        })
    }
}

async fn load_bucket_concurrent<T>(pool: &ReadPool, bucket: &'static str) -> gotaxon_store::Result<HashMap<String, T>>
where
    T: serde::de::DeserializeOwned + Send + 'static,
{
    let handle = pool.acquire().await;
    tokio::task::spawn_blocking(move || {
        tracing::info!(bucket, "loading bucket");
        let result = load_map::<T>(&handle, bucket);
        tracing::info!(bucket, "loading bucket done");
        result
    })
    .await
    .expect("loader task panicked")
}

/// Decode every value in `bucket` as `T`. A bucket that does not exist loads
/// as empty, matching `TaxonomyGraph::load`'s documented contract; any value
/// that fails to decode as JSON propagates as `StoreError::Parse` rather than
/// being skipped, matching the single-record decode path in
/// `lookup.rs::taxid_to_node`.
fn load_map<T: serde::de::DeserializeOwned>(store: &Store, bucket: &str) -> gotaxon_store::Result<HashMap<String, T>> {
    let mut map = HashMap::new();
    let mut decode_err = None;
    let result = store.for_each(bucket, |key, value| {
        if decode_err.is_some() {
            return;
        }
        let key = String::from_utf8_lossy(key).into_owned();
        match serde_json::from_slice::<T>(value) {
            Ok(record) => {
                map.insert(key, record);
            },
            Err(e) => {
                decode_err = Some(StoreError::Parse(format!("{bucket}/{key}: {e}")));
            },
        }
    });

    match result {
        Ok(()) => {},
        Err(StoreError::BucketNotFound(_)) => return Ok(HashMap::new()),
        Err(e) => return Err(e),
    }
    if let Some(e) = decode_err {
        return Err(e);
    }
    Ok(map)
}
