//! Per-bucket importers: drive the parse/write pipeline against a
//! [`gotaxon_store::Store`] for each of the six taxonomy buckets.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use gotaxon_common::{Division, GenCode, Name, Node};
use gotaxon_store::Store;
use tracing::info;

use crate::parser::{parse_division_line, parse_gencode_line, parse_gi_taxid_line, parse_name_line, parse_node_line};
use crate::pipeline::{run_parse_write, spawn_line_reader, GI_TAXID_CHUNK_SIZE, STRUCTURED_CHUNK_SIZE};
use crate::Result;

pub const BUCKET_GI_TAXID_NUCL: &str = "gi_taxid_nucl";
pub const BUCKET_GI_TAXID_PROT: &str = "gi_taxid_prot";
pub const BUCKET_NODES: &str = "nodes";
pub const BUCKET_NAMES: &str = "names";
pub const BUCKET_DIVISIONS: &str = "divisions";
pub const BUCKET_GENCODES: &str = "gencodes";

/// Shared knobs for every importer.
#[derive(Debug, Clone)]
pub struct ImportOptions {
    /// Wipe the target bucket before importing (idempotent either way).
    pub force: bool,
    /// Override the default chunk size.
    pub chunk_size: Option<usize>,
    /// Number of concurrent parse workers.
    pub worker_count: usize,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            force: false,
            chunk_size: None,
            worker_count: num_cpus::get().max(1),
        }
    }
}

fn prepare_bucket(store: &Store, bucket: &str, opts: &ImportOptions) -> Result<()> {
    if opts.force {
        store.delete_bucket(bucket)?;
    }
    store.ensure_bucket(bucket)?;
    Ok(())
}

/// Import a `gi_taxid_nucl`/`gi_taxid_prot` dump: two tab-separated columns,
/// written directly as accession -> taxid.
pub async fn import_gi_taxid(store: Arc<Store>, bucket: &str, path: impl AsRef<Path>, opts: ImportOptions) -> Result<usize> {
    prepare_bucket(&store, bucket, &opts)?;
    let chunk_size = opts.chunk_size.unwrap_or(GI_TAXID_CHUNK_SIZE);
    let (chunks, reader) = spawn_line_reader(path, chunk_size);
    let bucket_owned = bucket.to_string();
    let store_for_writer = store.clone();

    let total = run_parse_write(
        chunks,
        opts.worker_count,
        |lines: Vec<String>| {
            lines
                .into_iter()
                .filter_map(|line| parse_gi_taxid_line(&line))
                .collect::<Vec<_>>()
        },
        move |batch: Vec<(String, String)>| {
            let entries: Vec<(Vec<u8>, Vec<u8>)> = batch
                .into_iter()
                .map(|(gi, taxid)| (gi.into_bytes(), taxid.into_bytes()))
                .collect();
            store_for_writer.put_all(&bucket_owned, &entries)?;
            Ok(())
        },
    )
    .await?;

    reader.await.map_err(|_| crate::ImportError::ChannelClosed)??;
    info!(bucket, total, "imported gi_taxid dump");
    Ok(total)
}

/// Import `nodes.dmp`: each row is compact-JSON-encoded and written keyed by
/// tax id.
pub async fn import_nodes(store: Arc<Store>, path: impl AsRef<Path>, opts: ImportOptions) -> Result<usize> {
    prepare_bucket(&store, BUCKET_NODES, &opts)?;
    let chunk_size = opts.chunk_size.unwrap_or(STRUCTURED_CHUNK_SIZE);
    let (chunks, reader) = spawn_line_reader(path, chunk_size);
    let store_for_writer = store.clone();

    let total = run_parse_write(
        chunks,
        opts.worker_count,
        |lines: Vec<String>| lines.iter().filter_map(|line| parse_node_line(line)).collect::<Vec<Node>>(),
        move |batch: Vec<Node>| {
            let mut entries = Vec::with_capacity(batch.len());
            for node in batch {
                let key = node.tax_id.clone().into_bytes();
                let value = serde_json::to_vec(&node)?;
                entries.push((key, value));
            }
            store_for_writer.put_all(BUCKET_NODES, &entries)?;
            Ok(())
        },
    )
    .await?;

    reader.await.map_err(|_| crate::ImportError::ChannelClosed)??;
    info!(total, "imported nodes dump");
    Ok(total)
}

/// Import `division.dmp`.
pub async fn import_division(store: Arc<Store>, path: impl AsRef<Path>, opts: ImportOptions) -> Result<usize> {
    prepare_bucket(&store, BUCKET_DIVISIONS, &opts)?;
    let chunk_size = opts.chunk_size.unwrap_or(STRUCTURED_CHUNK_SIZE);
    let (chunks, reader) = spawn_line_reader(path, chunk_size);
    let store_for_writer = store.clone();

    let total = run_parse_write(
        chunks,
        opts.worker_count,
        |lines: Vec<String>| {
            lines
                .iter()
                .filter_map(|line| parse_division_line(line))
                .collect::<Vec<Division>>()
        },
        move |batch: Vec<Division>| {
            let mut entries = Vec::with_capacity(batch.len());
            for division in batch {
                let key = division.division_id.clone().into_bytes();
                let value = serde_json::to_vec(&division)?;
                entries.push((key, value));
            }
            store_for_writer.put_all(BUCKET_DIVISIONS, &entries)?;
            Ok(())
        },
    )
    .await?;

    reader.await.map_err(|_| crate::ImportError::ChannelClosed)??;
    info!(total, "imported division dump");
    Ok(total)
}

/// Import `gencode.dmp`.
pub async fn import_gencode(store: Arc<Store>, path: impl AsRef<Path>, opts: ImportOptions) -> Result<usize> {
    prepare_bucket(&store, BUCKET_GENCODES, &opts)?;
    let chunk_size = opts.chunk_size.unwrap_or(STRUCTURED_CHUNK_SIZE);
    let (chunks, reader) = spawn_line_reader(path, chunk_size);
    let store_for_writer = store.clone();

    let total = run_parse_write(
        chunks,
        opts.worker_count,
        |lines: Vec<String>| {
            lines
                .iter()
                .filter_map(|line| parse_gencode_line(line))
                .collect::<Vec<GenCode>>()
        },
        move |batch: Vec<GenCode>| {
            let mut entries = Vec::with_capacity(batch.len());
            for gencode in batch {
                let key = gencode.gen_code_id.clone().into_bytes();
                let value = serde_json::to_vec(&gencode)?;
                entries.push((key, value));
            }
            store_for_writer.put_all(BUCKET_GENCODES, &entries)?;
            Ok(())
        },
    )
    .await?;

    reader.await.map_err(|_| crate::ImportError::ChannelClosed)??;
    info!(total, "imported gencode dump");
    Ok(total)
}

/// Import `names.dmp`. Unlike the other structured dumps, a tax id may
/// appear on many rows; every `NameItem` for a tax id must be merged into one
/// record before it is written, so this importer accumulates in memory for
/// the whole file before doing a single batch write, mirroring the Go
/// original's `MergeNames` behavior.
pub async fn import_names(store: Arc<Store>, path: impl AsRef<Path>, opts: ImportOptions) -> Result<usize> {
    prepare_bucket(&store, BUCKET_NAMES, &opts)?;
    let chunk_size = opts.chunk_size.unwrap_or(STRUCTURED_CHUNK_SIZE);
    let (chunks, reader) = spawn_line_reader(path, chunk_size);

    let merged: Arc<std::sync::Mutex<HashMap<String, Name>>> = Arc::new(std::sync::Mutex::new(HashMap::new()));
    let merged_for_writer = merged.clone();

    let total = run_parse_write(
        chunks,
        opts.worker_count,
        |lines: Vec<String>| lines.iter().filter_map(|line| parse_name_line(line)).collect::<Vec<Name>>(),
        move |batch: Vec<Name>| {
            let mut table = merged_for_writer.lock().expect("names merge mutex poisoned");
            for name in batch {
                match table.entry(name.tax_id.clone()) {
                    Entry::Occupied(mut entry) => entry.get_mut().merge(std::slice::from_ref(&name)),
                    Entry::Vacant(entry) => {
                        entry.insert(name);
                    },
                }
            }
            Ok(())
        },
    )
    .await?;

    reader.await.map_err(|_| crate::ImportError::ChannelClosed)??;

    let table = Arc::try_unwrap(merged)
        .unwrap_or_else(|arc| std::sync::Mutex::new(arc.lock().expect("names merge mutex poisoned").clone()))
        .into_inner()
        .expect("names merge mutex poisoned");

    let mut entries = Vec::with_capacity(table.len());
    for (tax_id, name) in table {
        let value = serde_json::to_vec(&name)?;
        entries.push((tax_id.into_bytes(), value));
    }
    store.put_all(BUCKET_NAMES, &entries)?;

    info!(total, records = entries.len(), "imported names dump");
    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[tokio::test]
    async fn import_gi_taxid_writes_every_row() {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(Store::open(dir.path().join("test.db")).unwrap());
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "1\t9606").unwrap();
        writeln!(file, "2\t9605").unwrap();

        let total = import_gi_taxid(store.clone(), BUCKET_GI_TAXID_PROT, file.path(), ImportOptions::default())
            .await
            .unwrap();
        assert_eq!(total, 2);
        assert_eq!(store.get(BUCKET_GI_TAXID_PROT, "1").unwrap(), Some(b"9606".to_vec()));
    }

    #[tokio::test]
    async fn import_names_merges_rows_sharing_a_tax_id() {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(Store::open(dir.path().join("test.db")).unwrap());
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "9606\t|\tHomo sapiens\t|\t\t|\tscientific name\t|").unwrap();
        writeln!(file, "9606\t|\thuman\t|\t\t|\tgenbank common name\t|").unwrap();

        import_names(store.clone(), file.path(), ImportOptions::default()).await.unwrap();

        let raw = store.get(BUCKET_NAMES, "9606").unwrap().unwrap();
        let name: Name = serde_json::from_slice(&raw).unwrap();
        assert_eq!(name.names.len(), 2);
        assert_eq!(name.scientific_name(), Some("Homo sapiens"));
    }

    #[tokio::test]
    async fn force_reimport_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(Store::open(dir.path().join("test.db")).unwrap());
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "1\t9606").unwrap();

        let opts = ImportOptions {
            force: true,
            ..ImportOptions::default()
        };
        import_gi_taxid(store.clone(), BUCKET_GI_TAXID_NUCL, file.path(), opts.clone())
            .await
            .unwrap();
        import_gi_taxid(store.clone(), BUCKET_GI_TAXID_NUCL, file.path(), opts)
            .await
            .unwrap();
        assert_eq!(store.get(BUCKET_GI_TAXID_NUCL, "1").unwrap(), Some(b"9606".to_vec()));
    }
}
