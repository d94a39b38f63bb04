//! `gotaxon db import` — drives a single bulk import, grounded on
//! `original_source/cmd/import.go`'s `fileType` switch.

use std::path::Path;
use std::sync::Arc;

use gotaxon_import::importers::{BUCKET_GI_TAXID_NUCL, BUCKET_GI_TAXID_PROT};
use gotaxon_import::{import_division, import_gencode, import_gi_taxid, import_names, import_nodes, ImportOptions};
use gotaxon_store::Store;
use tracing::info;

use crate::error::{CliError, Result};

pub async fn run(db_path: &Path, data_type: &str, force: bool, chunk_size: Option<usize>, file: &Path) -> Result<()> {
    let store = Arc::new(Store::open(db_path)?);
    let opts = ImportOptions {
        force,
        chunk_size,
        ..ImportOptions::default()
    };

    let total = match data_type {
        "gi_taxid_nucl" => import_gi_taxid(store, BUCKET_GI_TAXID_NUCL, file, opts).await?,
        "gi_taxid_prot" => import_gi_taxid(store, BUCKET_GI_TAXID_PROT, file, opts).await?,
        "nodes" => import_nodes(store, file, opts).await?,
        "names" => import_names(store, file, opts).await?,
        "divisions" => import_division(store, file, opts).await?,
        "gencodes" => import_gencode(store, file, opts).await?,
        other => return Err(CliError::usage(format!("unsupported data type: {other}"))),
    };

    info!(data_type, total, file = %file.display(), "import complete");
    println!("imported {total} records from {} into {data_type}", file.display());
    Ok(())
}
