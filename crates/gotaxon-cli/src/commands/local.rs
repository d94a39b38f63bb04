//! `gotaxon cli local` — in-process query against a store opened read-only,
//! ported from `original_source/cmd/local.go`.

use std::path::Path;

use gotaxon_store::Store;

use super::batch::read_query_batches;
use crate::error::{CliError, Result};

pub async fn run(db_path: &Path, data_type: &str, file: Option<&Path>, batch_size: usize, args: &[String]) -> Result<()> {
    if data_type != "gi_taxid_nucl" && data_type != "gi_taxid_prot" {
        return Err(CliError::usage(format!("unsupported data type: {data_type}")));
    }

    let store = Store::open(db_path)?;

    match file {
        Some(path) => {
            for batch in read_query_batches(path, batch_size)? {
                query_and_print(&store, data_type, &batch)?;
            }
        },
        None => {
            if args.is_empty() {
                return Err(CliError::usage("queries needed: pass accession ids as arguments or -f <file>"));
            }
            query_and_print(&store, data_type, args)?;
        },
    }

    Ok(())
}

fn query_and_print(store: &Store, bucket: &str, gis: &[String]) -> Result<()> {
    let taxids = gotaxon_query::gi_to_taxid(store, bucket, gis)?;
    for gi in gis {
        let taxid = taxids.get(gi).cloned().unwrap_or_default();
        println!("{gi}\t{taxid}");
    }
    Ok(())
}
