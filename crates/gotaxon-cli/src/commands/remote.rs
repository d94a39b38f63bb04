//! `gotaxon cli remote` — HTTP query against a running `gotaxon-server`,
//! ported from `original_source/cmd/remote.go`. Unlike the Go original, the
//! `gi_taxid_nucl` case honours the caller's requested bucket rather than
//! silently querying `gi_taxid_prot` (spec §9 Open Question (b); see
//! DESIGN.md).

use std::path::Path;
use std::sync::Arc;

use futures::stream::{FuturesUnordered, StreamExt};
use tokio::sync::Semaphore;

use super::batch::read_query_batches;
use crate::api::ApiClient;
use crate::error::{CliError, Result};

pub async fn run(
    host: &str,
    port: u16,
    data_type: &str,
    file: Option<&Path>,
    batch_size: usize,
    threads: usize,
    args: &[String],
) -> Result<()> {
    if data_type != "gi_taxid_nucl" && data_type != "gi_taxid_prot" {
        return Err(CliError::usage(format!("unsupported data type: {data_type}")));
    }

    let client = Arc::new(ApiClient::new(host, port)?);

    match file {
        Some(path) => {
            let batches = read_query_batches(path, batch_size)?;
            let semaphore = Arc::new(Semaphore::new(threads.max(1)));
            let mut in_flight = FuturesUnordered::new();

            for batch in batches {
                let client = client.clone();
                let semaphore = semaphore.clone();
                let data_type = data_type.to_string();
                in_flight.push(tokio::spawn(async move {
                    let _permit = semaphore.acquire_owned().await.expect("semaphore closed");
                    let taxids = client.gi_to_taxid(&data_type, &batch).await;
                    (batch, taxids)
                }));
            }

            // Results print in arrival (completion) order, not input order,
            // matching spec §4.6/§5's batch command-line mode.
            while let Some(joined) = in_flight.next().await {
                let (batch, taxids) = joined.map_err(|e| CliError::Remote(e.to_string()))?;
                print_batch(&batch, taxids?);
            }
        },
        None => {
            if args.is_empty() {
                return Err(CliError::usage("queries needed: pass accession ids as arguments or -f <file>"));
            }
            let taxids = client.gi_to_taxid(data_type, args).await?;
            print_batch(args, taxids);
        },
    }

    Ok(())
}

fn print_batch(gis: &[String], taxids: std::collections::HashMap<String, String>) {
    for gi in gis {
        let taxid = taxids.get(gi).cloned().unwrap_or_default();
        println!("{gi}\t{taxid}");
    }
}
