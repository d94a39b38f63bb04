//! Bounded producer/worker/writer pipeline for importing a dump file.
//!
//! A reader task streams the file (transparently gunzipping if the name ends
//! in `.gz`) in line chunks, pushing them into a bounded channel; a small
//! pool of blocking parse workers drain that channel and emit typed record
//! batches on a second bounded channel; a single writer task receives
//! batches and persists them. Channel capacity is the only backpressure
//! mechanism — nothing buffers unboundedly.

use flate2::read::GzDecoder;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::{ImportError, Result};

/// Default chunk size for the large `gi_taxid_*` dumps.
pub const GI_TAXID_CHUNK_SIZE: usize = 100_000;

/// Default chunk size for the smaller structured dumps (`nodes`, `names`,
/// `division`, `gencode`).
pub const STRUCTURED_CHUNK_SIZE: usize = 10_000;

fn open_maybe_gzipped(path: &Path) -> std::io::Result<Box<dyn Read + Send>> {
    let file = File::open(path)?;
    if path.extension().and_then(|e| e.to_str()) == Some("gz") {
        Ok(Box::new(GzDecoder::new(file)))
    } else {
        Ok(Box::new(file))
    }
}

/// Read `path` line-by-line into chunks of `chunk_size`, sending each chunk
/// on `tx`. Runs to completion on a blocking thread since file I/O and
/// gunzipping are not async.
pub fn spawn_line_reader(path: impl AsRef<Path>, chunk_size: usize) -> (mpsc::Receiver<Vec<String>>, JoinHandle<Result<()>>) {
    let path = path.as_ref().to_path_buf();
    let (tx, rx) = mpsc::channel(4);
    let handle = tokio::task::spawn_blocking(move || -> Result<()> {
        let reader = open_maybe_gzipped(&path)?;
        let mut reader = BufReader::new(reader);
        let mut chunk = Vec::with_capacity(chunk_size);
        let mut line = String::new();
        loop {
            line.clear();
            let bytes = reader.read_line(&mut line)?;
            if bytes == 0 {
                break;
            }
            chunk.push(std::mem::take(&mut line));
            if chunk.len() >= chunk_size {
                if tx.blocking_send(std::mem::replace(&mut chunk, Vec::with_capacity(chunk_size))).is_err() {
                    return Ok(());
                }
            }
        }
        if !chunk.is_empty() {
            let _ = tx.blocking_send(chunk);
        }
        Ok(())
    });
    (rx, handle)
}

/// Drive a chunk-receiving channel through `parse` (run on a blocking-pool
/// worker per chunk, bounded by `worker_count` concurrent tasks) and forward
/// each non-empty parsed batch to `writer`, which runs batches in arrival
/// order.
pub async fn run_parse_write<T, P, W>(
    mut chunks: mpsc::Receiver<Vec<String>>,
    worker_count: usize,
    parse: P,
    mut writer: W,
) -> Result<usize>
where
    T: Send + 'static,
    P: Fn(Vec<String>) -> Vec<T> + Send + Sync + Clone + 'static,
    W: FnMut(Vec<T>) -> Result<()>,
{
    let (batch_tx, mut batch_rx) = mpsc::channel::<Vec<T>>(worker_count.max(1));
    let mut in_flight = Vec::new();
    let mut total = 0usize;

    let writer_task = tokio::spawn(async move {
        let mut count = 0usize;
        while let Some(batch) = batch_rx.recv().await {
            count += batch.len();
            if let Err(e) = writer(batch) {
                return Err(e);
            }
        }
        Ok(count)
    });

    while let Some(lines) = chunks.recv().await {
        let parse = parse.clone();
        let tx = batch_tx.clone();
        while in_flight.len() >= worker_count.max(1) {
            in_flight.remove(0).await.map_err(|_| ImportError::ChannelClosed)??;
        }
        let task: JoinHandle<Result<()>> = tokio::task::spawn_blocking(move || {
            let parsed = parse(lines);
            tx.blocking_send(parsed).map_err(|_| ImportError::ChannelClosed)
        });
        in_flight.push(task);
    }

    for task in in_flight {
        task.await.map_err(|_| ImportError::ChannelClosed)??;
    }
    drop(batch_tx);

    total += writer_task.await.map_err(|_| ImportError::ChannelClosed)??;
    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[tokio::test]
    async fn line_reader_chunks_a_plain_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        for i in 0..25 {
            writeln!(file, "line-{i}").unwrap();
        }
        let (mut rx, handle) = spawn_line_reader(file.path(), 10);
        let mut seen = 0usize;
        while let Some(chunk) = rx.recv().await {
            seen += chunk.len();
        }
        handle.await.unwrap().unwrap();
        assert_eq!(seen, 25);
    }

    #[tokio::test]
    async fn run_parse_write_counts_every_parsed_row() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        for i in 0..40 {
            writeln!(file, "{i}").unwrap();
        }
        let (chunks, reader_handle) = spawn_line_reader(file.path(), 7);
        let written = std::sync::Arc::new(std::sync::Mutex::new(Vec::new()));
        let written_clone = written.clone();

        let total = run_parse_write(
            chunks,
            3,
            |lines: Vec<String>| lines.into_iter().filter_map(|l| l.trim().parse::<i64>().ok()).collect::<Vec<_>>(),
            move |batch: Vec<i64>| {
                written_clone.lock().unwrap().extend(batch);
                Ok(())
            },
        )
        .await
        .unwrap();

        reader_handle.await.unwrap().unwrap();
        assert_eq!(total, 40);
        assert_eq!(written.lock().unwrap().len(), 40);
    }
}
