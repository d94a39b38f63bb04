//! Batch-file query reading, grounded on `original_source/cmd/local.go` and
//! `cmd/remote.go`'s shared `fileutil.ReadFileWithBuffer` usage: one query
//! per line, blank lines skipped, grouped into fixed-size batches.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::Result;

pub fn read_query_batches(path: impl AsRef<Path>, batch_size: usize) -> Result<Vec<Vec<String>>> {
    let batch_size = batch_size.max(1);
    let file = File::open(path)?;
    let reader = BufReader::new(file);

    let mut batches = Vec::new();
    let mut current = Vec::with_capacity(batch_size);
    for line in reader.lines() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        current.push(trimmed.to_string());
        if current.len() >= batch_size {
            batches.push(std::mem::replace(&mut current, Vec::with_capacity(batch_size)));
        }
    }
    if !current.is_empty() {
        batches.push(current);
    }
    Ok(batches)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn splits_into_fixed_size_batches_skipping_blank_lines() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "1").unwrap();
        writeln!(file).unwrap();
        writeln!(file, "2").unwrap();
        writeln!(file, "3").unwrap();

        let batches = read_query_batches(file.path(), 2).unwrap();
        assert_eq!(batches, vec![vec!["1".to_string(), "2".to_string()], vec!["3".to_string()]]);
    }
}
