use crate::{Result, StoreError};
use bbolt_rs::{BucketApi, BucketRwApi, TxApi, TxRwApi, TxMut, Tx, DB};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

fn bolt_err(e: impl std::fmt::Display) -> bbolt_rs::Error {
    bbolt_rs::Error::Unexpected(e.to_string())
}

/// A single bucketed key-value database file.
///
/// Reads use `bbolt_rs`'s MVCC snapshot transactions and may run concurrently;
/// writes are serialized through an internal mutex, matching bbolt's
/// single-writer contract. `DB::update`/`DB::view` run the given closure
/// inside a managed transaction, committing (or rolling back, for reads)
/// automatically when the closure returns.
pub struct Store {
    db: Mutex<DB>,
    path: PathBuf,
}

impl Store {
    /// Open (creating if absent) the database file at `path`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let db = DB::open(&path).map_err(|e| StoreError::Bolt(e.to_string()))?;
        Ok(Self {
            db: Mutex::new(db),
            path,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Run `f` inside a single exclusive write transaction. On `Ok`, the
    /// transaction commits atomically; on `Err`, it rolls back and the
    /// error is returned.
    pub fn with_write_tx<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut TxMut) -> Result<T>,
    {
        let mut db = self.db.lock().expect("store mutex poisoned");
        let mut out = None;
        db.update(|tx| {
            out = Some(f(tx));
            match &out {
                Some(Ok(_)) => Ok(()),
                _ => Err(bolt_err("transaction body failed")),
            }
        })
        .map_err(|e| StoreError::Bolt(e.to_string()))?;
        out.expect("update closure always runs")
    }

    /// Run `f` inside a read-only, consistent snapshot transaction.
    pub fn with_read_tx<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Tx) -> Result<T>,
    {
        let db = self.db.lock().expect("store mutex poisoned");
        let mut out = None;
        db.view(|tx| {
            out = Some(f(tx));
            Ok(())
        })
        .map_err(|e| StoreError::Bolt(e.to_string()))?;
        out.expect("view closure always runs")
    }

    /// Create `bucket` if it does not already exist, doing nothing otherwise.
    pub fn ensure_bucket(&self, bucket: &str) -> Result<()> {
        self.with_write_tx(|tx| {
            tx.create_bucket_if_not_exists(bucket.as_bytes())
                .map_err(|e| StoreError::Bolt(e.to_string()))?;
            Ok(())
        })
    }

    /// Delete `bucket`. Idempotent: deleting an absent bucket is not an
    /// error, mirroring the Go original's `CreateBucketIfNotExists` followed
    /// by `DeleteBucket` pattern.
    pub fn delete_bucket(&self, bucket: &str) -> Result<()> {
        self.with_write_tx(|tx| {
            tx.create_bucket_if_not_exists(bucket.as_bytes())
                .map_err(|e| StoreError::Bolt(e.to_string()))?;
            tx.delete_bucket(bucket.as_bytes())
                .map_err(|e| StoreError::Bolt(e.to_string()))?;
            Ok(())
        })
    }

    /// Write every `(key, value)` pair into `bucket` inside one transaction.
    pub fn put_all(&self, bucket: &str, entries: &[(Vec<u8>, Vec<u8>)]) -> Result<()> {
        self.with_write_tx(|tx| {
            let mut b = tx
                .create_bucket_if_not_exists(bucket.as_bytes())
                .map_err(|e| StoreError::Bolt(e.to_string()))?;
            for (key, value) in entries {
                b.put(key, value).map_err(|e| StoreError::Bolt(e.to_string()))?;
            }
            Ok(())
        })
    }

    /// Point lookup. Returns `None` if the key is absent from `bucket`;
    /// fails with `BucketNotFound` if `bucket` itself does not exist,
    /// matching the Go original's `if b == nil { return ... }` check.
    pub fn get(&self, bucket: &str, key: &str) -> Result<Option<Vec<u8>>> {
        self.with_read_tx(|tx| {
            let Some(b) = tx.bucket(bucket.as_bytes()) else {
                return Err(StoreError::BucketNotFound(bucket.to_string()));
            };
            Ok(b.get(key.as_bytes()).map(|v| v.to_vec()))
        })
    }

    /// Iterate every key/value pair in `bucket` in lexicographic key order.
    /// Fails with `BucketNotFound` if `bucket` does not exist.
    pub fn for_each<F>(&self, bucket: &str, mut f: F) -> Result<()>
    where
        F: FnMut(&[u8], &[u8]),
    {
        self.with_read_tx(|tx| {
            let Some(b) = tx.bucket(bucket.as_bytes()) else {
                return Err(StoreError::BucketNotFound(bucket.to_string()));
            };
            b.for_each(|k, v| {
                f(k, v);
                Ok(())
            })
            .map_err(|e| StoreError::Bolt(e.to_string()))?;
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ensure_bucket_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::open(dir.path().join("test.db")).unwrap();
        store.ensure_bucket("nodes").unwrap();
        store.ensure_bucket("nodes").unwrap();
    }

    #[test]
    fn delete_bucket_on_absent_bucket_is_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::open(dir.path().join("test.db")).unwrap();
        store.delete_bucket("never-created").unwrap();
    }

    #[test]
    fn put_get_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::open(dir.path().join("test.db")).unwrap();
        store
            .put_all("gi_taxid_prot", &[(b"12345".to_vec(), b"9606".to_vec())])
            .unwrap();

        let value = store.get("gi_taxid_prot", "12345").unwrap();
        assert_eq!(value, Some(b"9606".to_vec()));
        assert_eq!(store.get("gi_taxid_prot", "missing").unwrap(), None);
    }

    #[test]
    fn get_on_an_absent_bucket_is_bucket_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::open(dir.path().join("test.db")).unwrap();
        let err = store.get("never-created", "1").unwrap_err();
        assert!(matches!(err, StoreError::BucketNotFound(b) if b == "never-created"));
    }

    #[test]
    fn for_each_on_an_absent_bucket_is_bucket_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::open(dir.path().join("test.db")).unwrap();
        let err = store.for_each("never-created", |_, _| {}).unwrap_err();
        assert!(matches!(err, StoreError::BucketNotFound(b) if b == "never-created"));
    }

    #[test]
    fn for_each_visits_every_entry() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::open(dir.path().join("test.db")).unwrap();
        store
            .put_all(
                "nodes",
                &[
                    (b"1".to_vec(), b"root".to_vec()),
                    (b"2".to_vec(), b"child".to_vec()),
                ],
            )
            .unwrap();

        let mut seen = Vec::new();
        store
            .for_each("nodes", |k, v| {
                seen.push((k.to_vec(), v.to_vec()));
            })
            .unwrap();
        assert_eq!(seen.len(), 2);
    }
}
