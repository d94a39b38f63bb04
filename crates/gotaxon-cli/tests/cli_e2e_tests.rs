//! End-to-end tests for the `gotaxon` binary: import a tiny dump, then query
//! it back out via `cli local`, exercising the same path a real operator
//! would (spec §8 end-to-end scenario 1).

use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;

fn gotaxon() -> Command {
    Command::cargo_bin("gotaxon").unwrap()
}

#[test]
fn import_then_local_query_round_trips_a_gi_taxid_pair() {
    let dir = tempfile::tempdir().unwrap();
    let db_dir = dir.path().join("store");
    let mut dump = tempfile::NamedTempFile::new().unwrap();
    writeln!(dump, "12345\t9606").unwrap();

    gotaxon()
        .args(["--db-dir", db_dir.to_str().unwrap()])
        .args(["db", "import", "-t", "gi_taxid_prot"])
        .arg(dump.path())
        .assert()
        .success();

    gotaxon()
        .args(["--db-dir", db_dir.to_str().unwrap()])
        .args(["cli", "local", "-t", "gi_taxid_prot", "12345", "99999"])
        .assert()
        .success()
        .stdout(predicate::str::contains("12345\t9606"))
        .stdout(predicate::str::contains("99999\t"));
}

#[test]
fn db_import_rejects_an_unsupported_data_type() {
    let dir = tempfile::tempdir().unwrap();
    let db_dir = dir.path().join("store");
    let dump = tempfile::NamedTempFile::new().unwrap();

    gotaxon()
        .args(["--db-dir", db_dir.to_str().unwrap()])
        .args(["db", "import", "-t", "bogus"])
        .arg(dump.path())
        .assert()
        .failure();
}

#[test]
fn cli_local_requires_queries_or_a_file() {
    let dir = tempfile::tempdir().unwrap();
    let db_dir = dir.path().join("store");

    gotaxon()
        .args(["--db-dir", db_dir.to_str().unwrap()])
        .args(["cli", "local", "-t", "gi_taxid_prot"])
        .assert()
        .failure();
}
