//! gotaxon CLI library
//!
//! One binary (`gotaxon`) with three command groups, ported from
//! `original_source/cmd/{root,import,local,remote,server}.go`:
//!
//! - `db import` drives the bulk importer directly against the configured store.
//! - `cli local`/`cli remote` query a store in-process or over HTTP.
//! - `server` starts the query service in this process.

pub mod api;
pub mod commands;
pub mod config;
pub mod error;

pub use error::{CliError, Result};

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "gotaxon", author, version, about = "NCBI taxonomy query engine: bulk import, local/remote query, HTTP server")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Database directory (overrides `~/.gotaxon.toml` and `GOTAXON_DB_DIR`).
    #[arg(long, global = true)]
    pub db_dir: Option<std::path::PathBuf>,

    /// Database file name within the database directory.
    #[arg(long, global = true)]
    pub db_file: Option<String>,

    /// Verbose (debug-level) logging to the console.
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Bulk-import a taxonomy dump file.
    Db {
        #[command(subcommand)]
        command: DbCommand,
    },
    /// Query a store, locally or over HTTP.
    Cli {
        #[command(subcommand)]
        command: CliQueryCommand,
    },
    /// Start the HTTP query server.
    Server {
        /// Port to listen on.
        #[arg(short = 'P', long, default_value_t = gotaxon_server::config::DEFAULT_PORT)]
        port: u16,

        /// Number of concurrent pooled store readers.
        #[arg(short = 'j', long, default_value_t = gotaxon_server::config::DEFAULT_THREADS)]
        threads: usize,

        /// Per-request read/write timeout, in seconds.
        #[arg(long, default_value_t = gotaxon_server::config::DEFAULT_TIMEOUT_SECS)]
        timeout: u64,
    },
}

#[derive(Subcommand, Debug)]
pub enum DbCommand {
    /// Import a dump file into a named bucket.
    Import {
        /// Dump type: `gi_taxid_nucl`, `gi_taxid_prot`, `nodes`, `names`, `divisions`, or `gencodes`.
        #[arg(short = 't', long = "type")]
        data_type: String,

        /// Delete the target bucket before importing.
        #[arg(short, long)]
        force: bool,

        /// Override the default chunk size.
        #[arg(short, long)]
        chunk_size: Option<usize>,

        /// Path to the dump file (transparently gunzipped if it ends in `.gz`).
        file: std::path::PathBuf,
    },
}

#[derive(Subcommand, Debug)]
pub enum CliQueryCommand {
    /// Query a store opened read-only in this process.
    Local {
        /// Data type: `gi_taxid_nucl` or `gi_taxid_prot`.
        #[arg(short = 't', long = "type")]
        data_type: String,

        /// Read queries from a file, one accession per line, instead of `args`.
        #[arg(short = 'f', long)]
        file: Option<std::path::PathBuf>,

        /// Batch size when reading queries from a file.
        #[arg(short = 'b', long = "batch-size", default_value_t = 10_000)]
        batch_size: usize,

        /// Accession ids to query (ignored when `-f` is given).
        args: Vec<String>,
    },
    /// Query a `gotaxon-server` instance over HTTP.
    Remote {
        /// Server host.
        #[arg(short = 'H', long, default_value = "127.0.0.1")]
        host: String,

        /// Server port.
        #[arg(short = 'P', long, default_value_t = 8080)]
        port: u16,

        /// Data type: `gi_taxid_nucl` or `gi_taxid_prot`.
        #[arg(short = 't', long = "type")]
        data_type: String,

        /// Read queries from a file, one accession per line, instead of `args`.
        #[arg(short = 'f', long)]
        file: Option<std::path::PathBuf>,

        /// Batch size when reading queries from a file.
        #[arg(short = 'b', long = "batch-size", default_value_t = 1_000)]
        batch_size: usize,

        /// Number of concurrent in-flight requests when querying from a file.
        #[arg(short = 'j', long, default_value_t = 4)]
        threads: usize,

        /// Accession ids to query (ignored when `-f` is given).
        args: Vec<String>,
    },
}
