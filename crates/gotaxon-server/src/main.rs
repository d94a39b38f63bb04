//! gotaxon-server — standalone entry point. `gotaxon-cli`'s `server`
//! subcommand calls [`gotaxon_server::run`] directly in-process; this binary
//! exists for running the query service on its own.

use anyhow::Result;
use clap::Parser;
use gotaxon_common::logging::{init_logging, LogConfig};
use gotaxon_server::config::{DEFAULT_PORT, DEFAULT_THREADS, DEFAULT_TIMEOUT_SECS};
use gotaxon_server::ServerConfig;

#[derive(Parser, Debug)]
#[command(name = "gotaxon-server", about = "gotaxon taxonomy query server")]
struct Args {
    /// Path to the store file.
    #[arg(short = 'd', long = "db", env = "GOTAXON_DB_PATH")]
    db_path: std::path::PathBuf,

    #[arg(short = 'P', long, default_value_t = DEFAULT_PORT)]
    port: u16,

    #[arg(short = 'j', long, default_value_t = DEFAULT_THREADS)]
    threads: usize,

    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    timeout: u64,
}

#[tokio::main]
async fn main() -> Result<()> {
    let log_config = LogConfig::builder()
        .log_file_prefix("gotaxon-server".to_string())
        .filter_directives("gotaxon_server=info,tower_http=info,axum=warn".to_string())
        .build();
    let log_config = LogConfig::from_env().unwrap_or(log_config);
    init_logging(&log_config)?;

    let args = Args::parse();
    let config = ServerConfig::new(args.db_path, args.port, args.threads, args.timeout);

    gotaxon_server::run(config).await
}
