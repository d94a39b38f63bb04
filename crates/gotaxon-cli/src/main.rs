//! gotaxon — NCBI taxonomy query engine CLI. Ported from
//! `original_source/cmd/root.go`'s `Execute`/`os.Exit(-1)` idiom.

use clap::Parser;
use gotaxon_cli::config::Config;
use gotaxon_cli::{CliQueryCommand, Cli, Commands, DbCommand};
use gotaxon_common::logging::{init_logging, LogConfig, LogLevel, LogOutput};
use std::process;
use tracing::error;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_config = if cli.verbose {
        LogConfig::builder()
            .level(LogLevel::Debug)
            .output(LogOutput::Console)
            .log_file_prefix("gotaxon".to_string())
            .build()
    } else {
        LogConfig::builder()
            .level(LogLevel::Warn)
            .output(LogOutput::Console)
            .log_file_prefix("gotaxon".to_string())
            .build()
    };
    let log_config = LogConfig::from_env().unwrap_or(log_config);
    let _ = init_logging(&log_config);

    if let Err(e) = run(&cli).await {
        error!(error = %e, "command failed");
        eprintln!("Error: {e}");
        process::exit(-1);
    }
}

async fn run(cli: &Cli) -> gotaxon_cli::Result<()> {
    let mut config = Config::load()?;
    if let Some(db_dir) = &cli.db_dir {
        config.db_dir = db_dir.clone();
    }
    if let Some(db_file) = &cli.db_file {
        config.db_file = db_file.clone();
    }
    let db_path = config.db_path();

    match &cli.command {
        Commands::Db { command } => match command {
            DbCommand::Import {
                data_type,
                force,
                chunk_size,
                file,
            } => gotaxon_cli::commands::db::run(&db_path, data_type, *force, *chunk_size, file).await,
        },
        Commands::Cli { command } => match command {
            CliQueryCommand::Local {
                data_type,
                file,
                batch_size,
                args,
            } => gotaxon_cli::commands::local::run(&db_path, data_type, file.as_deref(), *batch_size, args).await,
            CliQueryCommand::Remote {
                host,
                port,
                data_type,
                file,
                batch_size,
                threads,
                args,
            } => gotaxon_cli::commands::remote::run(host, *port, data_type, file.as_deref(), *batch_size, *threads, args).await,
        },
        Commands::Server { port, threads, timeout } => gotaxon_cli::commands::server::run(&db_path, *port, *threads, *timeout).await,
    }
}
