//! `gotaxon server` — runs `gotaxon-server` in this process, ported from
//! `original_source/cmd/server.go`'s `StartServer` call.

use std::path::Path;

use gotaxon_server::ServerConfig;

use crate::error::Result;

pub async fn run(db_path: &Path, port: u16, threads: usize, timeout_secs: u64) -> Result<()> {
    let config = ServerConfig::new(db_path, port, threads, timeout_secs);
    gotaxon_server::run(config).await?;
    Ok(())
}
