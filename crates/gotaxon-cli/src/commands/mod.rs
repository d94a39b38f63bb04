//! Command handlers, one module per `gotaxon` subcommand.

pub mod db;
pub mod local;
pub mod remote;
pub mod server;

mod batch;
