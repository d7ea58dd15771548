//! Binary crate for the `solar-dashboard` web server.
//!
//! This crate focuses on:
//! - Parsing CLI arguments
//! - Serving the dashboard page and the radiation JSON endpoint
//! - One-shot catalog and forecast commands for the terminal

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod page;
mod routes;
mod server;
mod state;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cmd = cli::Cli::parse();
    cmd.run().await
}
