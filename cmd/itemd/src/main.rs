//! itemd - HTTP service for the embedded item store.

mod codec;
mod config;
mod server;


use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use itemkv::{Diagnostics, EmbeddedProbe, ItemStore};
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::server::AppState;

/// HTTP service for the embedded item store.
#[derive(Parser, Debug)]
#[command(name = "itemd")]
#[command(about = "CRUD service for items with exact-name search")]
#[command(version)]
struct Args {
    /// Config file (YAML)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Listen address, overrides the config (e.g. :8080)
    #[arg(short, long)]
    listen: Option<String>,

    /// Verbose output
    #[arg(short = 'v', long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    if let Some(listen) = args.listen {
        config.listen = listen;
    }

    // Setup logging; RUST_LOG wins over the config.
    let level = if args.verbose {
        "debug"
    } else {
        config.log_level.as_str()
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let listener = tokio::net::TcpListener::bind(config.listen_addr()?).await?;
    let port = listener.local_addr()?.port();

    let store = Arc::new(ItemStore::new());
    let diagnostics = Diagnostics::new(store.clone(), Box::new(EmbeddedProbe::new(Some(port))));

    server::serve(listener, AppState::new(store, diagnostics)).await
}
