//! `readinglist-server` entry point.
//!
//! # Usage
//!
//! ```bash
//! # Defaults: 0.0.0.0:8080, ./readinglist.sqlite3, logs on stderr
//! readinglist-server
//!
//! # Environment and flags are interchangeable
//! PORT=9000 BANNER_MESSAGE="Happy reading" readinglist-server --db-path /var/lib/books.sqlite3
//! ```

use anyhow::anyhow;
use clap::Parser;
use readinglist_server::{run_server, ServerConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServerConfig::parse();

    readinglist_core::init_logging(&config.log_level, config.log_dir.as_deref())
        .map_err(|err| anyhow!("logging init failed: {err}"))?;

    run_server(config).await
}
