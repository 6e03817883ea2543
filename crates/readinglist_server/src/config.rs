//! Server configuration resolved from flags and environment variables.
//!
//! # Invariants
//! - Every setting has a default, so an empty environment still starts.
//! - Handlers read configuration from [`ServerConfig`], never from the
//!   process environment.

use clap::Parser;
use readinglist_core::default_log_level;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

/// Reading list HTTP service
#[derive(Debug, Clone, Parser)]
#[command(name = "readinglist-server", version, about = "Book tracking CRUD service")]
pub struct ServerConfig {
    /// Address to bind to
    #[arg(long, default_value_t = IpAddr::V4(Ipv4Addr::UNSPECIFIED), env = "LISTEN_HOST")]
    pub host: IpAddr,

    /// Port to listen on
    #[arg(short = 'p', long, default_value_t = 8080, env = "PORT")]
    pub port: u16,

    /// SQLite database file
    #[arg(long, value_name = "FILE", default_value = "readinglist.sqlite3", env = "DB_PATH")]
    pub db_path: PathBuf,

    /// Banner message echoed by `/config`
    #[arg(long, default_value = "", env = "BANNER_MESSAGE")]
    pub banner: String,

    /// Environment label echoed by `/config`
    #[arg(long, default_value = "", env = "APP_ENV")]
    pub app_env: String,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value_t = default_log_level().to_string(), env = "LOG_LEVEL")]
    pub log_level: String,

    /// Absolute directory for rotating log files; logs go to stderr when unset
    #[arg(long, value_name = "DIR", env = "LOG_DIR")]
    pub log_dir: Option<String>,
}

impl ServerConfig {
    pub fn listen_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}
