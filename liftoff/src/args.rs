use std::path::PathBuf;

use clap::Parser;
use liftoff_config::Protocol;
use liftoff_telemetry::LogFormat;

/// Liftoff example service
#[derive(Debug, Parser)]
#[command(name = "liftoff", about = "Start a service from layered configuration and stop it on SIGINT/SIGTERM")]
pub struct Args {
    /// TOML property file consulted after the environment
    #[arg(short, long, env = "LIFTOFF_CONFIG")]
    pub config: Option<PathBuf>,

    /// Prefix for environment properties (`LIFTOFF_PORT`, `LIFTOFF_HOST`, ...)
    #[arg(long, default_value = "LIFTOFF_")]
    pub env_prefix: String,

    /// Override the protocol
    #[arg(long)]
    pub protocol: Option<Protocol>,

    /// Default log filter when `RUST_LOG` is unset
    #[arg(long, default_value = "info")]
    pub log_filter: String,

    /// Log output format (`text` or `json`)
    #[arg(long, default_value = "text")]
    pub log_format: LogFormat,
}
