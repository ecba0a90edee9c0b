//! # NGSI CLI Library
//!
//! Request building, response checking and output formatting for the `ngsi` tool.
//! Each module under [`commands`] covers one REST surface of a FIWARE component:
//! Cygnus administration, name mappings and grouping rules, and WireCloud
//! preferences, components, workspaces and tabs.

use clap::{Args, Parser, ValueEnum};
use std::path::PathBuf;

pub mod client;
pub mod commands;
pub mod config;
pub mod constants;
pub mod error;
pub mod input;
pub mod mac;
pub mod output;
pub mod wirecloud;

/// Command-line client for FIWARE Cygnus and WireCloud
#[derive(Parser)]
#[command(
    name = "ngsi",
    version,
    about = "Command-line client for FIWARE Cygnus and WireCloud",
    long_about = "Turns subcommands into REST calls against FIWARE components and prints the JSON responses.\n\nServers are addressed with --host, either by an alias from the servers file or by a literal URL."
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,
    #[command(subcommand)]
    pub cmd: Option<commands::Commands>,
}

/// Flags accepted by every subcommand
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Server alias from the servers file, or an http(s):// URL
    #[arg(long, global = true, env = "NGSI_HOST")]
    pub host: Option<String>,
    /// OAuth token sent as `Authorization: Bearer`
    #[arg(long, global = true, env = "NGSI_TOKEN", hide_env_values = true)]
    pub oauth_token: Option<String>,
    /// Path to the servers file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
    /// Log level written to stderr
    #[arg(long, global = true, value_enum, default_value_t = LogLevel::Err)]
    pub stderr: LogLevel,
    /// Request timeout in seconds
    #[arg(long, global = true, default_value_t = constants::DEFAULT_TIMEOUT_SECS)]
    pub timeout: u64,
    /// Skip TLS certificate verification
    #[arg(long, global = true)]
    pub insecure_skip_verify: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Off,
    Err,
    Info,
    Debug,
}

impl LogLevel {
    /// `tracing` filter directive for this level
    pub fn directive(self) -> &'static str {
        match self {
            LogLevel::Off => "off",
            LogLevel::Err => "error",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
        }
    }
}
