//! # NGSI CLI
//!
//! A command-line client for FIWARE components.
//!
//! ## Quick Start
//!
//! ```bash
//! # Register servers once
//! ngsi server add --host cygnus --server-host http://localhost:5080 --server-type cygnus
//! ngsi server add --host wirecloud --server-host https://wirecloud.example.com --server-type wirecloud
//!
//! # Cygnus
//! ngsi admin appenders list --host cygnus --pretty
//! ngsi groupingrules update --host cygnus --id 1 --data @rule.json
//!
//! # WireCloud
//! ngsi macs install --host wirecloud --file CoNWeT_map-viewer_2.6.2.wgt --overwrite
//! ngsi workspaces get --host wirecloud --wid 5 --tabs
//! ```
//!
//! ## Configuration
//!
//! Server aliases live in `~/.config/ngsi/servers.yaml`, or wherever `NGSI_SERVERS_PATH`
//! or `--config` points.

use anyhow::Result;
use clap::Parser;
use ngsi_cli::{commands, Cli, LogLevel};
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.global.stderr);

    let cmd = cli.cmd.unwrap_or_else(|| {
        eprintln!("No command provided. Use --help to see available commands.");
        std::process::exit(1);
    });
    commands::run(cmd, &cli.global).await
}

/// `RUST_LOG` wins over `--stderr`
fn init_tracing(level: LogLevel) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.directive()));
    fmt()
        .with_target(false)
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
