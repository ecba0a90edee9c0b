use clap::Subcommand;
use reqwest::StatusCode;
use std::io::Write;

use super::{appenders::AppendersCommands, loggers::LoggersCommands};
use crate::client::{HttpResponse, NgsiClient};
use crate::error::NgsiError;
use crate::output::render;

/// Cygnus logging administration
#[derive(Subcommand, Debug)]
pub enum AdminCommands {
    /// Manage log appenders
    Appenders {
        #[command(subcommand)]
        cmd: AppendersCommands,
    },
    /// Manage loggers
    Loggers {
        #[command(subcommand)]
        cmd: LoggersCommands,
    },
}

pub async fn run(
    client: &NgsiClient,
    cmd: &AdminCommands,
    out: &mut dyn Write,
) -> Result<(), NgsiError> {
    match cmd {
        AdminCommands::Appenders { cmd } => super::appenders::run(client, cmd, out).await,
        AdminCommands::Loggers { cmd } => super::loggers::run(client, cmd, out).await,
    }
}

pub(super) fn transient(flag: bool) -> (&'static str, String) {
    ("transient", flag.to_string())
}

/// Status check and output shared by the appender and logger operations; `first` is
/// the errno of the transport check.
pub(super) fn finish(
    func: &'static str,
    first: u32,
    res: HttpResponse,
    pretty: bool,
    out: &mut dyn Write,
) -> Result<(), NgsiError> {
    if res.status != StatusCode::OK {
        return Err(NgsiError::new(
            func,
            first + 1,
            format!("{} {}", res.status, res.text()),
        ));
    }
    let text = render(&res.body, pretty).map_err(|e| NgsiError::wrap(func, first + 2, e))?;
    write!(out, "{}", text)?;
    Ok(())
}
