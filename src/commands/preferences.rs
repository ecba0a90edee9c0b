use clap::{Args, Subcommand};
use reqwest::StatusCode;
use std::io::Write;

use crate::client::NgsiClient;
use crate::constants::WIRECLOUD_PREFERENCES;
use crate::error::NgsiError;
use crate::output::indent_json;

#[derive(Subcommand, Debug)]
pub enum PreferencesCommands {
    /// Get platform preferences
    Get(GetArgs),
}

#[derive(Args, Debug, Default)]
pub struct GetArgs {
    #[arg(short = 'P', long)]
    pub pretty: bool,
}

pub async fn run(
    client: &NgsiClient,
    cmd: &PreferencesCommands,
    out: &mut dyn Write,
) -> Result<(), NgsiError> {
    match cmd {
        PreferencesCommands::Get(args) => get(client, args, out).await,
    }
}

pub async fn get(
    client: &NgsiClient,
    args: &GetArgs,
    out: &mut dyn Write,
) -> Result<(), NgsiError> {
    const FUNC: &str = "preferencesGet";

    let res = client
        .send(client.get(WIRECLOUD_PREFERENCES))
        .await
        .map_err(|e| NgsiError::wrap(FUNC, 1, e))?;
    if res.status != StatusCode::OK {
        return Err(NgsiError::new(
            FUNC,
            2,
            format!("error {} {}", res.status, res.text()),
        ));
    }

    if args.pretty {
        let text = indent_json(&res.body).map_err(|e| NgsiError::wrap(FUNC, 3, e))?;
        writeln!(out, "{}", text)?;
    } else {
        write!(out, "{}", res.text())?;
    }
    Ok(())
}
