use clap::{Args, Subcommand};
use reqwest::{header::ACCEPT, StatusCode};
use std::io::Write;

use crate::client::NgsiClient;
use crate::constants::WIRECLOUD_WORKSPACE;
use crate::error::NgsiError;
use crate::output::{indent_json, to_json};
use crate::wirecloud::Workspace;

#[derive(Subcommand, Debug)]
pub enum TabsCommands {
    /// List the tabs of a workspace
    List(ListArgs),
    /// Show one tab
    Get(GetArgs),
}

#[derive(Args, Debug, Default)]
pub struct ListArgs {
    /// Workspace id
    #[arg(short, long)]
    pub wid: String,
    #[arg(short, long)]
    pub json: bool,
    #[arg(short = 'P', long)]
    pub pretty: bool,
}

#[derive(Args, Debug, Default)]
pub struct GetArgs {
    /// Workspace id
    #[arg(short, long)]
    pub wid: String,
    /// Tab id
    #[arg(short, long)]
    pub tid: String,
    #[arg(short = 'P', long)]
    pub pretty: bool,
}

pub async fn run(
    client: &NgsiClient,
    cmd: &TabsCommands,
    out: &mut dyn Write,
) -> Result<(), NgsiError> {
    match cmd {
        TabsCommands::List(args) => list(client, args, out).await,
        TabsCommands::Get(args) => get(client, args, out).await,
    }
}

pub async fn list(
    client: &NgsiClient,
    args: &ListArgs,
    out: &mut dyn Write,
) -> Result<(), NgsiError> {
    const FUNC: &str = "tabsList";

    let req = client
        .get(&format!("{}/{}", WIRECLOUD_WORKSPACE, args.wid))
        .header(ACCEPT, "application/json");
    let res = client
        .send(req)
        .await
        .map_err(|e| NgsiError::wrap(FUNC, 1, e))?;
    if res.status != StatusCode::OK {
        if res.status == StatusCode::NOT_FOUND {
            return Err(NgsiError::new(FUNC, 2, "workspace not found"));
        }
        return Err(NgsiError::new(
            FUNC,
            3,
            format!("error {} {}", res.status, res.text()),
        ));
    }

    let ws: Workspace =
        serde_json::from_slice(&res.body).map_err(|e| NgsiError::wrap(FUNC, 4, e))?;

    if args.json || args.pretty {
        let json = to_json(&ws.tabs).map_err(|e| NgsiError::wrap(FUNC, 5, e))?;
        if args.pretty {
            let text = indent_json(json.as_bytes()).map_err(|e| NgsiError::wrap(FUNC, 6, e))?;
            writeln!(out, "{}", text)?;
        } else {
            write!(out, "{}", json)?;
        }
        return Ok(());
    }

    for tab in &ws.tabs {
        writeln!(out, "{} {} {}", tab.id, tab.name, tab.title)?;
    }
    Ok(())
}

pub async fn get(
    client: &NgsiClient,
    args: &GetArgs,
    out: &mut dyn Write,
) -> Result<(), NgsiError> {
    const FUNC: &str = "tabGet";

    let path = format!("{}/{}/tab/{}", WIRECLOUD_WORKSPACE, args.wid, args.tid);
    let req = client.get(&path).header(ACCEPT, "application/json");
    let res = client
        .send(req)
        .await
        .map_err(|e| NgsiError::wrap(FUNC, 1, e))?;
    if res.status != StatusCode::OK {
        if res.status == StatusCode::NOT_FOUND {
            return Err(NgsiError::new(FUNC, 2, "workspace or tab not found"));
        }
        return Err(NgsiError::new(
            FUNC,
            3,
            format!("error {} {}", res.status, res.text()),
        ));
    }

    if args.pretty {
        let text = indent_json(&res.body).map_err(|e| NgsiError::wrap(FUNC, 4, e))?;
        writeln!(out, "{}", text)?;
    } else {
        write!(out, "{}", res.text())?;
    }
    Ok(())
}
