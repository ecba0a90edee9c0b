use clap::{Args, Subcommand};
use reqwest::{header::ACCEPT, StatusCode};
use std::io::Write;

use crate::client::NgsiClient;
use crate::constants::{WIRECLOUD_WORKSPACE, WIRECLOUD_WORKSPACES};
use crate::error::NgsiError;
use crate::output::{format_millis, indent_json};
use crate::wirecloud::{cmp_ids, Workspace, WorkspaceInfo};

#[derive(Subcommand, Debug)]
pub enum WorkspacesCommands {
    /// List workspaces
    List(ListArgs),
    /// Show a workspace
    Get(GetArgs),
}

#[derive(Args, Debug, Default)]
pub struct ListArgs {
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
    /// List users with their access level
    #[arg(short, long)]
    pub users: bool,
    /// List tabs
    #[arg(short, long)]
    pub tabs: bool,
    /// List widget names
    #[arg(short = 'W', long)]
    pub widgets: bool,
    /// List operator names
    #[arg(short, long)]
    pub operators: bool,
    #[arg(short, long)]
    pub json: bool,
    #[arg(short = 'P', long)]
    pub pretty: bool,
}

pub async fn run(
    client: &NgsiClient,
    cmd: &WorkspacesCommands,
    out: &mut dyn Write,
) -> Result<(), NgsiError> {
    match cmd {
        WorkspacesCommands::List(args) => list(client, args, out).await,
        WorkspacesCommands::Get(args) => get(client, args, out).await,
    }
}

pub async fn list(
    client: &NgsiClient,
    args: &ListArgs,
    out: &mut dyn Write,
) -> Result<(), NgsiError> {
    const FUNC: &str = "workspacesList";

    let req = client
        .get(WIRECLOUD_WORKSPACES)
        .header(ACCEPT, "application/json");
    let res = client
        .send(req)
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
        return Ok(());
    }
    if args.json {
        write!(out, "{}", res.text())?;
        return Ok(());
    }

    let mut workspaces: Vec<WorkspaceInfo> =
        serde_json::from_slice(&res.body).map_err(|e| NgsiError::wrap(FUNC, 4, e))?;
    workspaces.sort_by(|a, b| cmp_ids(&a.id, &b.id));
    for ws in &workspaces {
        writeln!(
            out,
            "{} {} {} {}",
            ws.id,
            ws.name,
            ws.title,
            format_millis(ws.lastmodified)
        )?;
    }
    Ok(())
}

pub async fn get(
    client: &NgsiClient,
    args: &GetArgs,
    out: &mut dyn Write,
) -> Result<(), NgsiError> {
    const FUNC: &str = "workspaceGet";

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

    if args.pretty {
        let text = indent_json(&res.body).map_err(|e| NgsiError::wrap(FUNC, 5, e))?;
        writeln!(out, "{}", text)?;
        return Ok(());
    }
    if args.json {
        write!(out, "{}", res.text())?;
        return Ok(());
    }

    let mut ws: Workspace =
        serde_json::from_slice(&res.body).map_err(|e| NgsiError::wrap(FUNC, 4, e))?;
    let components = &ws.wiring.visualdescription.components;
    if args.tabs {
        ws.tabs.sort_by(|a, b| cmp_ids(&a.id, &b.id));
        for tab in &ws.tabs {
            writeln!(out, "{} {} {}", tab.id, tab.name, tab.title)?;
        }
    } else if args.widgets {
        for widget in components.widget.values() {
            writeln!(out, "{}", widget.name)?;
        }
    } else if args.operators {
        for operator in components.operator.values() {
            writeln!(out, "{}", operator.name)?;
        }
    } else if args.users {
        for user in &ws.users {
            writeln!(out, "{} {}", user.username, user.accesslevel)?;
        }
    } else {
        writeln!(
            out,
            "{} {} {} {}",
            ws.id,
            ws.name,
            ws.title,
            format_millis(ws.lastmodified)
        )?;
    }
    Ok(())
}
