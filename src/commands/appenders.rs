use clap::{Args, Subcommand};
use reqwest::header::CONTENT_TYPE;
use std::io::Write;

use super::admin::{finish, transient};
use crate::client::NgsiClient;
use crate::constants::CYGNUS_APPENDERS;
use crate::error::NgsiError;
use crate::input::read_all;

#[derive(Subcommand, Debug)]
pub enum AppendersCommands {
    /// List appenders
    List(ListArgs),
    /// Get an appender
    Get(NameArgs),
    /// Create an appender
    Create(CreateArgs),
    /// Update an appender
    Update(UpdateArgs),
    /// Delete an appender
    Delete(NameArgs),
}

#[derive(Args, Debug, Default)]
pub struct ListArgs {
    /// true, retrieving from memory, or false, retrieving from file
    #[arg(short, long)]
    pub transient: bool,
    /// Pretty-print the JSON response
    #[arg(short = 'P', long)]
    pub pretty: bool,
}

#[derive(Args, Debug, Default)]
pub struct NameArgs {
    /// Appender name
    #[arg(short, long)]
    pub name: String,
    #[arg(short, long)]
    pub transient: bool,
    #[arg(short = 'P', long)]
    pub pretty: bool,
}

#[derive(Args, Debug, Default)]
pub struct CreateArgs {
    /// Appender name
    #[arg(short, long)]
    pub name: Option<String>,
    /// Appender information (inline JSON, @file, or stdin)
    #[arg(short, long)]
    pub data: String,
    #[arg(short, long)]
    pub transient: bool,
    #[arg(short = 'P', long)]
    pub pretty: bool,
}

#[derive(Args, Debug, Default)]
pub struct UpdateArgs {
    /// Appender name
    #[arg(short, long)]
    pub name: String,
    /// Appender information (inline JSON, @file, or stdin)
    #[arg(short, long)]
    pub data: String,
    #[arg(short, long)]
    pub transient: bool,
    #[arg(short = 'P', long)]
    pub pretty: bool,
}

pub async fn run(
    client: &NgsiClient,
    cmd: &AppendersCommands,
    out: &mut dyn Write,
) -> Result<(), NgsiError> {
    match cmd {
        AppendersCommands::List(args) => list(client, args, out).await,
        AppendersCommands::Get(args) => get(client, args, out).await,
        AppendersCommands::Create(args) => create(client, args, out).await,
        AppendersCommands::Update(args) => update(client, args, out).await,
        AppendersCommands::Delete(args) => delete(client, args, out).await,
    }
}

pub async fn list(
    client: &NgsiClient,
    args: &ListArgs,
    out: &mut dyn Write,
) -> Result<(), NgsiError> {
    const FUNC: &str = "appendersList";

    let req = client
        .get(CYGNUS_APPENDERS)
        .query(&[transient(args.transient)]);
    let res = client
        .send(req)
        .await
        .map_err(|e| NgsiError::wrap(FUNC, 1, e))?;
    finish(FUNC, 1, res, args.pretty, out)
}

pub async fn get(
    client: &NgsiClient,
    args: &NameArgs,
    out: &mut dyn Write,
) -> Result<(), NgsiError> {
    const FUNC: &str = "appendersGet";

    let req = client.get(CYGNUS_APPENDERS).query(&[
        ("name", args.name.clone()),
        transient(args.transient),
    ]);
    let res = client
        .send(req)
        .await
        .map_err(|e| NgsiError::wrap(FUNC, 1, e))?;
    finish(FUNC, 1, res, args.pretty, out)
}

pub async fn create(
    client: &NgsiClient,
    args: &CreateArgs,
    out: &mut dyn Write,
) -> Result<(), NgsiError> {
    const FUNC: &str = "appendersCreate";

    let data = read_all(&args.data).map_err(|e| NgsiError::nested(FUNC, 1, e))?;

    let mut query = Vec::new();
    if let Some(name) = &args.name {
        query.push(("name", name.clone()));
    }
    query.push(transient(args.transient));

    let req = client
        .post(CYGNUS_APPENDERS)
        .query(&query)
        .header(CONTENT_TYPE, "application/json")
        .body(data);
    let res = client
        .send(req)
        .await
        .map_err(|e| NgsiError::wrap(FUNC, 2, e))?;
    finish(FUNC, 2, res, args.pretty, out)
}

pub async fn update(
    client: &NgsiClient,
    args: &UpdateArgs,
    out: &mut dyn Write,
) -> Result<(), NgsiError> {
    const FUNC: &str = "appendersUpdate";

    let data = read_all(&args.data).map_err(|e| NgsiError::nested(FUNC, 1, e))?;

    let req = client
        .put(CYGNUS_APPENDERS)
        .query(&[("name", args.name.clone()), transient(args.transient)])
        .header(CONTENT_TYPE, "application/json")
        .body(data);
    let res = client
        .send(req)
        .await
        .map_err(|e| NgsiError::wrap(FUNC, 2, e))?;
    finish(FUNC, 2, res, args.pretty, out)
}

pub async fn delete(
    client: &NgsiClient,
    args: &NameArgs,
    out: &mut dyn Write,
) -> Result<(), NgsiError> {
    const FUNC: &str = "appendersDelete";

    let req = client
        .delete(CYGNUS_APPENDERS)
        .query(&[("name", args.name.clone()), transient(args.transient)]);
    let res = client
        .send(req)
        .await
        .map_err(|e| NgsiError::wrap(FUNC, 1, e))?;
    finish(FUNC, 1, res, args.pretty, out)
}
