use clap::{Args, Subcommand};
use reqwest::header::CONTENT_TYPE;
use std::io::Write;

use super::admin::{finish, transient};
use crate::client::NgsiClient;
use crate::constants::CYGNUS_LOGGERS;
use crate::error::NgsiError;
use crate::input::read_all;

#[derive(Subcommand, Debug)]
pub enum LoggersCommands {
    /// List loggers
    List(ListArgs),
    /// Get a logger
    Get(NameArgs),
    /// Create a logger
    Create(DataArgs),
    /// Update a logger
    Update(DataArgs),
    /// Delete a logger
    Delete(NameArgs),
}

#[derive(Args, Debug, Default)]
pub struct ListArgs {
    /// true, retrieving from memory, or false, retrieving from file
    #[arg(short, long)]
    pub transient: bool,
    #[arg(short = 'P', long)]
    pub pretty: bool,
}

#[derive(Args, Debug, Default)]
pub struct NameArgs {
    /// Logger name
    #[arg(short, long)]
    pub name: String,
    #[arg(short, long)]
    pub transient: bool,
    #[arg(short = 'P', long)]
    pub pretty: bool,
}

#[derive(Args, Debug, Default)]
pub struct DataArgs {
    /// Logger information (inline JSON, @file, or stdin)
    #[arg(short, long)]
    pub data: String,
    #[arg(short, long)]
    pub transient: bool,
    #[arg(short = 'P', long)]
    pub pretty: bool,
}

pub async fn run(
    client: &NgsiClient,
    cmd: &LoggersCommands,
    out: &mut dyn Write,
) -> Result<(), NgsiError> {
    match cmd {
        LoggersCommands::List(args) => list(client, args, out).await,
        LoggersCommands::Get(args) => get(client, args, out).await,
        LoggersCommands::Create(args) => create(client, args, out).await,
        LoggersCommands::Update(args) => update(client, args, out).await,
        LoggersCommands::Delete(args) => delete(client, args, out).await,
    }
}

pub async fn list(
    client: &NgsiClient,
    args: &ListArgs,
    out: &mut dyn Write,
) -> Result<(), NgsiError> {
    const FUNC: &str = "loggersList";

    let req = client
        .get(CYGNUS_LOGGERS)
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
    const FUNC: &str = "loggersGet";

    let req = client
        .get(CYGNUS_LOGGERS)
        .query(&[("name", args.name.clone()), transient(args.transient)]);
    let res = client
        .send(req)
        .await
        .map_err(|e| NgsiError::wrap(FUNC, 1, e))?;
    finish(FUNC, 1, res, args.pretty, out)
}

pub async fn create(
    client: &NgsiClient,
    args: &DataArgs,
    out: &mut dyn Write,
) -> Result<(), NgsiError> {
    const FUNC: &str = "loggersCreate";

    let data = read_all(&args.data).map_err(|e| NgsiError::nested(FUNC, 1, e))?;
    let req = client
        .post(CYGNUS_LOGGERS)
        .query(&[transient(args.transient)])
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
    args: &DataArgs,
    out: &mut dyn Write,
) -> Result<(), NgsiError> {
    const FUNC: &str = "loggersUpdate";

    let data = read_all(&args.data).map_err(|e| NgsiError::nested(FUNC, 1, e))?;
    let req = client
        .put(CYGNUS_LOGGERS)
        .query(&[transient(args.transient)])
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
    const FUNC: &str = "loggersDelete";

    let req = client
        .delete(CYGNUS_LOGGERS)
        .query(&[("name", args.name.clone()), transient(args.transient)]);
    let res = client
        .send(req)
        .await
        .map_err(|e| NgsiError::wrap(FUNC, 1, e))?;
    finish(FUNC, 1, res, args.pretty, out)
}
