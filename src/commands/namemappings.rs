use clap::{Args, Subcommand};
use reqwest::{header::CONTENT_TYPE, Method, StatusCode};
use std::io::Write;

use crate::client::NgsiClient;
use crate::constants::CYGNUS_NAMEMAPPINGS;
use crate::error::NgsiError;
use crate::input::read_all;
use crate::output::render;

#[derive(Subcommand, Debug)]
pub enum NamemappingsCommands {
    /// List name mappings
    List(ListArgs),
    /// Create name mappings
    Create(DataArgs),
    /// Update name mappings
    Update(DataArgs),
    /// Delete name mappings
    Delete(DataArgs),
}

#[derive(Args, Debug, Default)]
pub struct ListArgs {
    #[arg(short = 'P', long)]
    pub pretty: bool,
}

#[derive(Args, Debug, Default)]
pub struct DataArgs {
    /// Name mapping data (inline JSON, @file, or stdin)
    #[arg(short, long)]
    pub data: String,
    #[arg(short = 'P', long)]
    pub pretty: bool,
}

pub async fn run(
    client: &NgsiClient,
    cmd: &NamemappingsCommands,
    out: &mut dyn Write,
) -> Result<(), NgsiError> {
    match cmd {
        NamemappingsCommands::List(args) => list(client, args, out).await,
        NamemappingsCommands::Create(args) => create(client, args, out).await,
        NamemappingsCommands::Update(args) => update(client, args, out).await,
        NamemappingsCommands::Delete(args) => delete(client, args, out).await,
    }
}

pub async fn list(
    client: &NgsiClient,
    args: &ListArgs,
    out: &mut dyn Write,
) -> Result<(), NgsiError> {
    const FUNC: &str = "namemappingsList";

    let res = client
        .send(client.get(CYGNUS_NAMEMAPPINGS))
        .await
        .map_err(|e| NgsiError::wrap(FUNC, 1, e))?;
    if res.status != StatusCode::OK {
        return Err(NgsiError::new(
            FUNC,
            2,
            format!("{} {}", res.status, res.text()),
        ));
    }

    let text = render(&res.body, args.pretty).map_err(|e| NgsiError::wrap(FUNC, 3, e))?;
    write!(out, "{}", text)?;
    Ok(())
}

pub async fn create(
    client: &NgsiClient,
    args: &DataArgs,
    out: &mut dyn Write,
) -> Result<(), NgsiError> {
    send_data("namemappingsCreate", Method::POST, client, args, out).await
}

pub async fn update(
    client: &NgsiClient,
    args: &DataArgs,
    out: &mut dyn Write,
) -> Result<(), NgsiError> {
    send_data("namemappingsUpdate", Method::PUT, client, args, out).await
}

pub async fn delete(
    client: &NgsiClient,
    args: &DataArgs,
    out: &mut dyn Write,
) -> Result<(), NgsiError> {
    send_data("namemappingsDelete", Method::DELETE, client, args, out).await
}

/// Send the data argument as the request body. Only POST and PUT are labelled as JSON.
async fn send_data(
    func: &'static str,
    method: Method,
    client: &NgsiClient,
    args: &DataArgs,
    out: &mut dyn Write,
) -> Result<(), NgsiError> {
    let data = read_all(&args.data).map_err(|e| NgsiError::nested(func, 1, e))?;

    let mut req = client.request(method.clone(), CYGNUS_NAMEMAPPINGS);
    if method != Method::DELETE {
        req = req.header(CONTENT_TYPE, "application/json");
    }
    let res = client
        .send(req.body(data))
        .await
        .map_err(|e| NgsiError::wrap(func, 2, e))?;
    if res.status != StatusCode::OK {
        return Err(NgsiError::new(
            func,
            3,
            format!("{} {}", res.status, res.text()),
        ));
    }

    let text = render(&res.body, args.pretty).map_err(|e| NgsiError::wrap(func, 4, e))?;
    write!(out, "{}", text)?;
    Ok(())
}
