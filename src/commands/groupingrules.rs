use clap::{Args, Subcommand};
use reqwest::{header::CONTENT_TYPE, StatusCode};
use std::io::Write;

use crate::client::NgsiClient;
use crate::constants::CYGNUS_GROUPINGRULES;
use crate::error::NgsiError;
use crate::input::read_all;
use crate::output::render;

#[derive(Subcommand, Debug)]
pub enum GroupingrulesCommands {
    /// List grouping rules
    List(ListArgs),
    /// Create a grouping rule
    Create(CreateArgs),
    /// Update a grouping rule
    Update(UpdateArgs),
    /// Delete a grouping rule
    Delete(DeleteArgs),
}

#[derive(Args, Debug, Default)]
pub struct ListArgs {
    #[arg(short = 'P', long)]
    pub pretty: bool,
}

#[derive(Args, Debug, Default)]
pub struct CreateArgs {
    /// Grouping rule data (inline JSON, @file, or stdin)
    #[arg(short, long)]
    pub data: String,
    #[arg(short = 'P', long)]
    pub pretty: bool,
}

#[derive(Args, Debug, Default)]
pub struct UpdateArgs {
    /// Grouping rule id
    #[arg(short, long)]
    pub id: String,
    /// Grouping rule data (inline JSON, @file, or stdin)
    #[arg(short, long)]
    pub data: String,
    #[arg(short = 'P', long)]
    pub pretty: bool,
}

#[derive(Args, Debug, Default)]
pub struct DeleteArgs {
    /// Grouping rule id
    #[arg(short, long)]
    pub id: String,
    #[arg(short = 'P', long)]
    pub pretty: bool,
}

pub async fn run(
    client: &NgsiClient,
    cmd: &GroupingrulesCommands,
    out: &mut dyn Write,
) -> Result<(), NgsiError> {
    match cmd {
        GroupingrulesCommands::List(args) => list(client, args, out).await,
        GroupingrulesCommands::Create(args) => create(client, args, out).await,
        GroupingrulesCommands::Update(args) => update(client, args, out).await,
        GroupingrulesCommands::Delete(args) => delete(client, args, out).await,
    }
}

pub async fn list(
    client: &NgsiClient,
    args: &ListArgs,
    out: &mut dyn Write,
) -> Result<(), NgsiError> {
    const FUNC: &str = "groupingrulesList";

    let res = client
        .send(client.get(CYGNUS_GROUPINGRULES))
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
    args: &CreateArgs,
    out: &mut dyn Write,
) -> Result<(), NgsiError> {
    const FUNC: &str = "groupingrulesCreate";

    let data = read_all(&args.data).map_err(|e| NgsiError::nested(FUNC, 1, e))?;
    let req = client
        .post(CYGNUS_GROUPINGRULES)
        .header(CONTENT_TYPE, "application/json")
        .body(data);
    let res = client
        .send(req)
        .await
        .map_err(|e| NgsiError::wrap(FUNC, 2, e))?;
    if res.status != StatusCode::OK {
        return Err(NgsiError::new(
            FUNC,
            3,
            format!("{} {}", res.status, res.text()),
        ));
    }

    let text = render(&res.body, args.pretty).map_err(|e| NgsiError::wrap(FUNC, 4, e))?;
    write!(out, "{}", text)?;
    Ok(())
}

pub async fn update(
    client: &NgsiClient,
    args: &UpdateArgs,
    out: &mut dyn Write,
) -> Result<(), NgsiError> {
    const FUNC: &str = "groupingrulesUpdate";

    let data = read_all(&args.data).map_err(|e| NgsiError::nested(FUNC, 1, e))?;
    let req = client
        .put(CYGNUS_GROUPINGRULES)
        .query(&[("id", args.id.as_str())])
        .header(CONTENT_TYPE, "application/json")
        .body(data);
    let res = client
        .send(req)
        .await
        .map_err(|e| NgsiError::wrap(FUNC, 2, e))?;
    if res.status != StatusCode::OK {
        return Err(NgsiError::new(
            FUNC,
            3,
            format!("{} {}", res.status, res.text()),
        ));
    }

    let text = render(&res.body, args.pretty).map_err(|e| NgsiError::wrap(FUNC, 4, e))?;
    write!(out, "{}", text)?;
    Ok(())
}

pub async fn delete(
    client: &NgsiClient,
    args: &DeleteArgs,
    out: &mut dyn Write,
) -> Result<(), NgsiError> {
    const FUNC: &str = "groupingrulesDelete";

    let req = client
        .delete(CYGNUS_GROUPINGRULES)
        .query(&[("id", args.id.as_str())]);
    let res = client
        .send(req)
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
