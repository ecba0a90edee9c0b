use anyhow::{anyhow, Result};
use clap::Subcommand;
use clap_complete::Shell;
use std::io::{self, Write};
use std::time::Duration;

use crate::client::{ClientOptions, NgsiClient};
use crate::config::{load_servers_config, servers_path, ServerType};
use crate::GlobalArgs;

pub mod admin;
pub mod appenders;
pub mod completions;
pub mod groupingrules;
pub mod loggers;
pub mod macs;
pub mod namemappings;
pub mod preferences;
pub mod server;
pub mod tabs;
pub mod workspaces;

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(about = "Cygnus logging administration (appenders and loggers)")]
    Admin {
        #[command(subcommand)]
        cmd: admin::AdminCommands,
    },
    #[command(about = "Manage Cygnus name mappings")]
    Namemappings {
        #[command(subcommand)]
        cmd: namemappings::NamemappingsCommands,
    },
    #[command(about = "Manage Cygnus grouping rules")]
    Groupingrules {
        #[command(subcommand)]
        cmd: groupingrules::GroupingrulesCommands,
    },
    #[command(about = "WireCloud platform preferences")]
    Preferences {
        #[command(subcommand)]
        cmd: preferences::PreferencesCommands,
    },
    #[command(about = "Manage WireCloud mashable application components (widgets, operators, mashups)")]
    Macs {
        #[command(subcommand)]
        cmd: macs::MacsCommands,
    },
    #[command(about = "Inspect WireCloud workspaces")]
    Workspaces {
        #[command(subcommand)]
        cmd: workspaces::WorkspacesCommands,
    },
    #[command(about = "Inspect the tabs of a WireCloud workspace")]
    Tabs {
        #[command(subcommand)]
        cmd: tabs::TabsCommands,
    },
    #[command(about = "Manage the servers file (list/get/add/delete)")]
    Server {
        #[command(subcommand)]
        cmd: server::ServerCommands,
    },
    #[command(about = "Emit shell completion scripts")]
    Completions { shell: Shell },
}

/// Build a client for the server named by `--host`
pub fn connect(global: &GlobalArgs, kind: ServerType) -> Result<NgsiClient> {
    let host = global
        .host
        .as_deref()
        .ok_or_else(|| anyhow!("required flag --host not set"))?;
    let path = servers_path(global.config.as_deref());
    let server = load_servers_config(&path)?.resolve(host, kind)?;
    tracing::debug!("{} -> {}", host, server.url);

    let opts = ClientOptions {
        oauth_token: global.oauth_token.clone(),
        timeout: Duration::from_secs(global.timeout),
        insecure_skip_verify: global.insecure_skip_verify,
    };
    NgsiClient::new(&server, &opts)
}

pub async fn run(cmd: Commands, global: &GlobalArgs) -> Result<()> {
    let mut stdout = io::stdout();
    let out: &mut dyn Write = &mut stdout;

    match &cmd {
        Commands::Admin { cmd } => {
            admin::run(&connect(global, ServerType::Cygnus)?, cmd, out).await?
        }
        Commands::Namemappings { cmd } => {
            namemappings::run(&connect(global, ServerType::Cygnus)?, cmd, out).await?
        }
        Commands::Groupingrules { cmd } => {
            groupingrules::run(&connect(global, ServerType::Cygnus)?, cmd, out).await?
        }
        Commands::Preferences { cmd } => {
            preferences::run(&connect(global, ServerType::Wirecloud)?, cmd, out).await?
        }
        Commands::Macs { cmd } => {
            macs::run(&connect(global, ServerType::Wirecloud)?, cmd, out).await?
        }
        Commands::Workspaces { cmd } => {
            workspaces::run(&connect(global, ServerType::Wirecloud)?, cmd, out).await?
        }
        Commands::Tabs { cmd } => {
            tabs::run(&connect(global, ServerType::Wirecloud)?, cmd, out).await?
        }
        Commands::Server { cmd } => server::run(
            cmd,
            global.host.as_deref(),
            &servers_path(global.config.as_deref()),
            out,
        )?,
        Commands::Completions { shell } => completions::run(*shell, out),
    }

    out.flush()?;
    Ok(())
}
