use anyhow::{anyhow, bail, Result};
use clap::{Args, Subcommand, ValueEnum};
use dialoguer::Select;
use std::io::Write;
use std::path::Path;

use crate::config::{
    load_servers_config, save_servers_config, AuthConfig, ServerConfig, ServerType,
};

/// Manage the servers file. The alias is taken from the global `--host` flag.
#[derive(Subcommand, Debug)]
pub enum ServerCommands {
    /// List configured servers
    List,
    /// Print one server entry as YAML
    Get,
    /// Register a server under the `--host` alias
    Add(AddArgs),
    /// Remove the `--host` alias
    Delete,
}

#[derive(Args, Debug, Default)]
pub struct AddArgs {
    /// Base URL of the server
    #[arg(long)]
    pub server_host: String,
    /// Kind of server; asked interactively when omitted
    #[arg(long, value_enum)]
    pub server_type: Option<ServerType>,
    /// Username for basic auth
    #[arg(long, requires = "password_env")]
    pub username: Option<String>,
    /// Environment variable holding the basic auth password
    #[arg(long, requires = "username")]
    pub password_env: Option<String>,
    /// Environment variable holding a bearer token
    #[arg(long, conflicts_with = "username")]
    pub token_env: Option<String>,
}

pub fn run(
    cmd: &ServerCommands,
    host: Option<&str>,
    path: &Path,
    out: &mut dyn Write,
) -> Result<()> {
    let mut cfg = load_servers_config(path)?;
    let alias = || host.ok_or_else(|| anyhow!("required flag --host not set"));

    match cmd {
        ServerCommands::List => {
            for s in &cfg.servers {
                let kind = s
                    .server_type
                    .map(|t| t.to_string())
                    .unwrap_or_else(|| "-".to_string());
                writeln!(out, "{} {} {}", s.name, s.url, kind)?;
            }
        }
        ServerCommands::Get => {
            let name = alias()?;
            let server = cfg
                .find(name)
                .ok_or_else(|| anyhow!("no such server '{}'", name))?;
            write!(out, "{}", serde_yaml::to_string(server)?)?;
        }
        ServerCommands::Add(args) => {
            let name = alias()?;
            if cfg.find(name).is_some() {
                bail!("server '{}' already exists", name);
            }
            if !(args.server_host.starts_with("http://") || args.server_host.starts_with("https://"))
            {
                bail!("server host must be an http:// or https:// URL");
            }

            let server_type = match args.server_type {
                Some(t) => t,
                None => select_server_type()?,
            };
            let auth = match (&args.username, &args.password_env, &args.token_env) {
                (Some(username), Some(password_env), _) => AuthConfig::Basic {
                    username: username.clone(),
                    password_env: password_env.clone(),
                },
                (_, _, Some(token_env)) => AuthConfig::Bearer {
                    token_env: token_env.clone(),
                },
                _ => AuthConfig::None,
            };

            cfg.servers.push(ServerConfig {
                name: name.to_string(),
                url: args.server_host.clone(),
                server_type: Some(server_type),
                auth,
            });
            save_servers_config(&cfg, path)?;
            writeln!(out, "added server '{}'", name)?;
        }
        ServerCommands::Delete => {
            let name = alias()?;
            let before = cfg.servers.len();
            cfg.servers.retain(|s| s.name != name);
            if cfg.servers.len() == before {
                bail!("no such server '{}'", name);
            }
            save_servers_config(&cfg, path)?;
            writeln!(out, "removed server '{}'", name)?;
        }
    }

    Ok(())
}

fn select_server_type() -> Result<ServerType> {
    let options = ServerType::value_variants();
    let labels: Vec<String> = options.iter().map(|t| t.to_string()).collect();
    let selection = Select::new()
        .with_prompt("Server type")
        .items(&labels)
        .default(0)
        .interact()?;
    Ok(options[selection])
}
