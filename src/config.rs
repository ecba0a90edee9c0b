//! Server configuration for the NGSI CLI
//!
//! Servers are registered under an alias in a YAML file so that commands can be run
//! with `--host <alias>` instead of a full URL. The file lives at
//! `~/.config/ngsi/servers.yaml`, at the path in `NGSI_SERVERS_PATH`, or at the path
//! passed with `--config`.
//!
//! ## Environment Variable Expansion
//!
//! The file supports environment variable expansion before it is parsed:
//! - `${VAR}` - Simple substitution
//! - `${VAR:-default}` - Use default if VAR is unset or empty
//! - `${VAR-default}` - Use default if VAR is unset
//! - `${VAR:+alt}` - Use alt if VAR is set and non-empty
//! - `${VAR+alt}` - Use alt if VAR is set

use anyhow::{anyhow, bail, Context};
use clap::ValueEnum;
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;
use std::{env, fmt, fs, path::PathBuf};

use crate::constants::{NGSI_SERVERS_PATH, SERVERS_FILE};

/// Contents of the servers file
///
/// # Example
///
/// ```yaml
/// servers:
///   - name: cygnus
///     url: http://localhost:5080
///     serverType: cygnus
///   - name: wirecloud
///     url: https://wirecloud.example.com
///     serverType: wirecloud
///     auth:
///       type: bearer
///       tokenEnv: WIRECLOUD_TOKEN
/// ```
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct ServersConfig {
    #[serde(default)]
    pub servers: Vec<ServerConfig>,
}

/// A FIWARE component reachable over HTTP
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct ServerConfig {
    /// Alias used with `--host`
    pub name: String,
    /// Base URL of the component
    pub url: String,
    /// Kind of component; commands refuse aliases of another kind
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server_type: Option<ServerType>,
    #[serde(default)]
    pub auth: AuthConfig,
}

/// FIWARE components the CLI knows how to talk to
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ServerType {
    Cygnus,
    Wirecloud,
}

impl fmt::Display for ServerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServerType::Cygnus => write!(f, "cygnus"),
            ServerType::Wirecloud => write!(f, "wirecloud"),
        }
    }
}

/// Authentication applied to every request sent to a server
///
/// Credentials are always sourced from environment variables.
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase", rename_all_fields = "camelCase")]
#[serde(tag = "type")]
pub enum AuthConfig {
    #[default]
    None,
    /// HTTP Basic authentication
    Basic {
        username: String,
        /// Environment variable containing the password
        password_env: String,
    },
    /// `Authorization: Bearer` token
    Bearer {
        /// Environment variable containing the token
        token_env: String,
    },
}

impl ServerConfig {
    /// An ad-hoc server given as a literal URL on the command line
    pub fn from_url(url: impl Into<String>) -> Self {
        let url = url.into();
        ServerConfig {
            name: url.clone(),
            url,
            server_type: None,
            auth: AuthConfig::None,
        }
    }
}

impl ServersConfig {
    pub fn find(&self, name: &str) -> Option<&ServerConfig> {
        self.servers.iter().find(|s| s.name == name)
    }

    /// Resolve `--host` into a server entry
    ///
    /// Literal `http://` and `https://` URLs bypass the file. Aliases must exist and, when
    /// they declare a type, it must match `expected`.
    pub fn resolve(&self, host: &str, expected: ServerType) -> anyhow::Result<ServerConfig> {
        if host.starts_with("http://") || host.starts_with("https://") {
            return Ok(ServerConfig::from_url(host));
        }

        let server = self.find(host).ok_or_else(|| match self.closest(host) {
            Some(candidate) => anyhow!("unknown host '{}' (did you mean '{}'?)", host, candidate),
            None => anyhow!("unknown host '{}'", host),
        })?;

        if let Some(actual) = server.server_type {
            if actual != expected {
                bail!(
                    "host '{}' is a {} server, this command requires {}",
                    host,
                    actual,
                    expected
                );
            }
        }
        Ok(server.clone())
    }

    /// Closest configured alias to `name`, if any scores at all
    fn closest(&self, name: &str) -> Option<&str> {
        let matcher = SkimMatcherV2::default();
        self.servers
            .iter()
            .filter_map(|s| {
                matcher
                    .fuzzy_match(&s.name, name)
                    .map(|score| (score, s.name.as_str()))
            })
            .max_by_key(|(score, _)| *score)
            .map(|(_, n)| n)
    }
}

/// Location of the servers file: explicit path, then `NGSI_SERVERS_PATH`, then the
/// user's config directory
pub fn servers_path(explicit: Option<&Path>) -> PathBuf {
    if let Some(p) = explicit {
        return p.to_path_buf();
    }
    env::var(NGSI_SERVERS_PATH)
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let mut p = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
            p.push(SERVERS_FILE);
            p
        })
}

pub fn load_servers_config(path: &Path) -> anyhow::Result<ServersConfig> {
    if !path.exists() {
        return Ok(ServersConfig::default());
    }
    let data = preprocess_config(path)
        .with_context(|| format!("reading servers file {}", path.display()))?;
    let cfg: ServersConfig = serde_yaml::from_str(&data)
        .with_context(|| format!("parsing servers file {}", path.display()))?;
    Ok(cfg)
}

pub fn save_servers_config(cfg: &ServersConfig, path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let data = serde_yaml::to_string(cfg)?;
    fs::write(path, data)?;
    tracing::info!("saved servers to {}", path.display());
    Ok(())
}

fn placeholder_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)(?:(:?[-+])([^}]*))?\}")
            .expect("placeholder pattern is valid")
    })
}

pub fn expand_env_placeholders(input: &str) -> String {
    placeholder_regex()
        .replace_all(input, |caps: &regex::Captures| {
            let var_name = &caps[1];
            let op = caps.get(2).map_or("", |m| m.as_str());
            let val = caps.get(3).map_or("", |m| m.as_str());
            let var = env::var(var_name).ok();

            match (var.as_deref(), op) {
                (Some(v), "") => v.to_string(),
                (Some(v), ":-") if !v.is_empty() => v.to_string(),
                (_, ":-") => val.to_string(),
                (Some(v), "-") => v.to_string(),
                (None, "-") => val.to_string(),
                (Some(v), ":+") if !v.is_empty() => val.to_string(),
                (Some(_), "+") => val.to_string(),
                _ => String::new(),
            }
        })
        .to_string()
}

pub fn preprocess_config(path: &Path) -> anyhow::Result<String> {
    let raw_data = fs::read_to_string(path)?;
    Ok(expand_env_placeholders(&raw_data))
}
