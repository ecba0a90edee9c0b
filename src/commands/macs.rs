use clap::{Args, Subcommand};
use reqwest::{
    multipart::{Form, Part},
    StatusCode,
};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::{env, fs};

use crate::client::NgsiClient;
use crate::constants::{WIRECLOUD_RESOURCE, WIRECLOUD_RESOURCES};
use crate::error::NgsiError;
use crate::mac::get_mac_name;
use crate::output::{indent_json, to_json};
use crate::wirecloud::Resources;

#[derive(Subcommand, Debug)]
pub enum MacsCommands {
    /// List installed mashable application components
    List(ListArgs),
    /// Show one installed component
    Get(GetArgs),
    /// Download a component as a .wgt file
    Download(MacSelector),
    /// Install a component from a .wgt file
    Install(InstallArgs),
    /// Uninstall a component
    Uninstall(UninstallArgs),
}

#[derive(Args, Debug, Default)]
pub struct ListArgs {
    /// Only widgets
    #[arg(short, long)]
    pub widget: bool,
    /// Only operators
    #[arg(short, long)]
    pub operator: bool,
    /// Only mashups
    #[arg(short, long)]
    pub mashup: bool,
    /// Filter by vendor
    #[arg(short, long)]
    pub vender: Option<String>,
    /// Filter by name
    #[arg(short, long)]
    pub name: Option<String>,
    /// Filter by version
    #[arg(short = 'V', long)]
    pub version: Option<String>,
    #[arg(short, long)]
    pub json: bool,
    #[arg(short = 'P', long)]
    pub pretty: bool,
}

/// Identifies a component by flags or by a `vendor/name/version` argument
#[derive(Args, Debug, Default)]
pub struct MacSelector {
    /// Vendor
    #[arg(short, long)]
    pub vender: Option<String>,
    /// Name
    #[arg(short, long)]
    pub name: Option<String>,
    /// Version
    #[arg(short = 'V', long)]
    pub version: Option<String>,
    /// vendor/name/version
    pub mac: Option<String>,
}

impl MacSelector {
    /// The component id, or `None` when neither form is complete
    pub fn id(&self, version_required: bool) -> Option<String> {
        if let Some(mac) = &self.mac {
            return Some(mac.clone());
        }
        match (&self.vender, &self.name, &self.version) {
            (Some(vendor), Some(name), Some(version)) => {
                Some(format!("{}/{}/{}", vendor, name, version))
            }
            (Some(vendor), Some(name), None) if !version_required => {
                Some(format!("{}/{}", vendor, name))
            }
            _ => None,
        }
    }
}

#[derive(Args, Debug, Default)]
pub struct GetArgs {
    #[command(flatten)]
    pub mac: MacSelector,
    #[arg(short = 'P', long)]
    pub pretty: bool,
}

#[derive(Args, Debug, Default)]
pub struct InstallArgs {
    /// Path to the .wgt file
    #[arg(short, long)]
    pub file: PathBuf,
    /// Make the component available to all users
    #[arg(short, long)]
    pub public: bool,
    /// Replace an installed component with the same id
    #[arg(short, long)]
    pub overwrite: bool,
    #[arg(short, long)]
    pub json: bool,
    #[arg(short = 'P', long)]
    pub pretty: bool,
}

#[derive(Args, Debug, Default)]
pub struct UninstallArgs {
    #[command(flatten)]
    pub mac: MacSelector,
    /// Actually uninstall
    #[arg(long)]
    pub run: bool,
    #[arg(short, long)]
    pub json: bool,
    #[arg(short = 'P', long)]
    pub pretty: bool,
}

pub async fn run(
    client: &NgsiClient,
    cmd: &MacsCommands,
    out: &mut dyn Write,
) -> Result<(), NgsiError> {
    match cmd {
        MacsCommands::List(args) => list(client, args, out).await,
        MacsCommands::Get(args) => get(client, args, out).await,
        MacsCommands::Download(args) => download(client, args, Path::new(".")).await,
        MacsCommands::Install(args) => install(client, args, out).await,
        MacsCommands::Uninstall(args) => uninstall(client, args, out).await,
    }
}

pub async fn list(
    client: &NgsiClient,
    args: &ListArgs,
    out: &mut dyn Write,
) -> Result<(), NgsiError> {
    const FUNC: &str = "resourceList";

    let res = client
        .send(client.get(WIRECLOUD_RESOURCES))
        .await
        .map_err(|e| NgsiError::wrap(FUNC, 1, e))?;
    if res.status != StatusCode::OK {
        return Err(NgsiError::new(
            FUNC,
            2,
            format!("error {} {}", res.status, res.text()),
        ));
    }

    // without a type flag, JSON output is the body as received
    let any_type = !(args.widget || args.operator || args.mashup);
    if any_type && (args.json || args.pretty) {
        if args.pretty {
            let text = indent_json(&res.body).map_err(|e| NgsiError::wrap(FUNC, 3, e))?;
            writeln!(out, "{}", text)?;
        } else {
            writeln!(out, "{}", res.text())?;
        }
        return Ok(());
    }

    let resources: Resources =
        serde_json::from_slice(&res.body).map_err(|e| NgsiError::wrap(FUNC, 4, e))?;

    let matches = |field: &str, want: &Option<String>| want.as_deref().map_or(true, |w| w == field);
    let selected: Resources = resources
        .into_iter()
        .filter(|(_, r)| {
            any_type
                || (args.widget && r.mac_type == "widget")
                || (args.operator && r.mac_type == "operator")
                || (args.mashup && r.mac_type == "mashup")
        })
        .filter(|(_, r)| {
            matches(&r.vendor, &args.vender)
                && matches(&r.name, &args.name)
                && matches(&r.version, &args.version)
        })
        .collect();

    if args.json || args.pretty {
        let json = to_json(&selected).map_err(|e| NgsiError::wrap(FUNC, 5, e))?;
        if args.pretty {
            let text = indent_json(json.as_bytes()).map_err(|e| NgsiError::wrap(FUNC, 6, e))?;
            writeln!(out, "{}", text)?;
        } else {
            writeln!(out, "{}", json)?;
        }
    } else {
        for key in selected.keys() {
            writeln!(out, "{}", key)?;
        }
    }
    Ok(())
}

pub async fn get(
    client: &NgsiClient,
    args: &GetArgs,
    out: &mut dyn Write,
) -> Result<(), NgsiError> {
    const FUNC: &str = "resourceGet";

    let mac_name = args
        .mac
        .id(true)
        .ok_or_else(|| NgsiError::new(FUNC, 1, "argument error"))?;

    let res = client
        .send(client.get(WIRECLOUD_RESOURCES))
        .await
        .map_err(|e| NgsiError::wrap(FUNC, 2, e))?;
    if res.status != StatusCode::OK {
        return Err(NgsiError::new(
            FUNC,
            3,
            format!("error {} {}", res.status, res.text()),
        ));
    }

    let resources: Resources =
        serde_json::from_slice(&res.body).map_err(|e| NgsiError::wrap(FUNC, 4, e))?;
    let mac = resources
        .get(&mac_name)
        .ok_or_else(|| NgsiError::new(FUNC, 5, format!("{} not found", mac_name)))?;

    let json = to_json(mac).map_err(|e| NgsiError::wrap(FUNC, 6, e))?;
    if args.pretty {
        let text = indent_json(json.as_bytes()).map_err(|e| NgsiError::wrap(FUNC, 7, e))?;
        writeln!(out, "{}", text)?;
    } else {
        writeln!(out, "{}", json)?;
    }
    Ok(())
}

/// Save the package as `<vendor>_<name>_<version>.wgt` under `dir`
pub async fn download(
    client: &NgsiClient,
    args: &MacSelector,
    dir: &Path,
) -> Result<(), NgsiError> {
    const FUNC: &str = "resourceDownload";

    let mac_name = args
        .id(true)
        .ok_or_else(|| NgsiError::new(FUNC, 1, "argument error"))?;

    let path = format!("{}/{}", WIRECLOUD_RESOURCE, mac_name);
    let res = client
        .send(client.get(&path))
        .await
        .map_err(|e| NgsiError::wrap(FUNC, 2, e))?;
    if res.status != StatusCode::OK {
        if res.status == StatusCode::NOT_FOUND {
            return Err(NgsiError::new(FUNC, 3, format!("{} not found", mac_name)));
        }
        return Err(NgsiError::new(
            FUNC,
            4,
            format!("error {} {}", res.status, res.text()),
        ));
    }

    let file = dir.join(format!("{}.wgt", mac_name.replace('/', "_")));
    fs::write(&file, &res.body).map_err(|e| NgsiError::wrap(FUNC, 5, e))?;
    tracing::info!("saved {}", file.display());
    Ok(())
}

pub async fn install(
    client: &NgsiClient,
    args: &InstallArgs,
    out: &mut dyn Write,
) -> Result<(), NgsiError> {
    const FUNC: &str = "resourceInstall";

    let file = if args.file.is_absolute() {
        args.file.clone()
    } else {
        env::current_dir()
            .map(|cwd| cwd.join(&args.file))
            .map_err(|e| NgsiError::wrap(FUNC, 1, e))?
    };
    let file_name = file
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    let wgt = fs::read(&file).map_err(|e| NgsiError::wrap(FUNC, 2, e))?;
    let (_, mac_name) = get_mac_name(&wgt).map_err(|e| NgsiError::nested(FUNC, 3, e))?;

    let exists = exists_mac(client, &mac_name)
        .await
        .map_err(|e| NgsiError::nested(FUNC, 4, e))?;
    if exists {
        if !args.overwrite {
            return Err(NgsiError::new(
                FUNC,
                6,
                format!("{} already exists", mac_name),
            ));
        }
        uninstall_mac(client, &mac_name)
            .await
            .map_err(|e| NgsiError::nested(FUNC, 5, e))?;
    }

    let part = Part::bytes(wgt)
        .file_name(file_name)
        .mime_str("application/octet-stream")
        .map_err(|e| NgsiError::wrap(FUNC, 7, e))?;
    let form = Form::new().part("file", part);

    let mut req = client.post(WIRECLOUD_RESOURCES);
    if args.public {
        req = req.query(&[("public", "true")]);
    }
    let res = client
        .send(req.multipart(form))
        .await
        .map_err(|e| NgsiError::wrap(FUNC, 8, e))?;
    if res.status != StatusCode::CREATED && res.status != StatusCode::OK {
        return Err(NgsiError::new(
            FUNC,
            9,
            format!("error {} {}", res.status, res.text()),
        ));
    }
    tracing::info!("installed {}", mac_name);

    if args.pretty {
        let text = indent_json(&res.body).map_err(|e| NgsiError::wrap(FUNC, 10, e))?;
        writeln!(out, "{}", text)?;
    } else if args.json {
        writeln!(out, "{}", res.text())?;
    }
    Ok(())
}

pub async fn uninstall(
    client: &NgsiClient,
    args: &UninstallArgs,
    out: &mut dyn Write,
) -> Result<(), NgsiError> {
    const FUNC: &str = "resourceUninstall";

    let mac_name = args
        .mac
        .id(false)
        .ok_or_else(|| NgsiError::new(FUNC, 1, "argument error"))?;

    if !args.run {
        writeln!(
            out,
            "{} will be uninstalled. run uninstall with --run option",
            mac_name
        )?;
        return Ok(());
    }

    let affected = args.json || args.pretty;
    let mut req = client.delete(&format!("{}/{}", WIRECLOUD_RESOURCE, mac_name));
    if affected {
        req = req.query(&[("affected", "true")]);
    }
    let res = client
        .send(req)
        .await
        .map_err(|e| NgsiError::wrap(FUNC, 2, e))?;
    if res.status != StatusCode::NO_CONTENT && res.status != StatusCode::OK {
        if res.status == StatusCode::NOT_FOUND {
            return Err(NgsiError::new(FUNC, 3, format!("{} not found", mac_name)));
        }
        return Err(NgsiError::new(
            FUNC,
            4,
            format!("error {} {}", res.status, res.text()),
        ));
    }

    if args.pretty {
        let text = indent_json(&res.body).map_err(|e| NgsiError::wrap(FUNC, 5, e))?;
        writeln!(out, "{}", text)?;
    } else if affected {
        writeln!(out, "{}", res.text())?;
    }
    Ok(())
}

async fn exists_mac(client: &NgsiClient, mac_name: &str) -> Result<bool, NgsiError> {
    const FUNC: &str = "existMac";

    let res = client
        .send(client.get(&format!("{}/{}", WIRECLOUD_RESOURCE, mac_name)))
        .await
        .map_err(|e| NgsiError::wrap(FUNC, 1, e))?;
    match res.status {
        StatusCode::OK => Ok(true),
        StatusCode::NOT_FOUND => Ok(false),
        _ => Err(NgsiError::new(
            FUNC,
            2,
            format!("error {} {}", res.status, res.text()),
        )),
    }
}

async fn uninstall_mac(client: &NgsiClient, mac_name: &str) -> Result<(), NgsiError> {
    const FUNC: &str = "uninstallMac";

    let res = client
        .send(client.delete(&format!("{}/{}", WIRECLOUD_RESOURCE, mac_name)))
        .await
        .map_err(|e| NgsiError::wrap(FUNC, 1, e))?;
    if res.status != StatusCode::NO_CONTENT && res.status != StatusCode::NOT_FOUND {
        return Err(NgsiError::new(
            FUNC,
            2,
            format!("error {} {}", res.status, res.text()),
        ));
    }
    Ok(())
}
