//! WireCloud REST payloads
//!
//! Only the fields the CLI reads are typed. Everything else is kept in `extra`, so a
//! decoded value re-serializes without losing data.

use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// Response of `GET /api/resources`, keyed by `vendor/name/version`
pub type Resources = BTreeMap<String, MacResource>;

/// An installed widget, operator or mashup
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MacResource {
    #[serde(rename = "type", default)]
    pub mac_type: String,
    #[serde(default)]
    pub vendor: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub version: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Entry of `GET /api/workspaces`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorkspaceInfo {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub title: String,
    #[serde(default, deserialize_with = "epoch_millis")]
    pub lastmodified: i64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Response of `GET /api/workspace/<id>`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Workspace {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub title: String,
    #[serde(default, deserialize_with = "epoch_millis")]
    pub lastmodified: i64,
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub tabs: Vec<Tab>,
    #[serde(default)]
    pub wiring: Wiring,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct User {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub accesslevel: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Tab {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub title: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Wiring {
    #[serde(default)]
    pub visualdescription: VisualDescription,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VisualDescription {
    #[serde(default)]
    pub components: Components,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Components {
    #[serde(default)]
    pub operator: BTreeMap<String, Component>,
    #[serde(default)]
    pub widget: BTreeMap<String, Component>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Component {
    #[serde(default)]
    pub name: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

// Flattened structs buffer their fields, and with `arbitrary_precision` a buffered
// number only decodes through `Value`.
fn epoch_millis<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    let value = Value::deserialize(deserializer)?;
    value
        .as_i64()
        .ok_or_else(|| de::Error::custom(format!("invalid lastmodified: {}", value)))
}

/// Order WireCloud ids numerically, as long as they fit in six digits
///
/// Ids are left-padded with zeros and only their last six characters are compared.
pub fn cmp_ids(a: &str, b: &str) -> Ordering {
    id_key(a).cmp(&id_key(b))
}

fn id_key(id: &str) -> String {
    let padded = format!("000000{}", id);
    let chars: Vec<char> = padded.chars().collect();
    chars[chars.len() - 6..].iter().collect()
}
