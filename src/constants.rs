/// Environment variable overriding the servers file location
pub const NGSI_SERVERS_PATH: &str = "NGSI_SERVERS_PATH";
/// Servers file location relative to the user's config directory
pub const SERVERS_FILE: &str = "ngsi/servers.yaml";

pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

pub const CYGNUS_APPENDERS: &str = "/v1/admin/log/appenders";
pub const CYGNUS_LOGGERS: &str = "/v1/admin/log/loggers";
pub const CYGNUS_NAMEMAPPINGS: &str = "/v1/namemappings";
pub const CYGNUS_GROUPINGRULES: &str = "/v1/groupingrules";

pub const WIRECLOUD_PREFERENCES: &str = "/api/preferences/platform";
pub const WIRECLOUD_RESOURCES: &str = "/api/resources";
pub const WIRECLOUD_RESOURCE: &str = "/api/resource";
pub const WIRECLOUD_WORKSPACES: &str = "/api/workspaces";
pub const WIRECLOUD_WORKSPACE: &str = "/api/workspace";
