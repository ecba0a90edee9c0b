#![allow(dead_code)]

use ngsi_cli::client::{ClientOptions, NgsiClient};
use ngsi_cli::config::ServerConfig;
use wiremock::MockServer;

/// Client pointed at a mock server
pub fn client_for(server: &MockServer) -> NgsiClient {
    NgsiClient::new(&ServerConfig::from_url(server.uri()), &ClientOptions::default()).unwrap()
}

/// Client pointed at a port nothing listens on
pub fn unreachable_client() -> NgsiClient {
    NgsiClient::new(
        &ServerConfig::from_url("http://127.0.0.1:1"),
        &ClientOptions::default(),
    )
    .unwrap()
}

pub fn text(buf: Vec<u8>) -> String {
    String::from_utf8(buf).unwrap()
}
