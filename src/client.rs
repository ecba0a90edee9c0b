use crate::config::{AuthConfig, ServerConfig};
use crate::constants::DEFAULT_TIMEOUT_SECS;
use anyhow::{Context, Result};
use bytes::Bytes;
use reqwest::{
    header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION},
    Client, Method, RequestBuilder, StatusCode,
};
use std::{env, time::Duration};

/// Transport options shared by every request of one invocation
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// Overrides the server's configured auth with a bearer token
    pub oauth_token: Option<String>,
    pub timeout: Duration,
    pub insecure_skip_verify: bool,
}

impl Default for ClientOptions {
    fn default() -> Self {
        ClientOptions {
            oauth_token: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            insecure_skip_verify: false,
        }
    }
}

/// Status and fully-read body of a response
#[derive(Debug)]
pub struct HttpResponse {
    pub status: StatusCode,
    pub body: Bytes,
}

impl HttpResponse {
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// HTTP client bound to one FIWARE server
pub struct NgsiClient {
    pub base_url: String,
    pub client: Client,
}

impl NgsiClient {
    pub fn new(server: &ServerConfig, opts: &ClientOptions) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("*/*"));

        if let Some(token) = &opts.oauth_token {
            let hv = HeaderValue::from_str(&format!("Bearer {}", token))?;
            headers.insert(AUTHORIZATION, hv);
        } else {
            match &server.auth {
                AuthConfig::None => {}
                AuthConfig::Basic {
                    username,
                    password_env,
                } => {
                    let pw = env::var(password_env)
                        .with_context(|| format!("reading password from ${}", password_env))?;
                    let token =
                        base64::encode_config(format!("{}:{}", username, pw), base64::STANDARD);
                    let hv = HeaderValue::from_str(&format!("Basic {}", token))?;
                    headers.insert(AUTHORIZATION, hv);
                }
                AuthConfig::Bearer { token_env } => {
                    let tok = env::var(token_env)
                        .with_context(|| format!("reading token from ${}", token_env))?;
                    let hv = HeaderValue::from_str(&format!("Bearer {}", tok))?;
                    headers.insert(AUTHORIZATION, hv);
                }
            }
        }

        let client = Client::builder()
            .default_headers(headers)
            .timeout(opts.timeout)
            .danger_accept_invalid_certs(opts.insecure_skip_verify)
            .build()?;
        Ok(NgsiClient {
            base_url: server.url.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Start a request for `path`, relative to the server's base URL
    pub fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.client.request(method, self.url(path))
    }

    pub fn get(&self, path: &str) -> RequestBuilder {
        self.request(Method::GET, path)
    }

    pub fn post(&self, path: &str) -> RequestBuilder {
        self.request(Method::POST, path)
    }

    pub fn put(&self, path: &str) -> RequestBuilder {
        self.request(Method::PUT, path)
    }

    pub fn delete(&self, path: &str) -> RequestBuilder {
        self.request(Method::DELETE, path)
    }

    /// Send a request and read the whole body
    ///
    /// Non-2xx statuses are returned as-is; each command decides which statuses it
    /// accepts.
    pub async fn send(&self, req: RequestBuilder) -> reqwest::Result<HttpResponse> {
        let req = req.build()?;
        tracing::debug!("{} {}", req.method(), req.url());

        let resp = self.client.execute(req).await?;
        let status = resp.status();
        let body = resp.bytes().await?;
        tracing::debug!("status {} ({} bytes)", status, body.len());

        Ok(HttpResponse { status, body })
    }
}
