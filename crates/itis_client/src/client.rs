use std::time::Duration;

use taxcheck_config::{DEFAULT_ENDPOINT, DEFAULT_SEARCH_PARAM, DEFAULT_TIMEOUT_SECS};
use taxcheck_recon::{AuthorityReply, NameAuthority};
use thiserror::Error;
use tracing::debug;
use url::Url;

pub const USER_AGENT: &str = concat!("taxcheck/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("invalid endpoint URL '{url}': {message}")]
    InvalidEndpoint { url: String, message: String },

    #[error("failed to build HTTP client: {0}")]
    Build(String),
}

/// Connection settings for [`ItisClient`].
#[derive(Debug, Clone)]
pub struct ClientOptions {
    pub endpoint: String,
    pub search_param: String,
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            search_param: DEFAULT_SEARCH_PARAM.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: USER_AGENT.to_string(),
        }
    }
}

/// Scientific-name search client (blocking).
#[derive(Debug, Clone)]
pub struct ItisClient {
    http: reqwest::blocking::Client,
    endpoint: Url,
    search_param: String,
}

impl ItisClient {
    pub fn new(options: ClientOptions) -> Result<Self, ClientError> {
        let endpoint = Url::parse(&options.endpoint).map_err(|e| ClientError::InvalidEndpoint {
            url: options.endpoint.clone(),
            message: e.to_string(),
        })?;
        if !matches!(endpoint.scheme(), "http" | "https") {
            return Err(ClientError::InvalidEndpoint {
                url: options.endpoint,
                message: format!("unsupported scheme '{}'", endpoint.scheme()),
            });
        }

        let http = reqwest::blocking::Client::builder()
            .timeout(options.timeout)
            .user_agent(options.user_agent)
            .build()
            .map_err(|e| ClientError::Build(e.to_string()))?;

        Ok(Self {
            http,
            endpoint,
            search_param: options.search_param,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Endpoint with the search key appended as a query parameter.
    /// Existing query pairs on the endpoint are kept.
    pub fn search_url(&self, key: &str) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut().append_pair(&self.search_param, key);
        url
    }
}

impl NameAuthority for ItisClient {
    fn search(&self, key: &str) -> Result<AuthorityReply, String> {
        let url = self.search_url(key);
        debug!(%url, "GET");

        let resp = self.http.get(url).send().map_err(|e| e.to_string())?;
        let status = resp.status().as_u16();
        let body = resp.text().map_err(|e| e.to_string())?;

        debug!(status, bytes = body.len(), "response");
        Ok(AuthorityReply::new(status, body))
    }
}
