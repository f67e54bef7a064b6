use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use super::ConfigError;
use crate::http_client::HttpTimeouts;

/// Collaborator address used when nothing else is configured.
pub const DEFAULT_ENDPOINT_URL: &str = "http://localhost:5000/post/";

const MIN_TIMEOUT_SECS: u64 = 1;

/// Top-level settings file.
///
/// Config keys (TOML): `endpoint.url`, `endpoint.connect_timeout_secs`,
/// `endpoint.read_timeout_secs`, `endpoint.write_timeout_secs`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppSettings {
    #[serde(default)]
    pub endpoint: EndpointSettings,
}

impl AppSettings {
    pub(crate) fn normalized(self) -> Self {
        Self {
            endpoint: self.endpoint.normalized(),
        }
    }
}

/// Where submissions go and how long a request may take.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointSettings {
    #[serde(default = "default_endpoint_url")]
    pub url: String,
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
    #[serde(default = "default_io_timeout_secs")]
    pub read_timeout_secs: u64,
    #[serde(default = "default_io_timeout_secs")]
    pub write_timeout_secs: u64,
}

impl Default for EndpointSettings {
    fn default() -> Self {
        Self {
            url: default_endpoint_url(),
            connect_timeout_secs: default_connect_timeout_secs(),
            read_timeout_secs: default_io_timeout_secs(),
            write_timeout_secs: default_io_timeout_secs(),
        }
    }
}

impl EndpointSettings {
    fn normalized(self) -> Self {
        Self {
            url: self.url.trim().to_string(),
            connect_timeout_secs: self.connect_timeout_secs.max(MIN_TIMEOUT_SECS),
            read_timeout_secs: self.read_timeout_secs.max(MIN_TIMEOUT_SECS),
            write_timeout_secs: self.write_timeout_secs.max(MIN_TIMEOUT_SECS),
        }
    }

    /// Socket timeouts for the submission agent.
    pub fn timeouts(&self) -> HttpTimeouts {
        HttpTimeouts {
            connect: Duration::from_secs(self.connect_timeout_secs),
            read: Duration::from_secs(self.read_timeout_secs),
            write: Duration::from_secs(self.write_timeout_secs),
        }
    }

    /// Parse the configured URL, accepting only `http` and `https`.
    pub fn parsed_url(&self) -> Result<Url, ConfigError> {
        let invalid = |reason: String| ConfigError::InvalidEndpoint {
            url: self.url.clone(),
            reason,
        };
        let url = Url::parse(&self.url).map_err(|err| invalid(err.to_string()))?;
        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(invalid(format!("unsupported scheme '{other}'"))),
        }
    }
}

fn default_endpoint_url() -> String {
    DEFAULT_ENDPOINT_URL.to_string()
}

fn default_connect_timeout_secs() -> u64 {
    10
}

fn default_io_timeout_secs() -> u64 {
    30
}
