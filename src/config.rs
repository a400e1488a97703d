use std::fs;
use std::path::Path;

use anyhow::Context;
use log::debug;
use serde::Deserialize;

const DEFAULT_HOST: &str = "localhost";
const DEFAULT_PORT: u16 = 5909;
const DEFAULT_TIMEOUT_MS: u64 = 5000;

/// Connection settings for the agent.
#[derive(Deserialize, Debug, Clone)]
#[cfg_attr(test, derive(PartialEq))]
#[serde(default, deny_unknown_fields)]
pub struct ClientConfig {
    pub(crate) host: String,
    pub(crate) port: u16,
    pub(crate) timeout_ms: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }
}

impl ClientConfig {
    /// Command line (or environment) values take precedence over the ones loaded from file.
    pub(crate) fn with_overrides(
        mut self,
        host: Option<&String>,
        port: Option<&u16>,
        timeout_ms: Option<&u64>,
    ) -> Self {
        if let Some(host) = host {
            self.host = host.clone();
        }
        if let Some(&port) = port {
            self.port = port;
        }
        if let Some(&timeout_ms) = timeout_ms {
            self.timeout_ms = timeout_ms;
        }
        self
    }
}

/// Load the client configuration, falling back to defaults when no file is given.
pub(crate) fn load_config(path: Option<&str>) -> Result<ClientConfig, anyhow::Error> {
    let Some(path) = path else {
        return Ok(ClientConfig::default());
    };

    let data = fs::read_to_string(Path::new(path))
        .with_context(|| format!("Reading config file '{path}'"))?;
    let config: ClientConfig =
        serde_yaml::from_str(&data).with_context(|| format!("Parsing config file '{path}'"))?;
    debug!("Loaded client config: {config:?}");

    Ok(config)
}
