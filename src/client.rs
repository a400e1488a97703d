use std::net::Ipv6Addr;
use std::time::Duration;

use anyhow::{anyhow, Context};
use log::debug;

use crate::config::ClientConfig;
use crate::types::{InterfaceDetail, InterfaceRef};

/// Read-only view of the agent used by the commands.
pub(crate) trait CtrlClient {
    /// Returns `None` when the agent has no record for the interface.
    fn get_interface_detail(
        &self,
        interface: &InterfaceRef,
    ) -> Result<Option<InterfaceDetail>, anyhow::Error>;
}

/// Talks JSON over HTTP to the agent.
pub(crate) struct HttpCtrlClient {
    agent: ureq::Agent,
    base_url: String,
}

pub(crate) fn create_ctrl_client(config: &ClientConfig) -> Result<HttpCtrlClient, anyhow::Error> {
    if config.host.is_empty() {
        return Err(anyhow!("Agent host must not be empty"));
    }
    if config.timeout_ms == 0 {
        return Err(anyhow!("Request timeout must be greater than zero"));
    }

    let agent = ureq::AgentBuilder::new()
        .timeout(Duration::from_millis(config.timeout_ms))
        .build();
    let base_url = base_url(&config.host, config.port);
    debug!("Created control client for {base_url}");

    Ok(HttpCtrlClient { agent, base_url })
}

fn base_url(host: &str, port: u16) -> String {
    // IPv6 literals need brackets to be distinguishable from the port separator.
    match host.parse::<Ipv6Addr>() {
        Ok(..) => format!("http://[{host}]:{port}"),
        Err(..) => format!("http://{host}:{port}"),
    }
}

impl CtrlClient for HttpCtrlClient {
    fn get_interface_detail(
        &self,
        interface: &InterfaceRef,
    ) -> Result<Option<InterfaceDetail>, anyhow::Error> {
        let request = match interface {
            InterfaceRef::Id(id) => self.agent.get(&format!("{}/interfaces/{id}", self.base_url)),
            InterfaceRef::Name(name) => self
                .agent
                .get(&format!("{}/interfaces", self.base_url))
                .query("name", name),
        };
        debug!("Requesting interface detail: GET {}", request.url());

        let response = match request.call() {
            Ok(response) => response,
            Err(ureq::Error::Status(404, _)) => {
                debug!("Agent has no record for interface '{interface}'");
                return Ok(None);
            }
            Err(ureq::Error::Status(code, response)) => {
                return Err(anyhow!(
                    "Agent responded with {code} {} for interface '{interface}'",
                    response.status_text()
                ));
            }
            Err(err) => {
                return Err(err).with_context(|| format!("Querying interface '{interface}'"));
            }
        };

        if response.status() == 204 {
            return Ok(None);
        }

        let body = response
            .into_string()
            .context("Reading agent response")?;
        if body.trim().is_empty() {
            return Ok(None);
        }

        serde_json::from_str::<Option<InterfaceDetail>>(&body)
            .with_context(|| format!("Decoding interface detail for '{interface}'"))
    }
}
