use std::io::Read;
use std::time::Duration;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use layer_core::LAYER_API_URL;
use url::Url;

use super::http_trait::{base_url, HttpClient};
use super::response::LayerResponse;

/// Minimal HTTP transport using ureq.
///
/// ureq is blocking: each call occupies the calling thread until the exchange
/// completes, so this transport suits small services and scripts that do not
/// want an async runtime.
///
/// # Example
///
/// ```ignore
/// use layer_server::{LayerServerClient, LayerServerOptions, UreqClient};
///
/// let http_client = UreqClient::new("https://api.layer.com")?;
/// let client = LayerServerClient::new(http_client, &LayerServerOptions::new("app", "token"));
/// let response = futures::executor::block_on(client.get_conversation("e67b5da2"))?;
/// ```
#[derive(Clone, Debug)]
pub struct UreqClient {
    agent: ureq::Agent,
    base_url: Url,
}

impl UreqClient {
    /// Create a new ureq transport with a 30 second timeout.
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_timeout(base_url, 30)
    }

    /// Create a new ureq transport with a custom timeout.
    pub fn with_timeout(base_url: &str, timeout_secs: u64) -> Result<Self> {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(timeout_secs))
            .build();
        Self::with_agent(base_url, agent)
    }

    /// Create a new ureq transport around a custom agent.
    pub fn with_agent(base_url: &str, agent: ureq::Agent) -> Result<Self> {
        Ok(Self {
            agent,
            base_url: base_url::parse(base_url)?,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn send(
        &self,
        method: &str,
        path: &str,
        headers: &[(&str, String)],
        json_body: Option<&str>,
    ) -> Result<LayerResponse> {
        let url = base_url::join(&self.base_url, path)?;
        let request = headers
            .iter()
            .fold(self.agent.request(method, url.as_str()), |request, (name, value)| {
                request.set(name, value)
            });

        // Perform blocking request (wrapped in async for trait compatibility)
        let result = match json_body {
            Some(body) => request.send_string(body),
            None => request.call(),
        };

        // ureq reports 4xx/5xx as errors, but they are still responses
        let response = match result {
            Ok(response) | Err(ureq::Error::Status(_, response)) => response,
            Err(ureq::Error::Transport(e)) => {
                return Err(anyhow!("HTTP {} request failed: {}", method, e));
            }
        };

        let status = response.status();
        let headers = response
            .headers_names()
            .into_iter()
            .filter_map(|name| {
                let value = response.header(&name)?.to_string();
                Some((name, value))
            })
            .collect();
        let mut body = Vec::new();
        response
            .into_reader()
            .read_to_end(&mut body)
            .map_err(|e| anyhow!("Failed to read response body: {}", e))?;

        Ok(LayerResponse::new(status, headers, body))
    }
}

impl Default for UreqClient {
    fn default() -> Self {
        Self::new(LAYER_API_URL).expect("LAYER_API_URL is a valid url")
    }
}

#[async_trait]
impl HttpClient for UreqClient {
    async fn get(&self, path: &str, headers: &[(&str, String)]) -> Result<LayerResponse> {
        self.send("GET", path, headers, None)
    }

    async fn post_json(
        &self,
        path: &str,
        headers: &[(&str, String)],
        json_body: &str,
    ) -> Result<LayerResponse> {
        self.send("POST", path, headers, Some(json_body))
    }
}
