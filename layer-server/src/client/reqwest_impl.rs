use std::time::Duration;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use layer_core::LAYER_API_URL;
use url::Url;

use super::http_trait::{base_url, HttpClient};
use super::response::LayerResponse;

/// Async HTTP transport built on reqwest.
///
/// This is the recommended transport: requests are truly non-blocking and
/// share reqwest's connection pool, so many calls can be in flight at once
/// through a single clone-able instance.
///
/// # Example
///
/// ```ignore
/// use layer_server::{LayerServerClient, LayerServerOptions, ReqwestClient};
///
/// #[tokio::main]
/// async fn main() -> anyhow::Result<()> {
///     let http_client = ReqwestClient::new("https://api.layer.com")?;
///     let client = LayerServerClient::new(http_client, &LayerServerOptions::from_env());
///     let response = client.get_conversation("e67b5da2").await?;
///     println!("{}", response.status());
///     Ok(())
/// }
/// ```
#[derive(Clone, Debug)]
pub struct ReqwestClient {
    client: reqwest::Client,
    base_url: Url,
}

impl ReqwestClient {
    /// Create a new reqwest transport with a 30 second timeout.
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_timeout(base_url, 30)
    }

    /// Create a new reqwest transport with a custom timeout.
    pub fn with_timeout(base_url: &str, timeout_secs: u64) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;
        Self::with_client(base_url, client)
    }

    /// Create a new reqwest transport around a custom client configuration.
    pub fn with_client(base_url: &str, client: reqwest::Client) -> Result<Self> {
        Ok(Self {
            client,
            base_url: base_url::parse(base_url)?,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    async fn send(
        &self,
        method: reqwest::Method,
        path: &str,
        headers: &[(&str, String)],
        json_body: Option<&str>,
    ) -> Result<LayerResponse> {
        let url = base_url::join(&self.base_url, path)?;
        let mut request = self.client.request(method.clone(), url);
        for (name, value) in headers {
            request = request.header(*name, value.as_str());
        }
        if let Some(body) = json_body {
            request = request.body(body.to_string());
        }

        // Error statuses are passed through, so no error_for_status() here
        let response = request
            .send()
            .await
            .map_err(|e| anyhow!("HTTP {} request failed: {}", method, e))?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_string(),
                    String::from_utf8_lossy(value.as_bytes()).into_owned(),
                )
            })
            .collect();
        let body = response
            .bytes()
            .await
            .map_err(|e| anyhow!("Failed to read response body: {}", e))?;

        Ok(LayerResponse::new(status, headers, body.to_vec()))
    }
}

impl Default for ReqwestClient {
    fn default() -> Self {
        Self::new(LAYER_API_URL).expect("Failed to build reqwest client")
    }
}

#[async_trait]
impl HttpClient for ReqwestClient {
    async fn get(&self, path: &str, headers: &[(&str, String)]) -> Result<LayerResponse> {
        self.send(reqwest::Method::GET, path, headers, None).await
    }

    async fn post_json(
        &self,
        path: &str,
        headers: &[(&str, String)],
        json_body: &str,
    ) -> Result<LayerResponse> {
        self.send(reqwest::Method::POST, path, headers, Some(json_body))
            .await
    }
}
