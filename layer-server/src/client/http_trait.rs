use anyhow::Result;
use async_trait::async_trait;

use super::response::LayerResponse;

/// Minimal async HTTP transport that can be implemented with any HTTP library.
///
/// The transport owns everything about the connection: API host and port,
/// TLS, pooling and timeouts. The client only hands it a path and headers.
///
/// Implementations must return `Ok` for every response that was actually
/// received, whatever its status code. `Err` is reserved for failures where
/// no response exists (connection refused, DNS, timeout, broken body).
///
/// # Implementing the trait
///
/// ```ignore
/// use async_trait::async_trait;
/// use layer_server::{HttpClient, LayerResponse};
///
/// #[derive(Clone)]
/// struct MyHttpClient {
///     // Your HTTP client here
/// }
///
/// #[async_trait]
/// impl HttpClient for MyHttpClient {
///     async fn get(&self, path: &str, headers: &[(&str, String)]) -> anyhow::Result<LayerResponse> {
///         Ok(LayerResponse::new(200, vec![], "[]"))
///     }
///
///     async fn post_json(
///         &self,
///         path: &str,
///         headers: &[(&str, String)],
///         json_body: &str,
///     ) -> anyhow::Result<LayerResponse> {
///         Ok(LayerResponse::new(201, vec![], json_body))
///     }
/// }
/// ```
#[async_trait]
pub trait HttpClient: Send + Sync + Clone {
    /// Perform a GET request.
    ///
    /// # Arguments
    /// * `path` - Path relative to the API host, query string included
    /// * `headers` - Headers to set on the request
    async fn get(&self, path: &str, headers: &[(&str, String)]) -> Result<LayerResponse>;

    /// Perform a POST request with a JSON body.
    ///
    /// # Arguments
    /// * `path` - Path relative to the API host
    /// * `headers` - Headers to set on the request
    /// * `json_body` - The encoded JSON body
    async fn post_json(
        &self,
        path: &str,
        headers: &[(&str, String)],
        json_body: &str,
    ) -> Result<LayerResponse>;
}

#[cfg(any(feature = "reqwest-client", feature = "ureq-client"))]
pub(crate) mod base_url {
    use anyhow::Result;
    use url::Url;

    /// Parse the API host, making sure its path ends with a slash so joined
    /// paths keep any prefix.
    pub(crate) fn parse(base_url: &str) -> Result<Url> {
        let mut base_url = Url::parse(base_url)?;
        // we need a trailing slash, if not present we append it
        if !base_url.path().ends_with('/') {
            base_url.set_path(&format!("{}/", base_url.path()));
        }
        Ok(base_url)
    }

    pub(crate) fn join(base_url: &Url, path: &str) -> Result<Url> {
        Ok(base_url.join(path.trim_start_matches('/'))?)
    }

}
