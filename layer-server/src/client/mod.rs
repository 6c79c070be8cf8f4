mod client;
mod endpoint;
mod http_trait;
mod response;
#[cfg(feature = "reqwest-client")]
mod reqwest_impl;
#[cfg(feature = "ureq-client")]
mod ureq_impl;

pub use client::LayerServerClient;
pub use endpoint::{Endpoint, Method};
pub use http_trait::HttpClient;
pub use response::LayerResponse;

#[cfg(feature = "reqwest-client")]
pub use reqwest_impl::ReqwestClient;
#[cfg(feature = "ureq-client")]
pub use ureq_impl::UreqClient;
