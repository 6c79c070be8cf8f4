/// Default host of the Layer Platform API.
pub const LAYER_API_URL: &str = "https://api.layer.com";

/// Versioned media type every request must accept.
pub const LAYER_MEDIA_TYPE: &str = "application/vnd.layer+json; version=2.0";
pub const JSON_CONTENT_TYPE: &str = "application/json";

// Option keys, also used as serde field names.
pub const APP_ID_KEY: &str = "layer_app_id";
pub const APP_TOKEN_KEY: &str = "layer_app_token";

pub const APP_ID_ENV: &str = "LAYER_APP_ID";
pub const APP_TOKEN_ENV: &str = "LAYER_APP_TOKEN";

/// Page size applied by the API to conversation and message listings.
pub const PAGE_SIZE: usize = 100;
