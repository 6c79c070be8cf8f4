use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::constants::{APP_ID_ENV, APP_ID_KEY, APP_TOKEN_ENV, APP_TOKEN_KEY};

/// Credentials identifying an application against the Layer Platform API.
///
/// No validation is performed: either value may be left unset, in which case
/// it simply reads back as `None`.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayerServerOptions {
    #[serde(rename = "layer_app_id", default, skip_serializing_if = "Option::is_none")]
    app_id: Option<String>,
    #[serde(rename = "layer_app_token", default, skip_serializing_if = "Option::is_none")]
    app_token: Option<String>,
}

impl LayerServerOptions {
    pub fn new(app_id: impl Into<String>, app_token: impl Into<String>) -> Self {
        Self {
            app_id: Some(app_id.into()),
            app_token: Some(app_token.into()),
        }
    }

    /// Build options from a string-keyed mapping, using the `layer_app_id` and
    /// `layer_app_token` keys. Other keys are ignored.
    pub fn from_map(map: &HashMap<String, String>) -> Self {
        Self {
            app_id: map.get(APP_ID_KEY).cloned(),
            app_token: map.get(APP_TOKEN_KEY).cloned(),
        }
    }

    /// Reads `LAYER_APP_ID` and `LAYER_APP_TOKEN`. Missing variables leave the
    /// corresponding value unset.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            app_id: lookup(APP_ID_ENV),
            app_token: lookup(APP_TOKEN_ENV),
        }
    }

    pub fn with_app_id(mut self, app_id: impl Into<String>) -> Self {
        self.app_id = Some(app_id.into());
        self
    }

    pub fn with_app_token(mut self, app_token: impl Into<String>) -> Self {
        self.app_token = Some(app_token.into());
        self
    }

    pub fn set_app_id(&mut self, app_id: impl Into<String>) -> &mut Self {
        self.app_id = Some(app_id.into());
        self
    }

    pub fn set_app_token(&mut self, app_token: impl Into<String>) -> &mut Self {
        self.app_token = Some(app_token.into());
        self
    }

    pub fn app_id(&self) -> Option<&str> {
        self.app_id.as_deref()
    }

    pub fn app_token(&self) -> Option<&str> {
        self.app_token.as_deref()
    }

    /// Look up a value by its option key. Unknown or unset keys yield `None`.
    pub fn get(&self, key: &str) -> Option<&str> {
        match key {
            APP_ID_KEY => self.app_id(),
            APP_TOKEN_KEY => self.app_token(),
            _ => None,
        }
    }

    /// The values that are set, keyed by option key.
    pub fn to_map(&self) -> HashMap<String, String> {
        let mut map = HashMap::new();
        if let Some(app_id) = &self.app_id {
            map.insert(APP_ID_KEY.to_string(), app_id.clone());
        }
        if let Some(app_token) = &self.app_token {
            map.insert(APP_TOKEN_KEY.to_string(), app_token.clone());
        }
        map
    }
}

impl<K, V> FromIterator<(K, V)> for LayerServerOptions
where
    K: AsRef<str>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut options = Self::default();
        for (key, value) in iter {
            match key.as_ref() {
                APP_ID_KEY => {
                    options.set_app_id(value);
                }
                APP_TOKEN_KEY => {
                    options.set_app_token(value);
                }
                _ => {}
            }
        }
        options
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_app_id_reads_back() {
        let mut options = LayerServerOptions::default();
        options.set_app_id("app_id");
        assert_eq!(options.get("layer_app_id"), Some("app_id"));
        assert_eq!(options.app_id(), Some("app_id"));
    }

    #[test]
    fn set_app_token_reads_back() {
        let mut options = LayerServerOptions::default();
        let token = options.set_app_token("app_token").get("layer_app_token");
        assert_eq!(token, Some("app_token"));
    }

    #[test]
    fn unset_and_unknown_keys_are_absent() {
        let options = LayerServerOptions::default().with_app_id("app_id");
        assert_eq!(options.get("layer_app_token"), None);
        assert_eq!(options.get("not_a_key"), None);
        assert_eq!(options.app_token(), None);
    }

    #[test]
    fn discrete_arguments() {
        let options = LayerServerOptions::new("app_id", "app_token");
        assert_eq!(options.to_map().get("layer_app_token").map(String::as_str), Some("app_token"));
    }

    #[test]
    fn from_map_ignores_unknown_keys() {
        let mut map = HashMap::new();
        map.insert("layer_app_id".to_string(), "app_id".to_string());
        map.insert("layer_app_token".to_string(), "app_token".to_string());
        map.insert("other".to_string(), "ignored".to_string());

        let options = LayerServerOptions::from_map(&map);
        assert_eq!(options.get("layer_app_id"), Some("app_id"));
        assert_eq!(options.get("layer_app_token"), Some("app_token"));
        assert_eq!(options.to_map().len(), 2);
        assert_eq!(LayerServerOptions::from_map(&options.to_map()), options);
    }

    #[test]
    fn from_iterator_of_pairs() {
        let options: LayerServerOptions = [("layer_app_id", "id"), ("layer_app_token", "tok")]
            .into_iter()
            .collect();
        assert_eq!(options, LayerServerOptions::new("id", "tok"));
    }

    #[test]
    fn lookup_with_missing_variable() {
        let options = LayerServerOptions::from_lookup(|name| {
            (name == APP_ID_ENV).then(|| "from_env".to_string())
        });
        assert_eq!(options.app_id(), Some("from_env"));
        assert_eq!(options.app_token(), None);
    }

    #[test]
    fn serde_uses_option_keys() {
        let options = LayerServerOptions::new("app_id", "app_token");
        let json = serde_json::to_value(&options).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"layer_app_id": "app_id", "layer_app_token": "app_token"})
        );

        let partial: LayerServerOptions =
            serde_json::from_str(r#"{"layer_app_id": "only_id"}"#).unwrap();
        assert_eq!(partial.app_id(), Some("only_id"));
        assert_eq!(partial.app_token(), None);
    }
}
