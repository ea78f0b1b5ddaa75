use std::time::Duration;

use reqwest::Client;
use serde::{
    Deserialize,
    Serialize,
};

use crate::core::VocadexError;

const URL_ENV_VAR: &str = "VOCADEX_BACKEND_URL";
const KEY_ENV_VAR: &str = "VOCADEX_ANON_KEY";

/// Connection settings for the hosted backend.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendSettings {
    pub base_url: String,
    pub anon_key: String,
}

impl BackendSettings {
    /// Environment variables win over persisted settings.
    pub fn resolve(mut self) -> Self {
        if let Ok(url) = std::env::var(URL_ENV_VAR) {
            if !url.trim().is_empty() {
                self.base_url = url;
            }
        }
        if let Ok(key) = std::env::var(KEY_ENV_VAR) {
            if !key.trim().is_empty() {
                self.anon_key = key;
            }
        }
        self
    }

    pub fn is_configured(&self) -> bool {
        !self.base_url.trim().is_empty() && !self.anon_key.trim().is_empty()
    }
}

/// Thin pass-through to the hosted backend's REST surface. Cheap to clone;
/// every background task gets its own copy carrying the access token that
/// was current when the task was spawned.
#[derive(Debug, Clone)]
pub struct SupabaseClient {
    base_url: String,
    anon_key: String,
    access_token: Option<String>,
    http: Client,
}

impl SupabaseClient {
    pub fn new(settings: &BackendSettings) -> Result<Self, VocadexError> {
        if !settings.is_configured() {
            return Err(VocadexError::NotConfigured);
        }

        let http = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| VocadexError::Custom(format!("HTTP client build failed: {}", e)))?;

        Ok(Self {
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            anon_key: settings.anon_key.clone(),
            access_token: None,
            http,
        })
    }

    pub fn set_access_token(&mut self, token: Option<String>) {
        self.access_token = token;
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub(crate) fn http(&self) -> &Client {
        &self.http
    }

    /// Requests run as the signed-in user when a session exists, otherwise
    /// as the anonymous role.
    pub(crate) fn authed(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        let bearer = self.access_token.as_deref().unwrap_or(&self.anon_key);
        request.header("apikey", &self.anon_key).bearer_auth(bearer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configured_requires_both_fields() {
        let mut settings = BackendSettings::default();
        assert!(!settings.is_configured());

        settings.base_url = "https://example.supabase.co".to_string();
        assert!(!settings.is_configured());

        settings.anon_key = "anon".to_string();
        assert!(settings.is_configured());
    }

    #[test]
    fn test_endpoint_trims_trailing_slash() {
        let settings = BackendSettings {
            base_url: "https://example.supabase.co/".to_string(),
            anon_key: "anon".to_string(),
        };
        let client = SupabaseClient::new(&settings).unwrap();
        assert_eq!(
            client.endpoint("/rest/v1/vocab"),
            "https://example.supabase.co/rest/v1/vocab"
        );
    }

    #[test]
    fn test_unconfigured_client_is_rejected() {
        assert!(SupabaseClient::new(&BackendSettings::default()).is_err());
    }
}
