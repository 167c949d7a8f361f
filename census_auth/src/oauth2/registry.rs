//! Explicit provider registry.
//!
//! Providers are configured as plain data and handed to the host at startup
//! instead of being registered into process-wide mutable state.

use std::collections::HashMap;
use std::env;

use crate::config::{AUTH_SUBDOMAIN, BASE_DOMAIN, CONNECTION_SCHEME, URL_TEMPLATE};
use crate::context::UrlTemplate;

use super::errors::OAuth2Error;

const GOOGLE_USERINFO_URL: &str = "https://www.googleapis.com/oauth2/v3/userinfo";

/// Configuration for one OAuth2 provider adapter
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    pub client_id: String,
    pub client_secret: String,
    /// Redirect URL the provider calls back after the handshake,
    /// built from the tenant URL template
    pub callback_url: String,
    pub scopes: Vec<String>,
    /// Userinfo endpoint override for providers that need one
    pub userinfo_url: Option<String>,
}

/// Provider-name to adapter-configuration mapping, passed into the
/// request-handling pipeline at startup
#[derive(Debug, Clone, Default)]
pub struct ProviderRegistry {
    providers: HashMap<String, ProviderConfig>,
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the registry from the environment. Providers without credentials
    /// are skipped rather than half-configured.
    pub fn from_env() -> Self {
        let mut registry = Self::new();

        match provider_credentials("GOOGLE") {
            Some((client_id, client_secret)) => {
                registry.register(
                    "google",
                    ProviderConfig {
                        client_id,
                        client_secret,
                        callback_url: callback_url_for("google"),
                        scopes: vec![
                            "openid".to_string(),
                            "email".to_string(),
                            "profile".to_string(),
                        ],
                        userinfo_url: Some(GOOGLE_USERINFO_URL.to_string()),
                    },
                );
            }
            None => tracing::debug!("google credentials not configured, provider skipped"),
        }

        match provider_credentials("FACEBOOK") {
            Some((client_id, client_secret)) => {
                registry.register(
                    "facebook",
                    ProviderConfig {
                        client_id,
                        client_secret,
                        callback_url: callback_url_for("facebook"),
                        scopes: vec!["email".to_string(), "public_profile".to_string()],
                        userinfo_url: None,
                    },
                );
            }
            None => tracing::debug!("facebook credentials not configured, provider skipped"),
        }

        registry
    }

    pub fn register(&mut self, name: impl Into<String>, config: ProviderConfig) {
        let name = name.into();
        tracing::info!("Registering OAuth2 provider: {}", name);
        self.providers.insert(name, config);
    }

    pub fn get(&self, name: &str) -> Option<&ProviderConfig> {
        self.providers.get(name)
    }

    /// Like get, but missing providers become an error the caller can surface
    pub fn get_required(&self, name: &str) -> Result<&ProviderConfig, OAuth2Error> {
        self.providers
            .get(name)
            .ok_or_else(|| OAuth2Error::UnknownProvider(name.to_string()))
    }

    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.providers.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }
}

fn provider_credentials(provider: &str) -> Option<(String, String)> {
    let client_id = env::var(format!("OAUTH2_{provider}_CLIENT_ID")).ok()?;
    let client_secret = env::var(format!("OAUTH2_{provider}_CLIENT_SECRET")).ok()?;
    Some((client_id, client_secret))
}

fn callback_url_for(provider: &str) -> String {
    UrlTemplate::new(&URL_TEMPLATE).render(
        &CONNECTION_SCHEME,
        &AUTH_SUBDOMAIN,
        &BASE_DOMAIN,
        &format!("{provider}/callback"),
    )
}
