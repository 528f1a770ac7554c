//! Server configuration types.
//!
//! `AppConfig` mirrors `config.toml` in the data directory. Every section and
//! field has a default, so an empty or missing file is a valid configuration.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::provider::ProviderKind;
use crate::setting::mask_secret;
use crate::user::OAuthProvider;

/// Default sandbox link prefix; the percent-encoded menu JSON is appended.
pub const DEFAULT_SANDBOX_BASE_URL: &str = "https://codesandbox.io/s/new?file=/src/App.js:";

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub rate_limit: RateLimitConfig,
    #[serde(default)]
    pub sandbox: SandboxConfig,
    #[serde(default)]
    pub log: LogConfig,
    /// Per-provider overrides keyed by wire name (`[providers.openai]`).
    #[serde(default)]
    pub providers: HashMap<ProviderKind, ProviderEndpoint>,
    #[serde(default)]
    pub oauth: OAuthConfig,
}

impl AppConfig {
    pub fn provider(&self, kind: ProviderKind) -> Option<&ProviderEndpoint> {
        self.providers.get(&kind)
    }

    /// A copy with every secret masked, for display.
    pub fn redacted(&self) -> Self {
        let mut copy = self.clone();
        for endpoint in copy.providers.values_mut() {
            endpoint.api_key = endpoint.api_key.as_deref().map(mask_secret);
        }
        for client in [&mut copy.oauth.github, &mut copy.oauth.google]
            .into_iter()
            .flatten()
        {
            client.client_secret = mask_secret(&client.client_secret);
        }
        copy
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3001
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Bearer token lifetime.
    #[serde(default = "default_token_ttl")]
    pub token_ttl_secs: u64,
}

fn default_token_ttl() -> u64 {
    3600
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            token_ttl_secs: default_token_ttl(),
        }
    }
}

/// Fixed-window request limit per client IP.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_max_requests")]
    pub max_requests: u32,
    #[serde(default = "default_window_secs")]
    pub window_secs: u64,
}

fn default_true() -> bool {
    true
}

fn default_max_requests() -> u32 {
    100
}

fn default_window_secs() -> u64 {
    15 * 60
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_requests: default_max_requests(),
            window_secs: default_window_secs(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SandboxConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_sandbox_base_url")]
    pub base_url: String,
}

fn default_sandbox_base_url() -> String {
    DEFAULT_SANDBOX_BASE_URL.to_string()
}

impl Default for SandboxConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            base_url: default_sandbox_base_url(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    /// Filter directive used when neither `RUST_LOG` nor `-v` is given.
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub json: bool,
    /// Bridge spans to the OpenTelemetry stdout exporter.
    #[serde(default)]
    pub otel: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
            otel: false,
        }
    }
}

/// Server-side overrides for one provider.
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct ProviderEndpoint {
    pub base_url: Option<String>,
    pub default_model: Option<String>,
    /// Server-wide key used when a user has not stored their own.
    pub api_key: Option<String>,
}

impl fmt::Debug for ProviderEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderEndpoint")
            .field("base_url", &self.base_url)
            .field("default_model", &self.default_model)
            .field("api_key", &self.api_key.as_ref().map(|_| "[redacted]"))
            .finish()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OAuthConfig {
    pub github: Option<OAuthClientConfig>,
    pub google: Option<OAuthClientConfig>,
    /// Where to send the browser after sign-in; the token is appended as
    /// `#token=...`. Without it the callback answers with JSON.
    pub success_redirect: Option<String>,
}

impl OAuthConfig {
    pub fn client(&self, provider: OAuthProvider) -> Option<&OAuthClientConfig> {
        match provider {
            OAuthProvider::Github => self.github.as_ref(),
            OAuthProvider::Google => self.google.as_ref(),
        }
    }
}

#[derive(Clone, Serialize, Deserialize)]
pub struct OAuthClientConfig {
    pub client_id: String,
    pub client_secret: String,
    /// Must match the callback URL registered with the provider.
    pub redirect_url: String,
}

impl fmt::Debug for OAuthClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OAuthClientConfig")
            .field("client_id", &self.client_id)
            .field("client_secret", &"[redacted]")
            .field("redirect_url", &self.redirect_url)
            .finish()
    }
}
