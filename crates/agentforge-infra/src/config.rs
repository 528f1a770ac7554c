//! Configuration loader for AgentForge.
//!
//! Reads `config.toml` from the data directory (`~/.agentforge/` by default)
//! into [`AppConfig`], then layers environment overrides on top. Falls back
//! to defaults when the file is missing or malformed.

use std::path::{Path, PathBuf};

use agentforge_types::config::AppConfig;
use agentforge_types::provider::ProviderKind;

/// Environment variable that relocates the data directory.
pub const DATA_DIR_ENV: &str = "AGENTFORGE_DATA_DIR";

/// Resolve the data directory: `AGENTFORGE_DATA_DIR`, else `~/.agentforge`.
pub fn resolve_data_dir() -> PathBuf {
    data_dir_from(|key| std::env::var(key).ok())
}

fn data_dir_from(lookup: impl Fn(&str) -> Option<String>) -> PathBuf {
    match lookup(DATA_DIR_ENV).filter(|dir| !dir.trim().is_empty()) {
        Some(dir) => PathBuf::from(dir),
        None => dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".agentforge"),
    }
}

/// Load configuration from `{data_dir}/config.toml`.
///
/// - If the file does not exist, returns [`AppConfig::default()`].
/// - If the file exists but fails to parse, logs a warning and returns the default.
pub async fn load_config(data_dir: &Path) -> AppConfig {
    let config_path = data_dir.join("config.toml");

    let content = match tokio::fs::read_to_string(&config_path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config.toml found at {}, using defaults", config_path.display());
            return AppConfig::default();
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, using defaults", config_path.display());
            return AppConfig::default();
        }
    };

    match toml::from_str::<AppConfig>(&content) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!(
                "Failed to parse {}: {err}, using defaults",
                config_path.display()
            );
            AppConfig::default()
        }
    }
}

/// Process-environment variable holding the server-level key for `kind`.
pub fn provider_key_env(kind: ProviderKind) -> &'static str {
    match kind {
        ProviderKind::OpenAi => "OPENAI_API_KEY",
        ProviderKind::HuggingFace => "HF_TOKEN",
        ProviderKind::Github => "GITHUB_TOKEN",
        ProviderKind::LiteLlm => "LITELLM_API_KEY",
        ProviderKind::OpenRouter => "OPENROUTER_API_KEY",
    }
}

/// Apply environment overrides from the process environment.
pub fn apply_env_overrides(config: AppConfig) -> AppConfig {
    apply_overrides(config, |key| std::env::var(key).ok())
}

/// Apply `AGENTFORGE_HOST`, `AGENTFORGE_PORT` and server-level provider keys
/// read through `lookup`. Provider keys only fill an unset `api_key`.
pub fn apply_overrides(mut config: AppConfig, lookup: impl Fn(&str) -> Option<String>) -> AppConfig {
    if let Some(host) = lookup("AGENTFORGE_HOST").filter(|h| !h.trim().is_empty()) {
        config.server.host = host.trim().to_string();
    }
    if let Some(port) = lookup("AGENTFORGE_PORT") {
        match port.trim().parse::<u16>() {
            Ok(port) => config.server.port = port,
            Err(_) => tracing::warn!(value = %port, "ignoring invalid AGENTFORGE_PORT"),
        }
    }

    for kind in ProviderKind::ALL {
        let Some(key) = lookup(provider_key_env(kind)).filter(|k| !k.trim().is_empty()) else {
            continue;
        };
        let endpoint = config.providers.entry(kind).or_default();
        if endpoint.api_key.is_none() {
            endpoint.api_key = Some(key.trim().to_string());
        }
    }
    config
}
