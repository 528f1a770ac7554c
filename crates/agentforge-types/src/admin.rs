//! Server-level settings managed from the admin panel.

use serde::{Deserialize, Serialize};

pub const KEY_DATABASE_URL: &str = "database_url";
pub const KEY_SERVER_PORT: &str = "server_port";
pub const KEY_LOG_LEVEL: &str = "log_level";

/// Persisted admin settings. Each field maps to one key/value row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminSettings {
    pub database_url: Option<String>,
    pub server_port: Option<String>,
    pub log_level: Option<String>,
}

impl AdminSettings {
    /// Overlay the fields present in `update`.
    pub fn merge(&mut self, update: AdminSettings) {
        if update.database_url.is_some() {
            self.database_url = update.database_url;
        }
        if update.server_port.is_some() {
            self.server_port = update.server_port;
        }
        if update.log_level.is_some() {
            self.log_level = update.log_level;
        }
    }
}

/// Response of the admin settings endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminSettingsView {
    #[serde(flatten)]
    pub settings: AdminSettings,
    /// True when a stored value differs from what the running server uses.
    pub restart_required: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_only_present_fields() {
        let mut current = AdminSettings {
            database_url: Some("sqlite://a.db".into()),
            server_port: Some("3001".into()),
            log_level: None,
        };
        current.merge(AdminSettings {
            log_level: Some("debug".into()),
            ..Default::default()
        });
        assert_eq!(current.database_url.as_deref(), Some("sqlite://a.db"));
        assert_eq!(current.log_level.as_deref(), Some("debug"));
    }

    #[test]
    fn test_view_flattens_settings() {
        let view = AdminSettingsView {
            settings: AdminSettings {
                server_port: Some("8080".into()),
                ..Default::default()
            },
            restart_required: true,
        };
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["serverPort"], "8080");
        assert_eq!(json["restartRequired"], true);
    }
}
