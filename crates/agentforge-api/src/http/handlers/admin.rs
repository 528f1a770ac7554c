//! Admin panel: server-level settings.

use axum::Json;
use axum::extract::State;
use serde::Deserialize;

use agentforge_types::admin::{AdminSettings, AdminSettingsView};

use crate::http::error::AppError;
use crate::http::extractors::auth::AdminUser;
use crate::http::extractors::json::ApiJson;
use crate::state::AppState;

/// Body of `POST /api/admin/settings`. The port may be sent as a number or
/// a string.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminSettingsUpdate {
    pub database_url: Option<String>,
    pub server_port: Option<PortValue>,
    pub log_level: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum PortValue {
    Number(u64),
    Text(String),
}

impl From<AdminSettingsUpdate> for AdminSettings {
    fn from(update: AdminSettingsUpdate) -> Self {
        AdminSettings {
            database_url: update.database_url,
            server_port: update.server_port.map(|port| match port {
                PortValue::Number(n) => n.to_string(),
                PortValue::Text(s) => s,
            }),
            log_level: update.log_level,
        }
    }
}

/// GET /api/admin/settings
pub async fn get_settings(
    State(state): State<AppState>,
    _admin: AdminUser,
) -> Result<Json<AdminSettingsView>, AppError> {
    Ok(Json(state.admin.get().await?))
}

/// POST /api/admin/settings
pub async fn update_settings(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    ApiJson(body): ApiJson<AdminSettingsUpdate>,
) -> Result<Json<AdminSettingsView>, AppError> {
    let view = state.admin.update(body.into()).await?;
    tracing::info!(user_id = %admin.id, "admin settings updated");
    Ok(Json(view))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_port_accepts_number_or_string() {
        let numeric: AdminSettingsUpdate = serde_json::from_str(r#"{"serverPort":3002}"#).unwrap();
        let text: AdminSettingsUpdate = serde_json::from_str(r#"{"serverPort":"3003"}"#).unwrap();
        assert_eq!(AdminSettings::from(numeric).server_port.as_deref(), Some("3002"));
        assert_eq!(AdminSettings::from(text).server_port.as_deref(), Some("3003"));
    }
}
