//! Server-level settings editable by admins.
//!
//! `log_level` takes effect immediately through [`LogLevelControl`]; the
//! database URL and port are only read at startup, so changing them flags
//! `restart_required`.

use agentforge_types::admin::{
    AdminSettings, AdminSettingsView, KEY_DATABASE_URL, KEY_LOG_LEVEL, KEY_SERVER_PORT,
};
use agentforge_types::error::AdminError;

use crate::repository::admin::AdminSettingRepository;

/// Runtime control over the active log filter.
pub trait LogLevelControl: Send + Sync {
    /// Validate and apply a filter directive such as `debug` or
    /// `info,agentforge_api=trace`.
    fn set_level(&self, directive: &str) -> Result<(), String>;
}

impl<T: LogLevelControl + ?Sized> LogLevelControl for std::sync::Arc<T> {
    fn set_level(&self, directive: &str) -> Result<(), String> {
        (**self).set_level(directive)
    }
}

pub struct AdminService<A: AdminSettingRepository, L: LogLevelControl> {
    repo: A,
    log: L,
    /// Values the running process started with.
    running: AdminSettings,
}

impl<A: AdminSettingRepository, L: LogLevelControl> AdminService<A, L> {
    pub fn new(repo: A, log: L, running: AdminSettings) -> Self {
        Self { repo, log, running }
    }

    pub async fn get(&self) -> Result<AdminSettingsView, AdminError> {
        let stored = self.load().await?;
        Ok(self.view(stored))
    }

    pub async fn update(&self, update: AdminSettings) -> Result<AdminSettingsView, AdminError> {
        let update = AdminSettings {
            database_url: trimmed(update.database_url),
            server_port: trimmed(update.server_port),
            log_level: trimmed(update.log_level),
        };

        if let Some(port) = update.server_port.as_deref() {
            port.parse::<u16>()
                .map_err(|_| AdminError::InvalidPort(port.to_string()))?;
        }
        if let Some(level) = update.log_level.as_deref() {
            self.log.set_level(level).map_err(AdminError::InvalidLogLevel)?;
            tracing::info!(level, "log level changed");
        }

        for (key, value) in [
            (KEY_DATABASE_URL, &update.database_url),
            (KEY_SERVER_PORT, &update.server_port),
            (KEY_LOG_LEVEL, &update.log_level),
        ] {
            if let Some(value) = value {
                self.repo
                    .set(key, value)
                    .await
                    .map_err(|e| AdminError::StorageError(e.to_string()))?;
            }
        }

        let mut stored = self.load().await?;
        stored.merge(update);
        Ok(self.view(stored))
    }

    async fn load(&self) -> Result<AdminSettings, AdminError> {
        let rows = self
            .repo
            .get_all()
            .await
            .map_err(|e| AdminError::StorageError(e.to_string()))?;
        let mut settings = AdminSettings::default();
        for (key, value) in rows {
            match key.as_str() {
                KEY_DATABASE_URL => settings.database_url = Some(value),
                KEY_SERVER_PORT => settings.server_port = Some(value),
                KEY_LOG_LEVEL => settings.log_level = Some(value),
                other => tracing::debug!(key = other, "ignoring unknown admin setting"),
            }
        }
        Ok(settings)
    }

    fn view(&self, stored: AdminSettings) -> AdminSettingsView {
        let differs = |stored: &Option<String>, running: &Option<String>| {
            stored.is_some() && stored != running
        };
        let restart_required = differs(&stored.database_url, &self.running.database_url)
            || differs(&stored.server_port, &self.running.server_port);
        AdminSettingsView {
            settings: stored,
            restart_required,
        }
    }
}

fn trimmed(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{MemoryAdminRepository, RecordingLogControl};

    fn running() -> AdminSettings {
        AdminSettings {
            database_url: Some("sqlite:///data/agentforge.db".into()),
            server_port: Some("3001".into()),
            log_level: Some("info".into()),
        }
    }

    #[tokio::test]
    async fn test_log_level_applied_without_restart() {
        let log = RecordingLogControl::default();
        let svc = AdminService::new(MemoryAdminRepository::default(), log.clone(), running());

        let view = svc
            .update(AdminSettings {
                log_level: Some(" debug ".into()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(view.settings.log_level.as_deref(), Some("debug"));
        assert!(!view.restart_required);
        assert_eq!(log.applied(), vec!["debug".to_string()]);
    }

    #[tokio::test]
    async fn test_port_change_requires_restart() {
        let svc = AdminService::new(
            MemoryAdminRepository::default(),
            RecordingLogControl::default(),
            running(),
        );
        let view = svc
            .update(AdminSettings {
                server_port: Some("8080".into()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert!(view.restart_required);
        assert!(svc.get().await.unwrap().restart_required);
    }

    #[tokio::test]
    async fn test_invalid_values_rejected() {
        let svc = AdminService::new(
            MemoryAdminRepository::default(),
            RecordingLogControl::default(),
            running(),
        );
        assert!(matches!(
            svc.update(AdminSettings {
                server_port: Some("99999".into()),
                ..Default::default()
            })
            .await,
            Err(AdminError::InvalidPort(_))
        ));
        assert!(matches!(
            svc.update(AdminSettings {
                log_level: Some("reject".into()),
                ..Default::default()
            })
            .await,
            Err(AdminError::InvalidLogLevel(_))
        ));
        assert!(svc.get().await.unwrap().settings.server_port.is_none());
    }
}
