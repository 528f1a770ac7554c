//! Application state wiring all services together.
//!
//! AppState holds the concrete service instances used by both the CLI and
//! the REST API. Services are generic over repository/crypto traits; the
//! aliases below pin them to the infra implementations.

use std::path::PathBuf;
use std::sync::Arc;

use agentforge_core::assist::service::AssistService;
use agentforge_core::llm::factory::ProviderFactory;
use agentforge_core::llm::resolver::ProviderResolver;
use agentforge_core::menu::service::MenuService;
use agentforge_core::repository::admin::AdminSettingRepository;
use agentforge_core::service::admin::{AdminService, LogLevelControl};
use agentforge_core::service::agent::AgentService;
use agentforge_core::service::auth::AuthService;
use agentforge_core::service::error_log::ErrorLogService;
use agentforge_core::service::problem::ProblemService;
use agentforge_core::service::setting::SettingService;
use agentforge_core::service::tool::ToolService;
use agentforge_infra::crypto::hash::Sha256ContentHasher;
use agentforge_infra::crypto::password::Argon2PasswordHasher;
use agentforge_infra::crypto::token::RandomTokenMinter;
use agentforge_infra::crypto::vault::{KEY_FILE_NAME, VaultCrypto};
use agentforge_infra::llm::factory::DefaultProviderFactory;
use agentforge_infra::oauth::OAuthClient;
use agentforge_infra::sqlite::admin::SqliteAdminSettingRepository;
use agentforge_infra::sqlite::agent::SqliteAgentRepository;
use agentforge_infra::sqlite::error_log::SqliteErrorLogRepository;
use agentforge_infra::sqlite::pool::{DatabasePool, default_database_url};
use agentforge_infra::sqlite::problem::SqliteProblemRepository;
use agentforge_infra::sqlite::setting::SqliteSettingRepository;
use agentforge_infra::sqlite::token::SqliteTokenRepository;
use agentforge_infra::sqlite::tool::SqliteToolRepository;
use agentforge_infra::sqlite::user::SqliteUserRepository;
use agentforge_types::admin::{AdminSettings, KEY_DATABASE_URL, KEY_SERVER_PORT};
use agentforge_types::config::AppConfig;

use crate::http::oauth_state::OAuthStateStore;
use crate::http::rate_limit::RateLimiter;

pub type ConcreteAuthService = AuthService<
    SqliteUserRepository,
    SqliteTokenRepository,
    Argon2PasswordHasher,
    RandomTokenMinter,
    Sha256ContentHasher,
>;

pub type ConcreteSettingService = SettingService<SqliteSettingRepository, VaultCrypto>;
pub type ConcreteResolver = ProviderResolver<SqliteSettingRepository, VaultCrypto>;
pub type ConcreteAgentService = AgentService<SqliteAgentRepository>;
pub type ConcreteToolService = ToolService<SqliteToolRepository>;
pub type ConcreteProblemService =
    ProblemService<SqliteProblemRepository, SqliteSettingRepository, VaultCrypto>;
pub type ConcreteMenuService = MenuService<SqliteSettingRepository, VaultCrypto>;
pub type ConcreteAssistService = AssistService<SqliteSettingRepository, VaultCrypto>;
pub type ConcreteErrorLogService = ErrorLogService<SqliteErrorLogRepository, Sha256ContentHasher>;
pub type ConcreteAdminService =
    AdminService<SqliteAdminSettingRepository, Arc<dyn LogLevelControl>>;

/// Shared application state holding all services.
#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<ConcreteAuthService>,
    pub settings: Arc<ConcreteSettingService>,
    pub agents: Arc<ConcreteAgentService>,
    pub tools: Arc<ConcreteToolService>,
    pub problems: Arc<ConcreteProblemService>,
    pub menu: Arc<ConcreteMenuService>,
    pub assist: Arc<ConcreteAssistService>,
    pub error_log: Arc<ConcreteErrorLogService>,
    pub admin: Arc<ConcreteAdminService>,
    pub oauth: OAuthClient,
    pub oauth_states: OAuthStateStore,
    pub rate_limiter: RateLimiter,
    pub config: Arc<AppConfig>,
    /// Port `serve` binds: `--port`, else the admin-stored port, else config.
    pub server_port: u16,
}

/// Everything needed to wire services, independent of where it came from.
pub struct StateParts {
    pub config: AppConfig,
    pub db_pool: DatabasePool,
    pub database_url: String,
    pub server_port: u16,
    pub cipher: VaultCrypto,
    pub factory: Arc<dyn ProviderFactory>,
    pub log: Arc<dyn LogLevelControl>,
}

impl AppState {
    /// Open the database in `data_dir`, load the vault key and wire services.
    ///
    /// A database URL or port saved from the admin panel takes effect here,
    /// on the next start.
    pub async fn init(
        data_dir: PathBuf,
        config: AppConfig,
        log: Arc<dyn LogLevelControl>,
        port_override: Option<u16>,
    ) -> anyhow::Result<Self> {
        tokio::fs::create_dir_all(&data_dir).await?;

        let mut database_url = default_database_url(&data_dir);
        let mut db_pool = DatabasePool::new(&database_url).await?;

        let stored = SqliteAdminSettingRepository::new(db_pool.clone())
            .get_all()
            .await?;
        let stored_value = |key: &str| {
            stored
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.clone())
        };

        if let Some(url) = stored_value(KEY_DATABASE_URL) {
            if url != database_url {
                tracing::info!(database_url = %url, "using database configured by admin");
                db_pool = DatabasePool::new(&url).await?;
                database_url = url;
            }
        }

        let stored_port = stored_value(KEY_SERVER_PORT).and_then(|p| p.parse::<u16>().ok());
        let server_port = port_override
            .or(stored_port)
            .unwrap_or(config.server.port);

        let cipher = VaultCrypto::from_key_file(&data_dir.join(KEY_FILE_NAME))?;

        Ok(Self::from_parts(StateParts {
            config,
            db_pool,
            database_url,
            server_port,
            cipher,
            factory: Arc::new(DefaultProviderFactory),
            log,
        }))
    }

    pub fn from_parts(parts: StateParts) -> Self {
        let StateParts {
            config,
            db_pool,
            database_url,
            server_port,
            cipher,
            factory,
            log,
        } = parts;

        let auth = AuthService::new(
            SqliteUserRepository::new(db_pool.clone()),
            SqliteTokenRepository::new(db_pool.clone()),
            Argon2PasswordHasher::new(),
            RandomTokenMinter,
            Sha256ContentHasher::new(),
            config.auth.token_ttl_secs,
        );

        let settings = Arc::new(SettingService::new(
            SqliteSettingRepository::new(db_pool.clone()),
            cipher,
        ));
        let resolver = Arc::new(ProviderResolver::new(
            settings.clone(),
            config.providers.clone(),
            factory,
        ));

        let running = AdminSettings {
            database_url: Some(database_url),
            server_port: Some(server_port.to_string()),
            log_level: Some(config.log.level.clone()),
        };

        Self {
            auth: Arc::new(auth),
            settings,
            agents: Arc::new(AgentService::new(SqliteAgentRepository::new(db_pool.clone()))),
            tools: Arc::new(ToolService::new(SqliteToolRepository::new(db_pool.clone()))),
            problems: Arc::new(ProblemService::new(
                SqliteProblemRepository::new(db_pool.clone()),
                resolver.clone(),
            )),
            menu: Arc::new(MenuService::new(resolver.clone(), config.sandbox.clone())),
            assist: Arc::new(AssistService::new(resolver)),
            error_log: Arc::new(ErrorLogService::new(
                SqliteErrorLogRepository::new(db_pool.clone()),
                Sha256ContentHasher::new(),
            )),
            admin: Arc::new(AdminService::new(
                SqliteAdminSettingRepository::new(db_pool.clone()),
                log,
                running,
            )),
            oauth: OAuthClient::new(),
            oauth_states: OAuthStateStore::default(),
            rate_limiter: RateLimiter::new(&config.rate_limit),
            config: Arc::new(config),
            server_port,
        }
    }
}
