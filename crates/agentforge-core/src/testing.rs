//! In-memory fakes for service tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};

use agentforge_types::agent::Agent;
use agentforge_types::error::{AuthError, RepositoryError, SettingError};
use agentforge_types::id::{AgentId, ToolId, UserId};
use agentforge_types::llm::{CompletionRequest, CompletionResponse, FinishKind, LlmError, Usage};
use agentforge_types::problem::Problem;
use agentforge_types::provider::ProviderKind;
use agentforge_types::setting::{ProviderCredentials, UpdateSettingsRequest, UserSettings};
use agentforge_types::tool::Tool;
use agentforge_types::user::{AuthToken, OAuthProvider, User, UserRole};

use crate::llm::box_provider::BoxLlmProvider;
use crate::llm::factory::ProviderFactory;
use crate::llm::provider::LlmProvider;
use crate::llm::resolver::ProviderResolver;
use crate::repository::admin::AdminSettingRepository;
use crate::repository::agent::AgentRepository;
use crate::repository::error_log::ErrorLogRepository;
use crate::repository::problem::ProblemRepository;
use crate::repository::setting::SettingRepository;
use crate::repository::token::TokenRepository;
use crate::repository::tool::ToolRepository;
use crate::repository::user::UserRepository;
use crate::service::admin::LogLevelControl;
use crate::service::credential::{PasswordHasher, SecretCipher, TokenMinter};
use crate::service::hash::ContentHasher;
use crate::service::setting::SettingService;

#[derive(Default)]
pub struct MemoryUserRepository {
    users: Mutex<Vec<User>>,
    identities: Mutex<Vec<(OAuthProvider, String, UserId)>>,
}

impl UserRepository for MemoryUserRepository {
    async fn create(&self, user: &User) -> Result<User, RepositoryError> {
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.email == user.email) {
            return Err(RepositoryError::Conflict(user.email.clone()));
        }
        users.push(user.clone());
        Ok(user.clone())
    }

    async fn get_by_id(&self, id: &UserId) -> Result<Option<User>, RepositoryError> {
        Ok(self.users.lock().unwrap().iter().find(|u| &u.id == id).cloned())
    }

    async fn get_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError> {
        Ok(self.users.lock().unwrap().iter().find(|u| u.email == email).cloned())
    }

    async fn list(&self) -> Result<Vec<User>, RepositoryError> {
        Ok(self.users.lock().unwrap().clone())
    }

    async fn set_role(&self, id: &UserId, role: UserRole) -> Result<(), RepositoryError> {
        let mut users = self.users.lock().unwrap();
        let user = users
            .iter_mut()
            .find(|u| &u.id == id)
            .ok_or(RepositoryError::NotFound)?;
        user.role = role;
        Ok(())
    }

    async fn link_identity(
        &self,
        provider: OAuthProvider,
        subject: &str,
        user_id: &UserId,
    ) -> Result<(), RepositoryError> {
        self.identities
            .lock()
            .unwrap()
            .push((provider, subject.to_string(), user_id.clone()));
        Ok(())
    }

    async fn find_by_identity(
        &self,
        provider: OAuthProvider,
        subject: &str,
    ) -> Result<Option<User>, RepositoryError> {
        let user_id = self
            .identities
            .lock()
            .unwrap()
            .iter()
            .find(|(p, s, _)| *p == provider && s == subject)
            .map(|(_, _, id)| id.clone());
        match user_id {
            Some(id) => self.get_by_id(&id).await,
            None => Ok(None),
        }
    }
}

#[derive(Default)]
pub struct MemoryTokenRepository {
    tokens: Mutex<Vec<AuthToken>>,
}

impl TokenRepository for MemoryTokenRepository {
    async fn create(&self, token: &AuthToken) -> Result<(), RepositoryError> {
        self.tokens.lock().unwrap().push(token.clone());
        Ok(())
    }

    async fn get_by_hash(&self, token_hash: &str) -> Result<Option<AuthToken>, RepositoryError> {
        Ok(self
            .tokens
            .lock()
            .unwrap()
            .iter()
            .find(|t| t.token_hash == token_hash)
            .cloned())
    }

    async fn delete_by_hash(&self, token_hash: &str) -> Result<bool, RepositoryError> {
        let mut tokens = self.tokens.lock().unwrap();
        let before = tokens.len();
        tokens.retain(|t| t.token_hash != token_hash);
        Ok(tokens.len() != before)
    }

    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<u64, RepositoryError> {
        let mut tokens = self.tokens.lock().unwrap();
        let before = tokens.len();
        tokens.retain(|t| !t.is_expired(now));
        Ok((before - tokens.len()) as u64)
    }
}

#[derive(Default)]
pub struct MemorySettingRepository {
    rows: Mutex<HashMap<UserId, UserSettings>>,
}

impl SettingRepository for MemorySettingRepository {
    async fn get(&self, user_id: &UserId) -> Result<Option<UserSettings>, RepositoryError> {
        Ok(self.rows.lock().unwrap().get(user_id).cloned())
    }

    async fn upsert(&self, settings: &UserSettings) -> Result<(), RepositoryError> {
        self.rows
            .lock()
            .unwrap()
            .insert(settings.user_id.clone(), settings.clone());
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryAgentRepository {
    agents: Mutex<Vec<Agent>>,
}

impl AgentRepository for MemoryAgentRepository {
    async fn create(&self, agent: &Agent) -> Result<Agent, RepositoryError> {
        self.agents.lock().unwrap().push(agent.clone());
        Ok(agent.clone())
    }

    async fn get(&self, user_id: &UserId, id: &AgentId) -> Result<Option<Agent>, RepositoryError> {
        Ok(self
            .agents
            .lock()
            .unwrap()
            .iter()
            .find(|a| &a.id == id && &a.user_id == user_id)
            .cloned())
    }

    async fn list(&self, user_id: &UserId) -> Result<Vec<Agent>, RepositoryError> {
        Ok(self
            .agents
            .lock()
            .unwrap()
            .iter()
            .rev()
            .filter(|a| &a.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn update(&self, agent: &Agent) -> Result<Agent, RepositoryError> {
        let mut agents = self.agents.lock().unwrap();
        let slot = agents
            .iter_mut()
            .find(|a| a.id == agent.id && a.user_id == agent.user_id)
            .ok_or(RepositoryError::NotFound)?;
        *slot = agent.clone();
        Ok(agent.clone())
    }

    async fn delete(&self, user_id: &UserId, id: &AgentId) -> Result<(), RepositoryError> {
        let mut agents = self.agents.lock().unwrap();
        let before = agents.len();
        agents.retain(|a| !(&a.id == id && &a.user_id == user_id));
        if agents.len() == before {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryToolRepository {
    tools: Mutex<Vec<Tool>>,
}

impl ToolRepository for MemoryToolRepository {
    async fn create(&self, tool: &Tool) -> Result<Tool, RepositoryError> {
        self.tools.lock().unwrap().push(tool.clone());
        Ok(tool.clone())
    }

    async fn get(&self, user_id: &UserId, id: &ToolId) -> Result<Option<Tool>, RepositoryError> {
        Ok(self
            .tools
            .lock()
            .unwrap()
            .iter()
            .find(|t| &t.id == id && &t.user_id == user_id)
            .cloned())
    }

    async fn list(&self, user_id: &UserId) -> Result<Vec<Tool>, RepositoryError> {
        Ok(self
            .tools
            .lock()
            .unwrap()
            .iter()
            .rev()
            .filter(|t| &t.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn update(&self, tool: &Tool) -> Result<Tool, RepositoryError> {
        let mut tools = self.tools.lock().unwrap();
        let slot = tools
            .iter_mut()
            .find(|t| t.id == tool.id && t.user_id == tool.user_id)
            .ok_or(RepositoryError::NotFound)?;
        *slot = tool.clone();
        Ok(tool.clone())
    }

    async fn delete(&self, user_id: &UserId, id: &ToolId) -> Result<(), RepositoryError> {
        let mut tools = self.tools.lock().unwrap();
        let before = tools.len();
        tools.retain(|t| !(&t.id == id && &t.user_id == user_id));
        if tools.len() == before {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryProblemRepository {
    problems: Mutex<Vec<Problem>>,
}

impl ProblemRepository for MemoryProblemRepository {
    async fn create(&self, problem: &Problem) -> Result<Problem, RepositoryError> {
        self.problems.lock().unwrap().push(problem.clone());
        Ok(problem.clone())
    }

    async fn list(&self, user_id: &UserId) -> Result<Vec<Problem>, RepositoryError> {
        Ok(self
            .problems
            .lock()
            .unwrap()
            .iter()
            .rev()
            .filter(|p| &p.user_id == user_id)
            .cloned()
            .collect())
    }
}

#[derive(Default)]
pub struct MemoryErrorLogRepository {
    seen: Mutex<HashMap<(UserId, String), i64>>,
}

impl ErrorLogRepository for MemoryErrorLogRepository {
    async fn record(
        &self,
        user_id: &UserId,
        fingerprint: &str,
        _message: &str,
        _seen_at: DateTime<Utc>,
    ) -> Result<bool, RepositoryError> {
        let mut seen = self.seen.lock().unwrap();
        let count = seen
            .entry((user_id.clone(), fingerprint.to_string()))
            .or_insert(0);
        *count += 1;
        Ok(*count == 1)
    }
}

#[derive(Default)]
pub struct MemoryAdminRepository {
    rows: Mutex<HashMap<String, String>>,
}

impl AdminSettingRepository for MemoryAdminRepository {
    async fn get_all(&self) -> Result<Vec<(String, String)>, RepositoryError> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), RepositoryError> {
        self.rows
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Accepts any directive except `reject`, recording what was applied.
#[derive(Clone, Default)]
pub struct RecordingLogControl {
    applied: Arc<Mutex<Vec<String>>>,
}

impl RecordingLogControl {
    pub fn applied(&self) -> Vec<String> {
        self.applied.lock().unwrap().clone()
    }
}

impl LogLevelControl for RecordingLogControl {
    fn set_level(&self, directive: &str) -> Result<(), String> {
        if directive == "reject" {
            return Err(format!("invalid directive '{directive}'"));
        }
        self.applied.lock().unwrap().push(directive.to_string());
        Ok(())
    }
}

pub struct FakePasswordHasher;

impl PasswordHasher for FakePasswordHasher {
    fn hash_password(&self, password: &str) -> Result<String, AuthError> {
        Ok(format!("hashed:{password}"))
    }

    fn verify_password(&self, password: &str, hash: &str) -> bool {
        hash == format!("hashed:{password}")
    }
}

#[derive(Default)]
pub struct FakeMinter {
    next: AtomicU64,
}

impl TokenMinter for FakeMinter {
    fn mint(&self) -> String {
        format!("af_test_{}", self.next.fetch_add(1, Ordering::SeqCst))
    }
}

pub struct FakeHasher;

impl ContentHasher for FakeHasher {
    fn compute_hash(&self, content: &str) -> String {
        format!("hash({content})")
    }
}

/// Reverses the plaintext behind a marker prefix.
pub struct FakeCipher;

impl SecretCipher for FakeCipher {
    fn seal(&self, plaintext: &str) -> Result<String, SettingError> {
        Ok(format!("sealed:{}", plaintext.chars().rev().collect::<String>()))
    }

    fn open(&self, sealed: &str) -> Result<String, SettingError> {
        sealed
            .strip_prefix("sealed:")
            .map(|s| s.chars().rev().collect())
            .ok_or(SettingError::Decryption)
    }
}

/// Provider that always answers with the same text.
pub struct CannedProvider {
    reply: String,
}

impl CannedProvider {
    pub fn replying(reply: &str) -> Self {
        Self {
            reply: reply.to_string(),
        }
    }
}

impl LlmProvider for CannedProvider {
    fn name(&self) -> &str {
        "canned"
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<CompletionResponse, LlmError> {
        Ok(CompletionResponse {
            content: self.reply.clone(),
            model: request.model.clone(),
            finish: FinishKind::Stop,
            usage: Usage::default(),
        })
    }
}

pub struct CannedFactory {
    reply: String,
}

impl CannedFactory {
    pub fn replying(reply: &str) -> Self {
        Self {
            reply: reply.to_string(),
        }
    }
}

impl ProviderFactory for CannedFactory {
    fn create(&self, _credentials: &ProviderCredentials) -> Result<BoxLlmProvider, LlmError> {
        Ok(BoxLlmProvider::new(CannedProvider::replying(&self.reply)))
    }
}

/// A user with a stored key for `kind` and a resolver whose provider
/// always replies with `reply`.
pub async fn resolver_with_key(
    kind: ProviderKind,
    reply: &str,
) -> (UserId, Arc<ProviderResolver<MemorySettingRepository, FakeCipher>>) {
    let settings = Arc::new(SettingService::new(
        MemorySettingRepository::default(),
        FakeCipher,
    ));
    let user = UserId::new();
    let key_field = match kind {
        ProviderKind::OpenAi => "openaiApiKey",
        ProviderKind::HuggingFace => "huggingfaceApiKey",
        ProviderKind::Github => "githubToken",
        ProviderKind::LiteLlm => "litellmApiKey",
        ProviderKind::OpenRouter => "openrouterApiKey",
    };
    let request: UpdateSettingsRequest =
        serde_json::from_str(&format!(r#"{{"{key_field}":"test-key-0123456789"}}"#)).unwrap();
    settings.update(&user, &request).await.unwrap();

    let resolver = ProviderResolver::new(
        settings,
        HashMap::new(),
        Arc::new(CannedFactory::replying(reply)),
    );
    (user, Arc::new(resolver))
}
