//! Agent repository trait definition.

use agentforge_types::agent::Agent;
use agentforge_types::error::RepositoryError;
use agentforge_types::id::{AgentId, UserId};

/// Repository trait for agent persistence, scoped by owner.
pub trait AgentRepository: Send + Sync {
    fn create(
        &self,
        agent: &Agent,
    ) -> impl std::future::Future<Output = Result<Agent, RepositoryError>> + Send;

    fn get(
        &self,
        user_id: &UserId,
        id: &AgentId,
    ) -> impl std::future::Future<Output = Result<Option<Agent>, RepositoryError>> + Send;

    /// The owner's agents, newest first.
    fn list(
        &self,
        user_id: &UserId,
    ) -> impl std::future::Future<Output = Result<Vec<Agent>, RepositoryError>> + Send;

    /// Update name/description. `RepositoryError::NotFound` if no row matched
    /// both id and owner.
    fn update(
        &self,
        agent: &Agent,
    ) -> impl std::future::Future<Output = Result<Agent, RepositoryError>> + Send;

    fn delete(
        &self,
        user_id: &UserId,
        id: &AgentId,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;
}
