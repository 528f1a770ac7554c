//! Tool repository trait definition.

use agentforge_types::error::RepositoryError;
use agentforge_types::id::{ToolId, UserId};
use agentforge_types::tool::Tool;

/// Repository trait for tool persistence, scoped by owner.
pub trait ToolRepository: Send + Sync {
    fn create(
        &self,
        tool: &Tool,
    ) -> impl std::future::Future<Output = Result<Tool, RepositoryError>> + Send;

    fn get(
        &self,
        user_id: &UserId,
        id: &ToolId,
    ) -> impl std::future::Future<Output = Result<Option<Tool>, RepositoryError>> + Send;

    /// The owner's tools, newest first.
    fn list(
        &self,
        user_id: &UserId,
    ) -> impl std::future::Future<Output = Result<Vec<Tool>, RepositoryError>> + Send;

    fn update(
        &self,
        tool: &Tool,
    ) -> impl std::future::Future<Output = Result<Tool, RepositoryError>> + Send;

    fn delete(
        &self,
        user_id: &UserId,
        id: &ToolId,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;
}
