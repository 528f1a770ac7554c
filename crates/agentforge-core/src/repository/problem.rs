//! Problem log repository trait definition.

use agentforge_types::error::RepositoryError;
use agentforge_types::id::UserId;
use agentforge_types::problem::Problem;

pub trait ProblemRepository: Send + Sync {
    fn create(
        &self,
        problem: &Problem,
    ) -> impl std::future::Future<Output = Result<Problem, RepositoryError>> + Send;

    /// The owner's problem log, newest first.
    fn list(
        &self,
        user_id: &UserId,
    ) -> impl std::future::Future<Output = Result<Vec<Problem>, RepositoryError>> + Send;
}
