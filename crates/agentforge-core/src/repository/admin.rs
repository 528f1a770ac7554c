//! Admin settings key/value repository trait definition.

use agentforge_types::error::RepositoryError;

pub trait AdminSettingRepository: Send + Sync {
    /// All stored `(key, value)` pairs.
    fn get_all(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<(String, String)>, RepositoryError>> + Send;

    fn set(
        &self,
        key: &str,
        value: &str,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;
}
