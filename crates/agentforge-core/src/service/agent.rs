//! Agent catalog service.

use chrono::Utc;

use agentforge_types::agent::{Agent, CreateAgentRequest, UpdateAgentRequest};
use agentforge_types::error::{CatalogError, RepositoryError};
use agentforge_types::id::{AgentId, UserId};

use crate::repository::agent::AgentRepository;

pub struct AgentService<A: AgentRepository> {
    repo: A,
}

impl<A: AgentRepository> AgentService<A> {
    pub fn new(repo: A) -> Self {
        Self { repo }
    }

    pub async fn create(
        &self,
        user_id: &UserId,
        request: CreateAgentRequest,
    ) -> Result<Agent, CatalogError> {
        let now = Utc::now();
        let agent = Agent {
            id: AgentId::new(),
            user_id: user_id.clone(),
            name: required("name", &request.name)?,
            description: required("description", &request.description)?,
            created_at: now,
            updated_at: now,
        };
        self.repo.create(&agent).await.map_err(catalog_error)
    }

    pub async fn get(&self, user_id: &UserId, id: &AgentId) -> Result<Agent, CatalogError> {
        self.repo
            .get(user_id, id)
            .await
            .map_err(catalog_error)?
            .ok_or(CatalogError::NotFound("agent"))
    }

    pub async fn list(&self, user_id: &UserId) -> Result<Vec<Agent>, CatalogError> {
        self.repo.list(user_id).await.map_err(catalog_error)
    }

    pub async fn update(
        &self,
        user_id: &UserId,
        id: &AgentId,
        request: UpdateAgentRequest,
    ) -> Result<Agent, CatalogError> {
        let mut agent = self.get(user_id, id).await?;
        if let Some(name) = request.name.as_deref() {
            agent.name = required("name", name)?;
        }
        if let Some(description) = request.description.as_deref() {
            agent.description = required("description", description)?;
        }
        agent.updated_at = Utc::now();
        self.repo.update(&agent).await.map_err(catalog_error)
    }

    pub async fn delete(&self, user_id: &UserId, id: &AgentId) -> Result<(), CatalogError> {
        self.repo.delete(user_id, id).await.map_err(catalog_error)
    }
}

/// Trim a required text field, rejecting blanks.
pub(crate) fn required(field: &str, value: &str) -> Result<String, CatalogError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(CatalogError::Validation(format!("{field} is required")));
    }
    Ok(value.to_string())
}

fn catalog_error(e: RepositoryError) -> CatalogError {
    match e {
        RepositoryError::NotFound => CatalogError::NotFound("agent"),
        other => CatalogError::StorageError(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MemoryAgentRepository;

    fn create_request(name: &str, description: &str) -> CreateAgentRequest {
        CreateAgentRequest {
            name: name.into(),
            description: description.into(),
        }
    }

    #[tokio::test]
    async fn test_create_trims_and_validates() {
        let svc = AgentService::new(MemoryAgentRepository::default());
        let user = UserId::new();
        let agent = svc
            .create(&user, create_request("  Planner ", "Breaks work down"))
            .await
            .unwrap();
        assert_eq!(agent.name, "Planner");

        let err = svc.create(&user, create_request("   ", "x")).await.unwrap_err();
        assert!(matches!(err, CatalogError::Validation(_)));
    }

    #[tokio::test]
    async fn test_agents_are_scoped_to_owner() {
        let svc = AgentService::new(MemoryAgentRepository::default());
        let owner = UserId::new();
        let other = UserId::new();
        let agent = svc.create(&owner, create_request("Coder", "Writes code")).await.unwrap();

        assert!(matches!(
            svc.get(&other, &agent.id).await,
            Err(CatalogError::NotFound("agent"))
        ));
        assert!(svc.list(&other).await.unwrap().is_empty());
        assert!(svc.delete(&other, &agent.id).await.is_err());
        assert!(svc.get(&owner, &agent.id).await.is_ok());
    }

    #[tokio::test]
    async fn test_partial_update() {
        let svc = AgentService::new(MemoryAgentRepository::default());
        let user = UserId::new();
        let agent = svc.create(&user, create_request("Coder", "Writes code")).await.unwrap();

        let updated = svc
            .update(
                &user,
                &agent.id,
                UpdateAgentRequest {
                    description: Some("Reviews code".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.name, "Coder");
        assert_eq!(updated.description, "Reviews code");
    }
}
