//! Tool catalog service.

use chrono::Utc;

use agentforge_types::error::{CatalogError, RepositoryError};
use agentforge_types::id::{ToolId, UserId};
use agentforge_types::tool::{CreateToolRequest, DEFAULT_TOOL_TYPE, Tool, UpdateToolRequest};

use crate::repository::tool::ToolRepository;
use crate::service::agent::required;

pub struct ToolService<T: ToolRepository> {
    repo: T,
}

impl<T: ToolRepository> ToolService<T> {
    pub fn new(repo: T) -> Self {
        Self { repo }
    }

    pub async fn create(
        &self,
        user_id: &UserId,
        request: CreateToolRequest,
    ) -> Result<Tool, CatalogError> {
        let now = Utc::now();
        let tool = Tool {
            id: ToolId::new(),
            user_id: user_id.clone(),
            name: required("name", &request.name)?,
            description: required("description", &request.description)?,
            tool_type: tool_type(request.tool_type.as_deref()),
            created_at: now,
            updated_at: now,
        };
        self.repo.create(&tool).await.map_err(catalog_error)
    }

    pub async fn get(&self, user_id: &UserId, id: &ToolId) -> Result<Tool, CatalogError> {
        self.repo
            .get(user_id, id)
            .await
            .map_err(catalog_error)?
            .ok_or(CatalogError::NotFound("tool"))
    }

    pub async fn list(&self, user_id: &UserId) -> Result<Vec<Tool>, CatalogError> {
        self.repo.list(user_id).await.map_err(catalog_error)
    }

    pub async fn update(
        &self,
        user_id: &UserId,
        id: &ToolId,
        request: UpdateToolRequest,
    ) -> Result<Tool, CatalogError> {
        let mut tool = self.get(user_id, id).await?;
        if let Some(name) = request.name.as_deref() {
            tool.name = required("name", name)?;
        }
        if let Some(description) = request.description.as_deref() {
            tool.description = required("description", description)?;
        }
        if request.tool_type.is_some() {
            tool.tool_type = tool_type(request.tool_type.as_deref());
        }
        tool.updated_at = Utc::now();
        self.repo.update(&tool).await.map_err(catalog_error)
    }

    pub async fn delete(&self, user_id: &UserId, id: &ToolId) -> Result<(), CatalogError> {
        self.repo.delete(user_id, id).await.map_err(catalog_error)
    }
}

fn tool_type(value: Option<&str>) -> String {
    value
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .unwrap_or(DEFAULT_TOOL_TYPE)
        .to_string()
}

fn catalog_error(e: RepositoryError) -> CatalogError {
    match e {
        RepositoryError::NotFound => CatalogError::NotFound("tool"),
        other => CatalogError::StorageError(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MemoryToolRepository;

    #[tokio::test]
    async fn test_type_defaults_to_custom() {
        let svc = ToolService::new(MemoryToolRepository::default());
        let tool = svc
            .create(
                &UserId::new(),
                CreateToolRequest {
                    name: "Search".into(),
                    description: "Web search".into(),
                    tool_type: Some("  ".into()),
                },
            )
            .await
            .unwrap();
        assert_eq!(tool.tool_type, DEFAULT_TOOL_TYPE);
    }

    #[tokio::test]
    async fn test_update_changes_type_only_when_given() {
        let svc = ToolService::new(MemoryToolRepository::default());
        let user = UserId::new();
        let tool = svc
            .create(
                &user,
                CreateToolRequest {
                    name: "Calc".into(),
                    description: "Math".into(),
                    tool_type: Some("math".into()),
                },
            )
            .await
            .unwrap();

        let renamed = svc
            .update(
                &user,
                &tool.id,
                UpdateToolRequest {
                    name: Some("Calculator".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(renamed.tool_type, "math");
        assert_eq!(renamed.name, "Calculator");

        let other = UserId::new();
        assert!(matches!(
            svc.update(&other, &tool.id, UpdateToolRequest::default()).await,
            Err(CatalogError::NotFound("tool"))
        ));
    }
}
