//! SQLite tool repository implementation.

use sqlx::Row;

use agentforge_core::repository::tool::ToolRepository;
use agentforge_types::error::RepositoryError;
use agentforge_types::id::{ToolId, UserId};
use agentforge_types::tool::Tool;

use super::pool::DatabasePool;
use super::{format_datetime, parse_datetime, query_error};

pub struct SqliteToolRepository {
    pool: DatabasePool,
}

impl SqliteToolRepository {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

fn tool_from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Tool, RepositoryError> {
    let id: String = row.try_get("id").map_err(query_error)?;
    let user_id: String = row.try_get("user_id").map_err(query_error)?;
    let created_at: String = row.try_get("created_at").map_err(query_error)?;
    let updated_at: String = row.try_get("updated_at").map_err(query_error)?;

    Ok(Tool {
        id: id
            .parse::<ToolId>()
            .map_err(|e| RepositoryError::Query(format!("invalid tool id: {e}")))?,
        user_id: user_id
            .parse::<UserId>()
            .map_err(|e| RepositoryError::Query(format!("invalid user id: {e}")))?,
        name: row.try_get("name").map_err(query_error)?,
        description: row.try_get("description").map_err(query_error)?,
        tool_type: row.try_get("tool_type").map_err(query_error)?,
        created_at: parse_datetime(&created_at)?,
        updated_at: parse_datetime(&updated_at)?,
    })
}

impl ToolRepository for SqliteToolRepository {
    async fn create(&self, tool: &Tool) -> Result<Tool, RepositoryError> {
        sqlx::query(
            "INSERT INTO tools (id, user_id, name, description, tool_type, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(tool.id.to_string())
        .bind(tool.user_id.to_string())
        .bind(&tool.name)
        .bind(&tool.description)
        .bind(&tool.tool_type)
        .bind(format_datetime(&tool.created_at))
        .bind(format_datetime(&tool.updated_at))
        .execute(&self.pool.writer)
        .await
        .map_err(query_error)?;
        Ok(tool.clone())
    }

    async fn get(&self, user_id: &UserId, id: &ToolId) -> Result<Option<Tool>, RepositoryError> {
        let row = sqlx::query("SELECT * FROM tools WHERE id = ? AND user_id = ?")
            .bind(id.to_string())
            .bind(user_id.to_string())
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(query_error)?;
        row.as_ref().map(tool_from_row).transpose()
    }

    async fn list(&self, user_id: &UserId) -> Result<Vec<Tool>, RepositoryError> {
        let rows =
            sqlx::query("SELECT * FROM tools WHERE user_id = ? ORDER BY created_at DESC, id DESC")
                .bind(user_id.to_string())
                .fetch_all(&self.pool.reader)
                .await
                .map_err(query_error)?;
        rows.iter().map(tool_from_row).collect()
    }

    async fn update(&self, tool: &Tool) -> Result<Tool, RepositoryError> {
        let result = sqlx::query(
            "UPDATE tools SET name = ?, description = ?, tool_type = ?, updated_at = ?
             WHERE id = ? AND user_id = ?",
        )
        .bind(&tool.name)
        .bind(&tool.description)
        .bind(&tool.tool_type)
        .bind(format_datetime(&tool.updated_at))
        .bind(tool.id.to_string())
        .bind(tool.user_id.to_string())
        .execute(&self.pool.writer)
        .await
        .map_err(query_error)?;
        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(tool.clone())
    }

    async fn delete(&self, user_id: &UserId, id: &ToolId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM tools WHERE id = ? AND user_id = ?")
            .bind(id.to_string())
            .bind(user_id.to_string())
            .execute(&self.pool.writer)
            .await
            .map_err(query_error)?;
        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
