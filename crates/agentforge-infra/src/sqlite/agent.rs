//! SQLite agent repository implementation.

use sqlx::Row;

use agentforge_core::repository::agent::AgentRepository;
use agentforge_types::agent::Agent;
use agentforge_types::error::RepositoryError;
use agentforge_types::id::{AgentId, UserId};

use super::pool::DatabasePool;
use super::{format_datetime, parse_datetime, query_error};

pub struct SqliteAgentRepository {
    pool: DatabasePool,
}

impl SqliteAgentRepository {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

struct AgentRow {
    id: String,
    user_id: String,
    name: String,
    description: String,
    created_at: String,
    updated_at: String,
}

impl AgentRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            user_id: row.try_get("user_id")?,
            name: row.try_get("name")?,
            description: row.try_get("description")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }

    fn into_agent(self) -> Result<Agent, RepositoryError> {
        Ok(Agent {
            id: self
                .id
                .parse::<AgentId>()
                .map_err(|e| RepositoryError::Query(format!("invalid agent id: {e}")))?,
            user_id: self
                .user_id
                .parse::<UserId>()
                .map_err(|e| RepositoryError::Query(format!("invalid user id: {e}")))?,
            name: self.name,
            description: self.description,
            created_at: parse_datetime(&self.created_at)?,
            updated_at: parse_datetime(&self.updated_at)?,
        })
    }
}

fn agent_from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Agent, RepositoryError> {
    AgentRow::from_row(row).map_err(query_error)?.into_agent()
}

impl AgentRepository for SqliteAgentRepository {
    async fn create(&self, agent: &Agent) -> Result<Agent, RepositoryError> {
        sqlx::query(
            "INSERT INTO agents (id, user_id, name, description, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(agent.id.to_string())
        .bind(agent.user_id.to_string())
        .bind(&agent.name)
        .bind(&agent.description)
        .bind(format_datetime(&agent.created_at))
        .bind(format_datetime(&agent.updated_at))
        .execute(&self.pool.writer)
        .await
        .map_err(query_error)?;
        Ok(agent.clone())
    }

    async fn get(&self, user_id: &UserId, id: &AgentId) -> Result<Option<Agent>, RepositoryError> {
        let row = sqlx::query("SELECT * FROM agents WHERE id = ? AND user_id = ?")
            .bind(id.to_string())
            .bind(user_id.to_string())
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(query_error)?;
        row.as_ref().map(agent_from_row).transpose()
    }

    async fn list(&self, user_id: &UserId) -> Result<Vec<Agent>, RepositoryError> {
        // UUID v7 ids are time ordered, breaking ties within one timestamp
        let rows = sqlx::query(
            "SELECT * FROM agents WHERE user_id = ? ORDER BY created_at DESC, id DESC",
        )
        .bind(user_id.to_string())
        .fetch_all(&self.pool.reader)
        .await
        .map_err(query_error)?;
        rows.iter().map(agent_from_row).collect()
    }

    async fn update(&self, agent: &Agent) -> Result<Agent, RepositoryError> {
        let result = sqlx::query(
            "UPDATE agents SET name = ?, description = ?, updated_at = ? WHERE id = ? AND user_id = ?",
        )
        .bind(&agent.name)
        .bind(&agent.description)
        .bind(format_datetime(&agent.updated_at))
        .bind(agent.id.to_string())
        .bind(agent.user_id.to_string())
        .execute(&self.pool.writer)
        .await
        .map_err(query_error)?;
        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(agent.clone())
    }

    async fn delete(&self, user_id: &UserId, id: &AgentId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM agents WHERE id = ? AND user_id = ?")
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
