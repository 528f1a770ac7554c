//! SQLite problem log repository implementation.

use sqlx::Row;

use agentforge_core::repository::problem::ProblemRepository;
use agentforge_types::error::RepositoryError;
use agentforge_types::id::{ProblemId, UserId};
use agentforge_types::problem::Problem;

use super::pool::DatabasePool;
use super::{format_datetime, parse_datetime, query_error};

pub struct SqliteProblemRepository {
    pool: DatabasePool,
}

impl SqliteProblemRepository {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

fn problem_from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Problem, RepositoryError> {
    let id: String = row.try_get("id").map_err(query_error)?;
    let user_id: String = row.try_get("user_id").map_err(query_error)?;
    let created_at: String = row.try_get("created_at").map_err(query_error)?;
    let updated_at: String = row.try_get("updated_at").map_err(query_error)?;

    Ok(Problem {
        id: id
            .parse::<ProblemId>()
            .map_err(|e| RepositoryError::Query(format!("invalid problem id: {e}")))?,
        user_id: user_id
            .parse::<UserId>()
            .map_err(|e| RepositoryError::Query(format!("invalid user id: {e}")))?,
        description: row.try_get("description").map_err(query_error)?,
        solution: row.try_get("solution").map_err(query_error)?,
        created_at: parse_datetime(&created_at)?,
        updated_at: parse_datetime(&updated_at)?,
    })
}

impl ProblemRepository for SqliteProblemRepository {
    async fn create(&self, problem: &Problem) -> Result<Problem, RepositoryError> {
        sqlx::query(
            "INSERT INTO problems (id, user_id, description, solution, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(problem.id.to_string())
        .bind(problem.user_id.to_string())
        .bind(&problem.description)
        .bind(&problem.solution)
        .bind(format_datetime(&problem.created_at))
        .bind(format_datetime(&problem.updated_at))
        .execute(&self.pool.writer)
        .await
        .map_err(query_error)?;
        Ok(problem.clone())
    }

    async fn list(&self, user_id: &UserId) -> Result<Vec<Problem>, RepositoryError> {
        let rows = sqlx::query(
            "SELECT * FROM problems WHERE user_id = ? ORDER BY created_at DESC, id DESC",
        )
        .bind(user_id.to_string())
        .fetch_all(&self.pool.reader)
        .await
        .map_err(query_error)?;
        rows.iter().map(problem_from_row).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sqlite::test_support::{insert_user, test_pool};
    use chrono::{Duration, Utc};

    #[tokio::test]
    async fn test_list_newest_first() {
        let pool = test_pool().await;
        let user = insert_user(&pool, "ada@example.com").await;
        let repo = SqliteProblemRepository::new(pool);

        for (description, age) in [("first", 120), ("second", 0)] {
            let at = Utc::now() - Duration::seconds(age);
            repo.create(&Problem {
                id: ProblemId::new(),
                user_id: user.clone(),
                description: description.into(),
                solution: format!("solved {description}"),
                created_at: at,
                updated_at: at,
            })
            .await
            .unwrap();
        }

        let log = repo.list(&user).await.unwrap();
        assert_eq!(log[0].description, "second");
        assert_eq!(log[1].solution, "solved first");
    }
}
