use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::id::{ProblemId, UserId};
use crate::menu::MenuEntity;

/// A free-text problem and the solution produced for it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Problem {
    pub id: ProblemId,
    pub user_id: UserId,
    pub description: String,
    pub solution: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Body of `POST /api/solve-problem`.
#[derive(Debug, Clone, Deserialize)]
pub struct SolveProblemRequest {
    #[serde(default)]
    pub problem: String,
    /// Agents collaborating on the problem (names or `{name, description}`).
    #[serde(default)]
    pub agents: Vec<MenuEntity>,
    pub provider: Option<String>,
    pub model: Option<String>,
}

/// Response of `POST /api/solve-problem`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SolveProblemResponse {
    pub solution: String,
    pub problem_id: ProblemId,
}
