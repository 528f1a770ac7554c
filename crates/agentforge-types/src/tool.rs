use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::id::{ToolId, UserId};

/// Tool type used when a create request does not name one.
pub const DEFAULT_TOOL_TYPE: &str = "custom";

/// A named, described capability attachable to an agent.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tool {
    pub id: ToolId,
    pub user_id: UserId,
    pub name: String,
    pub description: String,
    /// Free-form classification (e.g. "openai", "search", "custom").
    #[serde(rename = "type")]
    pub tool_type: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Body of `POST /api/tools`.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateToolRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "type")]
    pub tool_type: Option<String>,
}

/// Body of `PUT /api/tools/{id}`. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateToolRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub tool_type: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_type_field_is_named_type() {
        let now = Utc::now();
        let tool = Tool {
            id: ToolId::new(),
            user_id: UserId::new(),
            name: "Search".into(),
            description: "Web search".into(),
            tool_type: "search".into(),
            created_at: now,
            updated_at: now,
        };
        let json = serde_json::to_value(&tool).unwrap();
        assert_eq!(json["type"], "search");
        assert!(json.get("toolType").is_none());
    }

    #[test]
    fn test_create_request_type_optional() {
        let req: CreateToolRequest =
            serde_json::from_str(r#"{"name":"Calc","description":"Math"}"#).unwrap();
        assert!(req.tool_type.is_none());
    }
}
