//! The generate-menu request/response contract.
//!
//! ```text
//! POST /api/generate-menu
//! { title, agents: [{name, description}], tools: [{name, description}],
//!   customizations: {}, provider: "openai" | ..., model? }
//! -> { menu: [{ name, items: [string] }], sandboxUrl? }
//! ```

use serde::{Deserialize, Serialize};

/// An agent or tool as described in a menu request.
///
/// Accepts either a full `{name, description}` object or a bare name string,
/// since the quick-generate form submits comma-split names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "MenuEntityInput")]
pub struct MenuEntity {
    pub name: String,
    pub description: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum MenuEntityInput {
    Name(String),
    Full {
        name: String,
        #[serde(default)]
        description: String,
    },
}

impl From<MenuEntityInput> for MenuEntity {
    fn from(input: MenuEntityInput) -> Self {
        match input {
            MenuEntityInput::Name(name) => MenuEntity {
                name: name.trim().to_string(),
                description: String::new(),
            },
            MenuEntityInput::Full { name, description } => MenuEntity {
                name: name.trim().to_string(),
                description: description.trim().to_string(),
            },
        }
    }
}

/// Body of `POST /api/generate-menu`.
///
/// `provider` is kept as a raw string so that an unknown vendor can be
/// reported as a validation error instead of a deserialization failure.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateMenuRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub agents: Vec<MenuEntity>,
    #[serde(default)]
    pub tools: Vec<MenuEntity>,
    #[serde(default = "empty_object")]
    pub customizations: serde_json::Value,
    pub provider: Option<String>,
    pub model: Option<String>,
}

fn empty_object() -> serde_json::Value {
    serde_json::Value::Object(serde_json::Map::new())
}

/// One category of the generated menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuCategory {
    pub name: String,
    pub items: Vec<String>,
}

/// Response of `POST /api/generate-menu`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateMenuResponse {
    pub menu: Vec<MenuCategory>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sandbox_url: Option<String>,
}
