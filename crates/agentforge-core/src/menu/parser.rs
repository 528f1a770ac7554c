//! Lenient parsing of a provider's menu reply.
//!
//! Models rarely follow the requested shape exactly. Accepted variations:
//! a Markdown code fence around the JSON, a bare array or `{"menu": [...]}`,
//! `category`/`title` in place of `name`, `options` in place of `items`, and
//! items given as strings or as objects with a `name` or `label`.

use serde_json::Value;

use agentforge_types::error::GenerationError;
use agentforge_types::menu::MenuCategory;

/// Parse a reply into menu categories.
///
/// Returns `GenerationError::Malformed` when no usable category remains.
pub fn parse_menu(text: &str) -> Result<Vec<MenuCategory>, GenerationError> {
    let body = strip_code_fence(text);
    let value: Value = match serde_json::from_str(body) {
        Ok(value) => value,
        Err(_) => extract_json(body)
            .and_then(|json| serde_json::from_str(json).ok())
            .ok_or_else(|| GenerationError::Malformed("reply is not valid JSON".into()))?,
    };

    let entries = match &value {
        Value::Array(entries) => entries,
        Value::Object(map) => match map.get("menu").or_else(|| map.get("categories")) {
            Some(Value::Array(entries)) => entries,
            _ => {
                return Err(GenerationError::Malformed(
                    "expected a JSON array of categories".into(),
                ));
            }
        },
        _ => {
            return Err(GenerationError::Malformed(
                "expected a JSON array of categories".into(),
            ));
        }
    };

    let menu: Vec<MenuCategory> = entries.iter().filter_map(parse_category).collect();
    if menu.is_empty() {
        return Err(GenerationError::Malformed("no menu categories found".into()));
    }
    Ok(menu)
}

fn parse_category(value: &Value) -> Option<MenuCategory> {
    let map = value.as_object()?;
    let name = ["name", "category", "title"]
        .iter()
        .find_map(|key| map.get(*key).and_then(Value::as_str))
        .map(str::trim)
        .filter(|name| !name.is_empty())?;

    let items = ["items", "options"]
        .iter()
        .find_map(|key| map.get(*key).and_then(Value::as_array))
        .map(|items| items.iter().filter_map(parse_item).collect())
        .unwrap_or_default();

    Some(MenuCategory {
        name: name.to_string(),
        items,
    })
}

fn parse_item(value: &Value) -> Option<String> {
    let text = match value {
        Value::String(s) => s.as_str(),
        Value::Object(map) => ["name", "label"]
            .iter()
            .find_map(|key| map.get(*key).and_then(Value::as_str))?,
        _ => return None,
    };
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}

/// Remove a surrounding ```` ``` ```` / ```` ```json ```` fence, if any.
pub(crate) fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = match rest.find('\n') {
        Some(newline) => &rest[newline + 1..],
        None => rest,
    };
    rest.trim_end().strip_suffix("```").unwrap_or(rest).trim()
}

/// The outermost JSON array or object embedded in surrounding prose.
fn extract_json(text: &str) -> Option<&str> {
    let start = text.find(['[', '{'])?;
    let close = if text[start..].starts_with('[') { ']' } else { '}' };
    let end = text.rfind(close)?;
    (end > start).then(|| &text[start..=end])
}
