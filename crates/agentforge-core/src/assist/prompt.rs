//! Prompts for the assistant helpers.

use agentforge_types::assist::ClientError;

pub const ANALYZE_SYSTEM_PROMPT: &str = "You are a senior front-end engineer who diagnoses runtime errors. \
Reply with a JSON object with two string fields: \"message\" (a short plain-language explanation) \
and \"possibleSolution\" (a concrete fix).";

pub const SUGGESTION_SYSTEM_PROMPT: &str =
    "You are a skilled AI assistant specializing in creating mod menus for AI systems.";

pub const INTERACTION_SYSTEM_PROMPT: &str =
    "You are the AgentForge assistant. You help users design agents, tools and mod menus.";

pub fn analyze_prompt(error: &ClientError) -> String {
    let mut prompt = format!("Error message: {}\n", error.message.trim());
    if let Some(stack) = error.stack.as_deref().filter(|s| !s.trim().is_empty()) {
        prompt.push_str(&format!("Stack trace:\n{}\n", stack.trim()));
    }
    if !error.extra.is_empty() {
        let context = serde_json::Value::Object(error.extra.clone());
        prompt.push_str(&format!("Context: {context}\n"));
    }
    prompt.push_str("Explain what went wrong and how to fix it.");
    prompt
}

pub fn suggestion_prompt(specification: &serde_json::Map<String, serde_json::Value>) -> String {
    let spec = serde_json::Value::Object(specification.clone());
    format!(
        "Here is a draft mod menu specification:\n{spec}\n\n\
         Suggest one concrete improvement: a missing agent, a useful tool or a better setting. \
         Keep it to a short paragraph."
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analyze_prompt_includes_stack_and_context() {
        let error: ClientError = serde_json::from_str(
            r#"{"message":"x is undefined","stack":"at App.js:10","component":"MenuPreview"}"#,
        )
        .unwrap();
        let prompt = analyze_prompt(&error);
        assert!(prompt.contains("Error message: x is undefined"));
        assert!(prompt.contains("at App.js:10"));
        assert!(prompt.contains(r#""component":"MenuPreview""#));
    }

    #[test]
    fn test_analyze_prompt_skips_blank_stack() {
        let error: ClientError = serde_json::from_str(r#"{"message":"boom","stack":"  "}"#).unwrap();
        assert!(!analyze_prompt(&error).contains("Stack trace"));
    }
}
