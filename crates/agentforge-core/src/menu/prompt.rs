//! Prompt construction for menu generation.

use agentforge_types::menu::MenuEntity;

pub const SYSTEM_PROMPT: &str =
    "You are a skilled AI assistant specializing in creating mod menus for AI systems.";

pub const MAX_TOKENS: u32 = 2000;
pub const TEMPERATURE: f64 = 0.7;

/// Categories every generated menu must cover.
pub const REQUIRED_CATEGORIES: [&str; 4] = [
    "Agent Configuration",
    "Core Settings",
    "Advanced Settings",
    "Model Configuration",
];

/// Build the user prompt for a menu request.
pub fn build_prompt(
    title: &str,
    agents: &[MenuEntity],
    tools: &[MenuEntity],
    customizations: &serde_json::Value,
) -> String {
    let categories = REQUIRED_CATEGORIES
        .iter()
        .enumerate()
        .map(|(i, name)| format!("{}. {name}", i + 1))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "Create a minimalist mod menu for an agentic AI LLM system with the following specifications:\n\
         Title: {title}\n\
         Agents: {agents}\n\
         Tools: {tools}\n\
         Customizations: {customizations}\n\
         \n\
         The menu should have a compact design with a red background and white text.\n\
         Include the following main categories:\n\
         {categories}\n\
         \n\
         Under each category, list relevant options based on the provided agents and tools.\n\
         The output should be a JSON array of menu categories, each containing a name and an array of items.\n\
         Respond with the JSON array only.",
        agents = to_json(agents),
        tools = to_json(tools),
        customizations = customizations,
    )
}

fn to_json(entities: &[MenuEntity]) -> String {
    serde_json::to_string(entities).unwrap_or_else(|_| "[]".to_string())
}
