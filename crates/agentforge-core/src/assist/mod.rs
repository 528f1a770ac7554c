//! LLM helpers behind the UI's assistant widgets.

pub mod prompt;
pub mod service;
