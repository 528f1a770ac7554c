//! LLM provider implementations.
//!
//! Every supported provider speaks the OpenAI chat-completions protocol, so
//! one [`openai_compat::OpenAiCompatibleProvider`] serves them all through a
//! per-kind base URL. [`factory::DefaultProviderFactory`] builds it from
//! resolved credentials.

pub mod factory;
pub mod openai_compat;
