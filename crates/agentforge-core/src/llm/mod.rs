//! LLM provider abstraction and per-request provider resolution.

pub mod box_provider;
pub mod factory;
pub mod provider;
pub mod resolver;
