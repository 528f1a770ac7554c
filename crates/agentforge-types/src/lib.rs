//! Shared domain types for AgentForge.
//!
//! Users, settings, agents, tools, problem logs, the generate-menu contract,
//! LLM request/response shapes, configuration, and their error types.
//!
//! Zero infrastructure dependencies -- only serde, uuid, chrono, thiserror.

pub mod admin;
pub mod agent;
pub mod assist;
pub mod config;
pub mod error;
pub mod id;
pub mod llm;
pub mod menu;
pub mod problem;
pub mod provider;
pub mod setting;
pub mod tool;
pub mod user;
