//! Infrastructure implementations for AgentForge.
//!
//! Implements the ports defined in `agentforge-core`: SQLite repositories,
//! crypto adapters, the OpenAI-compatible provider client, plus the OAuth
//! HTTP client and the configuration loader.

pub mod config;
pub mod crypto;
pub mod llm;
pub mod oauth;
pub mod sqlite;
