//! Business logic and repository trait definitions for AgentForge.
//!
//! This crate defines the "ports" (repository traits, crypto traits, the LLM
//! provider trait) that the infrastructure layer implements. It depends only
//! on `agentforge-types` -- never on `agentforge-infra` or any database/IO crate.

pub mod assist;
pub mod llm;
pub mod menu;
pub mod repository;
pub mod service;

#[cfg(test)]
pub(crate) mod testing;
