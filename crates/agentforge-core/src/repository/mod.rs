//! Repository trait definitions (ports).
//!
//! These traits define the storage interface that the infrastructure layer
//! (agentforge-infra) implements. Every method that touches an owned record
//! takes the owner's `UserId`, so a record belonging to another user is
//! simply not found.

pub mod admin;
pub mod agent;
pub mod error_log;
pub mod problem;
pub mod setting;
pub mod token;
pub mod tool;
pub mod user;
