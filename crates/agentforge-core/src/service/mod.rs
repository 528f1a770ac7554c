//! Business logic services (use cases).
//!
//! Services orchestrate repository calls and business rules. They depend on
//! traits (ports) -- never on concrete infrastructure implementations.

pub mod admin;
pub mod agent;
pub mod auth;
pub mod credential;
pub mod error_log;
pub mod hash;
pub mod problem;
pub mod setting;
pub mod tool;
