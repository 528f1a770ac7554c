//! Mod menu generation: prompt construction, reply parsing and sandbox links.

pub mod parser;
pub mod prompt;
pub mod sandbox;
pub mod service;
