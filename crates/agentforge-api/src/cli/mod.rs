//! CLI command definitions for the `agentforge` binary.
//!
//! Uses clap derive macros for argument parsing. Commands follow a
//! noun-verb pattern (e.g., `agentforge user create`).

pub mod config;
pub mod user;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

/// AgentForge: AI agent mod menu backend.
#[derive(Parser)]
#[command(name = "agentforge", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for debug, -vv for trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the REST API server.
    Serve {
        /// Port to listen on (defaults to the configured port).
        #[arg(short, long)]
        port: Option<u16>,

        /// Host to bind to (defaults to the configured host).
        #[arg(long)]
        host: Option<String>,
    },

    /// Manage user accounts.
    User {
        #[command(subcommand)]
        action: UserAction,
    },

    /// Inspect configuration.
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}

#[derive(Subcommand)]
pub enum UserAction {
    /// Create an account.
    Create {
        /// Email address of the new account.
        #[arg(long)]
        email: String,

        /// Password (prompted for when omitted).
        #[arg(long)]
        password: Option<String>,

        /// Create the account with the admin role.
        #[arg(long)]
        admin: bool,
    },

    /// List all accounts.
    #[command(alias = "ls")]
    List,

    /// Grant the admin role to an existing account.
    Promote {
        /// Email address of the account.
        email: String,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print the effective configuration with secrets masked.
    Show,
}
