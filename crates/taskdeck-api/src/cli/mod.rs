//! CLI command definitions and dispatch for the `tdeck` binary.
//!
//! Uses clap derive macros for argument parsing. The CLI covers running
//! the API server and provisioning bearer tokens.

pub mod token;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

/// Taskdeck: a chat-driven todo backend.
#[derive(Parser)]
#[command(name = "tdeck", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the REST API server.
    Serve {
        /// Port to listen on (overrides config.toml).
        #[arg(short, long)]
        port: Option<u16>,

        /// Host to bind (overrides config.toml).
        #[arg(long)]
        host: Option<String>,
    },

    /// Manage API tokens.
    Token {
        #[command(subcommand)]
        action: token::TokenCommand,
    },

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        #[arg(value_enum)]
        shell: Shell,
    },
}
