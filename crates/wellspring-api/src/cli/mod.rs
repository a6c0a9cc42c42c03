//! CLI command definitions and dispatch for the `wspring` binary.
//!
//! Uses clap derive macros for argument parsing.

pub mod ask;
pub mod check;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

/// Wellness-coaching chat gateway for a hosted AI agent.
#[derive(Parser)]
#[command(name = "wspring", version, about, long_about = None)]
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
    /// Run the REST API server (and SPA, when built).
    Serve {
        /// Port to listen on.
        #[arg(short, long, default_value_t = 8787)]
        port: u16,

        /// Host to bind.
        #[arg(long, default_value = "127.0.0.1")]
        host: String,
    },

    /// Send one message to the agent and print the reply.
    Ask {
        /// The message to send.
        message: String,
    },

    /// Check the configuration without calling the network.
    Check,

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}
