//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Match scouting entries.
///
/// Replays recorded scouting sessions into the compact wire format and
/// decodes wire strings back for inspection.
#[derive(Debug, Parser)]
#[command(name = "scout", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Replay a session script and print the encoded entry.
    Encode {
        /// Session script (JSON). Reads stdin when omitted or `-`.
        file: Option<PathBuf>,

        /// Skip points recorded twice in one tick or after the match ended.
        #[arg(long)]
        strict: bool,
    },

    /// Decode an encoded entry.
    Decode {
        /// The encoded entry. Reads stdin when omitted or `-`.
        encoded: Option<String>,

        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Check that an operator name follows the "First-Name Last-Initial" format.
    CheckName {
        /// The name to check, e.g. "Jane D".
        name: String,
    },

    /// List the available boards.
    Boards,
}
