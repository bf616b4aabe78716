//! CLI - Command-line argument parsing
//!
//! Defines the CLI structure using clap.
//! Keeps argument parsing separate from execution logic.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Brainy Tutor CLI
#[derive(Parser)]
#[command(name = "brainyctl")]
#[command(about = "Brainy Tutor - ask questions, reveal clues, keep the good ones", long_about = None)]
#[command(version)]
#[command(disable_help_subcommand = true)]
pub struct Cli {
    /// Path to config file (overrides the default location)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Ask the tutor a question
    Ask {
        /// The question, as free words
        #[arg(required = true)]
        question: Vec<String>,

        /// Reveal the answer clue by clue instead of all at once
        #[arg(long)]
        step_by_step: bool,

        /// Tutoring persona (e.g. life_coach, playful_explorer)
        #[arg(long)]
        profile: Option<String>,

        /// Save this query to the vault
        #[arg(long)]
        save: bool,

        /// Print all clues immediately without prompting
        #[arg(long)]
        no_prompt: bool,
    },

    /// Manage saved queries
    Vault {
        #[command(subcommand)]
        action: VaultCommands,
    },
}

/// Vault subcommands
#[derive(Subcommand)]
pub enum VaultCommands {
    /// List saved queries
    List,

    /// Save a query without asking it
    Add {
        #[arg(required = true)]
        text: Vec<String>,
    },

    /// Remove a saved query by its list number
    Remove { number: usize },
}
