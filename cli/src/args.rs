//! Command-line argument definitions.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Trainify CLI - Terminal client for the Trainify service
#[derive(Parser, Debug)]
#[command(name = "trainify")]
#[command(version)]
#[command(about = "Manage datasets, run RAG queries, and monitor ingestion jobs", long_about = None)]
pub struct Cli {
    /// Management API base URL (overrides the config file)
    #[arg(short = 'u', long = "url", global = true)]
    pub url: Option<String>,

    /// Inference API base URL (overrides the config file)
    #[arg(long = "python-url", global = true)]
    pub python_url: Option<String>,

    /// Path to the config file
    #[arg(long = "config", global = true)]
    pub config: Option<PathBuf>,

    /// Emit raw JSON instead of tables
    #[arg(long = "json", global = true)]
    pub json: bool,

    /// Disable colored output
    #[arg(long = "no-color", global = true)]
    pub no_color: bool,

    /// Verbose logging (repeat for more detail)
    #[arg(short = 'v', long = "verbose", global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Log in and persist the session
    Login {
        /// Account email
        email: String,

        /// Password (prompted interactively when omitted)
        #[arg(long)]
        password: Option<String>,
    },

    /// Create a new account
    Register {
        /// Display name
        name: String,

        /// Account email
        email: String,

        /// Password (prompted interactively when omitted)
        #[arg(long)]
        password: Option<String>,
    },

    /// Clear the persisted session
    Logout,

    /// Show the logged-in user
    Whoami,

    /// Manage datasets
    Datasets {
        #[command(subcommand)]
        command: DatasetCommand,
    },

    /// List available models
    Models,

    /// Run a RAG query against a dataset
    Ask {
        /// Dataset id to query
        #[arg(long)]
        dataset: String,

        /// Model name (defaults to the first available model)
        #[arg(long)]
        model: Option<String>,

        /// The question
        query: String,
    },

    /// Show the stored query history
    History,

    /// Inspect and monitor ingestion jobs
    Jobs {
        #[command(subcommand)]
        command: JobCommand,
    },
}

#[derive(Subcommand, Debug)]
pub enum DatasetCommand {
    /// List your datasets
    List,

    /// Show one dataset in detail
    Show {
        /// Dataset id
        id: String,
    },

    /// Rename a dataset
    Rename {
        /// Dataset id
        id: String,

        /// New name
        name: String,
    },

    /// Delete a dataset
    Delete {
        /// Dataset id
        id: String,

        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },

    /// Upload files as a new dataset
    Upload {
        /// Name of the dataset to create
        #[arg(long)]
        name: String,

        /// Files to ingest
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
}

#[derive(Subcommand, Debug)]
pub enum JobCommand {
    /// Show the current job snapshot once
    List,

    /// Poll job status continuously until Ctrl-C
    Watch {
        /// Poll interval in milliseconds
        #[arg(long, default_value_t = 2000)]
        interval_ms: u64,
    },

    /// Cancel a pending or processing job
    Cancel {
        /// Job id
        id: String,

        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}
