//! TDE CLI Library
//!
//! Terminal client for the TUFT Data Environment data registry.
//!
//! # Overview
//!
//! - **Datasets**: list datasets with display ids and "new" badges (`tde datasets`)
//! - **Registration**: register a new dataset (`tde register`)
//! - **Files**: per-file metadata with type filters and totals (`tde files`)
//! - **Dataset detail**: registered file patterns of one dataset (`tde show`)
//! - **Projects**: counts and sizes per dataset (`tde project`)
//! - **Snippets**: Python or R code listing a dataset's raw files (`tde snippet`)
//! - **Uploads**: attach a metadata-summary file to a dataset (`tde upload`)
//! - **Configuration**: inspect effective settings (`tde config`)
//!
//! The derivations behind each command live in [`view`] and work against any
//! [`api::RegistryBackend`], so they can be driven without a terminal.

#![deny(clippy::unwrap_used, clippy::expect_used)]

pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod progress;
pub mod render;
pub mod view;

// Re-export commonly used types
pub use config::Config;
pub use error::{CliError, Result};

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use view::files::FILE_TYPE_OPTIONS;
use view::SnippetLanguage;

/// TDE - TUFT Data Environment registry client
#[derive(Parser, Debug)]
#[command(name = "tde")]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Backend API base URL (overrides the config file)
    #[arg(long, env = "TDE_API_BASE_URL", global = true)]
    pub server_url: Option<String>,

    /// Disable coloured output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Print the command reference as Markdown
    #[arg(long, hide = true)]
    pub markdown_help: bool,
}

/// How listings are printed
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List datasets, optionally for one project
    Datasets {
        /// Only datasets of this project
        #[arg(short, long)]
        project: Option<i64>,

        /// Page to show, starting at 1
        #[arg(long, default_value = "1")]
        page: usize,

        /// Rows per page (defaults to the configured page size)
        #[arg(long)]
        page_size: Option<usize>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },

    /// Register a new dataset
    Register {
        /// Project to register under (defaults to project 1)
        #[arg(short, long)]
        project: Option<i64>,

        /// Dataset title
        #[arg(long)]
        title: Option<String>,

        /// Dataset abstract
        #[arg(long = "abstract")]
        abstract_text: Option<String>,

        /// Site holding the data
        #[arg(long)]
        site: Option<String>,

        /// Base directory of the raw data
        #[arg(long)]
        location: Option<String>,

        /// Raw file patterns, comma separated (e.g. "*.fastq, *.fasta")
        #[arg(long)]
        raw: Option<String>,

        /// Processed file patterns, comma separated
        #[arg(long)]
        processed: Option<String>,

        /// Summary file patterns, comma separated
        #[arg(long)]
        summary: Option<String>,

        /// Readme files, comma separated
        #[arg(long)]
        readme: Option<String>,

        /// Never prompt for missing fields
        #[arg(long)]
        no_interactive: bool,
    },

    /// Show per-file metadata of a dataset
    Files {
        /// Dataset id
        dataset_id: i64,

        /// File type filter
        #[arg(short = 't', long = "type", default_value = "All", value_parser = clap::builder::PossibleValuesParser::new(FILE_TYPE_OPTIONS))]
        file_type: String,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },

    /// Show one dataset and its registered files
    Show {
        /// Dataset id
        dataset_id: i64,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },

    /// Summarise a project's datasets
    Project {
        /// Project id
        project_id: i64,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },

    /// Print code that lists a dataset's raw files
    Snippet {
        /// Dataset id
        dataset_id: i64,

        /// Snippet language
        #[arg(short, long, value_enum, default_value_t = SnippetLanguage::Python)]
        lang: SnippetLanguage,

        /// Copy to the clipboard instead of printing
        #[arg(short, long)]
        copy: bool,
    },

    /// Upload a metadata-summary JSON file to a dataset
    Upload {
        /// Dataset id
        dataset_id: i64,

        /// Path to the summary file (usually output.json)
        file: PathBuf,
    },

    /// Inspect configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

/// Configuration subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Get configuration value
    Get {
        /// Configuration key
        key: String,
    },

    /// Show all configuration
    Show,
}
