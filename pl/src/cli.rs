//! CLI argument parsing for promptlib

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::export::ExportFormat;

#[derive(Parser, Debug)]
#[command(name = "pl")]
#[command(author, version, about = "Browse, fill and export the prompt library", long_about = None)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format for listings
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List prompts, optionally filtered
    List {
        /// Case-insensitive text to search for in titles, bodies and tags
        #[arg(short, long)]
        search: Option<String>,

        /// Only show prompts with this channel or tag (repeatable)
        #[arg(short, long = "tag")]
        tags: Vec<String>,

        /// Only show prompts in this category
        #[arg(short = 'C', long)]
        category: Option<String>,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// Render a single prompt
    Show {
        /// Prompt ID
        #[arg(required = true)]
        id: String,

        /// Placeholder value as NAME=VALUE (repeatable)
        #[arg(short, long = "var", value_parser = parse_var)]
        vars: Vec<(String, String)>,

        /// Append the SMS opt-out line
        #[arg(long)]
        opt_out: bool,
    },

    /// List channels and tags in use
    Tags,

    /// Export the whole library
    Export {
        /// Export format
        #[arg(short, long, default_value = "markdown")]
        format: ExportFormat,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Parse a NAME=VALUE pair
pub fn parse_var(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((name, value)) if !name.trim().is_empty() => Ok((name.trim().to_string(), value.to_string())),
        _ => Err(format!("expected NAME=VALUE, got '{}'", s)),
    }
}
