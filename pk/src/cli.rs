//! CLI command definitions and subcommands

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// PitchKit - sales-collateral site
#[derive(Parser, Debug)]
#[command(
    name = "pk",
    about = "Serve or render the pitch site, and run the ROI calculator",
    version = env!("GIT_DESCRIBE"),
)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true, help = "Path to config file")]
    pub config: Option<PathBuf>,

    /// Log level (TRACE, DEBUG, INFO, WARN, ERROR)
    #[arg(
        short = 'l',
        long = "log-level",
        global = true,
        help = "Log level (TRACE, DEBUG, INFO, WARN, ERROR)"
    )]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the HTTP server
    Serve {
        /// Address to listen on (overrides config)
        #[arg(short, long)]
        bind: Option<String>,
    },

    /// Write the whole site as static files
    Render {
        /// Output directory
        #[arg(short, long)]
        out: PathBuf,
    },

    /// Run the ROI calculator
    Roi {
        /// Missed appointments per day
        #[arg(long)]
        daily_no_shows: Option<String>,

        /// Show rate after reminders, percent
        #[arg(long)]
        show_rate: Option<String>,

        /// Rebook rate, percent
        #[arg(long)]
        rebook_rate: Option<String>,

        /// Average ticket
        #[arg(long)]
        avg_ticket: Option<String>,

        /// Open days per month
        #[arg(long)]
        days: Option<String>,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// List every page, print variant and redirect
    Routes,
}

/// Output format for calculator results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Location of the log file
pub fn get_log_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("pitchkit")
        .join("logs")
        .join("pitchkit.log")
}
