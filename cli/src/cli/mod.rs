use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};

use crate::output::OutputFormat;

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show or edit configuration
    Config {
        /// Print config file path
        #[arg(long)]
        path: bool,

        /// Reset config to defaults
        #[arg(long)]
        reset: bool,

        /// Open config file in $EDITOR
        #[arg(short, long)]
        edit: bool,
    },

    /// Print every data source queried and what it returned
    Debug,
}

/// JuiceCheck - Battery Health Monitor
///
/// Examples:
///   juicecheck                    # Show battery status
///   juicecheck --format json      # Output as JSON
///   juicecheck --export data.json # Save to file
#[derive(Debug, Parser)]
#[command(
    name = "juicecheck",
    version,
    disable_version_flag = true,
    verbatim_doc_comment
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output format (default: text)
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Export data to file (.csv for CSV, JSON otherwise)
    #[arg(short, long, value_name = "PATH")]
    pub export: Option<PathBuf>,

    /// Suppress banner and extra output
    #[arg(short, long)]
    pub quiet: bool,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Print version
    #[arg(short = 'v', long, action = ArgAction::Version)]
    version: (),
}
