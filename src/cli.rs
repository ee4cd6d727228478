//! Command-line interface definition

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Scan and highlight /** ... */ documentation comments
#[derive(Parser, Debug)]
#[command(name = "docmark", version, about)]
pub struct Cli {
    /// Config file (defaults to ~/.docmark.toml)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List every classified span
    Spans {
        /// Source file, or `-` for standard input
        file: PathBuf,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// List located comment regions
    Regions {
        /// Source file, or `-` for standard input
        file: PathBuf,
    },

    /// Print the file with documentation comments highlighted
    Highlight {
        /// Source file, or `-` for standard input
        file: PathBuf,

        /// Do not render tags in bold
        #[arg(long)]
        no_bold_tags: bool,

        /// Do not render descriptions in italics
        #[arg(long)]
        no_italic: bool,

        /// Opacity between 0.0 and 1.0 (below 1.0 renders faint)
        #[arg(long)]
        opacity: Option<f32>,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}
