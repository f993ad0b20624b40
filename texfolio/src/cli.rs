//! Command-line interface definitions for texfolio

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Output format for the toc command
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum TocFormat {
    /// Indented outline with anchors
    #[default]
    Text,
    /// JSON array of entries
    Json,
}

/// CLI structure for the texfolio application
#[derive(Parser)]
#[command(name = "texfolio")]
#[command(version)]
#[command(about = "Render LaTeX-flavored notes to sanitized HTML", long_about = None)]
pub struct Cli {
    /// Configuration file (defaults to texfolio.toml next to the input)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands for texfolio
#[derive(Subcommand)]
pub enum Commands {
    /// Render a document, or a directory of annex parts, to HTML
    Render {
        /// Input .tex file or annex directory
        #[arg(value_name = "PATH")]
        input: PathBuf,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Wrap the fragment in a full page with styles and a table of contents
        #[arg(long)]
        standalone: bool,
    },

    /// Print the table of contents of one or more documents
    Toc {
        /// Input .tex files, or annex directories with --annex
        #[arg(value_name = "PATH", required = true)]
        inputs: Vec<PathBuf>,

        /// Treat inputs as annex parts, one entry per part
        #[arg(long)]
        annex: bool,

        /// Keep only entries whose label or part label contains this text
        #[arg(long, value_name = "QUERY")]
        filter: Option<String>,

        /// Output format
        #[arg(long, value_enum, default_value = "text")]
        format: TocFormat,
    },
}
