use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(
    name = "ai-carbon-tracker",
    about = "Estimate the carbon footprint of accepted AI code suggestions",
    version
)]
pub struct Cli {
    /// Override the configured data directory for this run only
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the live status line
    Status,
    /// Record one editor change; reads the inserted text from stdin when omitted
    Record {
        text: Option<String>,
        /// Number of characters the change replaced
        #[arg(long, default_value_t = 0)]
        replaced: usize,
    },
    /// Count a suggestion shown by the assistant
    Shown,
    /// Render the stats report
    Report {
        /// Render the HTML page instead of plain text
        #[arg(long)]
        html: bool,
    },
    /// List the registered models
    Models {
        /// Only models from this provider (OpenAI, Anthropic, Google, xAI)
        #[arg(long)]
        provider: Option<String>,
        /// Only models advertising this feature
        #[arg(long)]
        feature: Option<String>,
    },
    /// List grid regions and their carbon intensity
    Regions,
    /// Set the active model for future suggestions
    Model { id: String },
    /// Set the grid region for future suggestions
    Region { code: String },
    /// Clear every counter and restart the tracking period
    Reset {
        #[arg(long)]
        yes: bool,
    },
    /// Write the metrics snapshot as JSON
    Export {
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Read newline-delimited host events from stdin
    Listen,
}
