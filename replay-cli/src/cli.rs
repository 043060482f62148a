use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use serde::{Deserialize, Serialize};

#[derive(Parser, Debug)]
#[command(name = "replay", author, version, about = "Classify live replay titles into structured records", long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to the configuration file
    #[arg(short, long, global = true, env = "REPLAY_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only log errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Classify a JSON array of unparsed items
    Parse {
        /// Uploader id selecting the title parser
        #[arg(short, long)]
        uploader: u64,

        /// Input file, reads stdin when omitted
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output format, defaults to the configured one
        #[arg(short, long, value_enum)]
        output: Option<OutputFormat>,

        /// Write the result to a file instead of stdout
        #[arg(long)]
        output_file: Option<PathBuf>,

        /// Emit one row per played game
        #[arg(long)]
        per_game: bool,

        /// Maximum number of titles classified at once
        #[arg(long)]
        max_concurrent: Option<usize>,
    },

    /// Classify a single title
    Classify {
        /// Uploader id selecting the title parser
        #[arg(short, long)]
        uploader: u64,

        /// The raw video title
        #[arg(short, long)]
        title: String,

        /// Publish time in epoch milliseconds, used when the title has no date
        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        publish_time: i64,

        #[arg(short, long, value_enum)]
        output: Option<OutputFormat>,
    },

    /// List the uploaders with a configured parser
    Uploaders,

    /// Render an epoch millisecond timestamp as a local date
    FormatDate {
        #[arg(allow_negative_numbers = true)]
        timestamp: f64,
    },

    /// Show the effective configuration
    Config,

    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutputFormat {
    #[default]
    Pretty,
    Json,
    JsonCompact,
}
