//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum, ValueHint};

use crate::application::BreakdownStyle;

/// Price estimator for vinyl flooring installation
#[derive(Parser, Debug)]
#[command(name = "floorcalc")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Extra settings file, applied over the global config
    #[arg(short, long, global = true, env = "FLOORCALC_CONFIG", value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print an itemized estimate
    Estimate(EstimateArgs),

    /// Interactive estimate: read field edits from stdin, re-render on each
    Watch {
        /// Breakdown markup
        #[arg(short, long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },

    /// Show the effective price table
    Prices,

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Form values for a one-shot estimate.
///
/// Numeric fields take raw text and are parsed leniently, like the form:
/// unparsable or negative values count as zero.
#[derive(Args, Debug, Default)]
pub struct EstimateArgs {
    /// Floor area in m²
    #[arg(short, long, allow_hyphen_values = true)]
    pub area: Option<String>,

    /// Baseboard length in metres
    #[arg(short, long, allow_hyphen_values = true)]
    pub baseboard: Option<String>,

    /// Number of transition strips
    #[arg(short, long, allow_hyphen_values = true)]
    pub transitions: Option<String>,

    /// Include removal and disposal of the old floor
    #[arg(long)]
    pub old_floor: bool,

    /// Include subfloor sanding and vacuuming
    #[arg(long)]
    pub prep: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Text)]
    pub format: Format,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Format {
    #[default]
    Text,
    Html,
    Json,
}

impl Format {
    /// Breakdown style for surface rendering; JSON is rendered as a whole view.
    pub fn style(&self) -> Option<BreakdownStyle> {
        match self {
            Format::Text => Some(BreakdownStyle::Text),
            Format::Html => Some(BreakdownStyle::Html),
            Format::Json => None,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show merged config
    Show,

    /// Create config template at the global location
    Init {
        /// Overwrite an existing config file
        #[arg(short, long)]
        force: bool,
    },

    /// Show config paths
    Path,
}
