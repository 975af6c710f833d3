//! Command-line arguments.

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};

use doshaforge::ConfigFormat;

/// Score pulse features against dosha threshold rules
#[derive(Debug, Parser)]
#[command(name = "doshaforge", version)]
#[command(about = "Score pulse features against dosha threshold rules")]
pub struct Cli {
    /// Increase log output (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Score one set of pulse features and report the dominant dosha
    Analyze(AnalyzeArgs),
    /// Print the active rule table
    Config(ConfigArgs),
    /// Check that a rule table file loads
    Validate(ValidateArgs),
}

#[derive(Debug, Args)]
pub struct AnalyzeArgs {
    /// Heart rate
    #[arg(long, allow_hyphen_values = true)]
    pub hr: Option<String>,

    /// Heart-rate variability
    #[arg(long, allow_hyphen_values = true)]
    pub hrv: Option<String>,

    /// Pulse amplitude (0 low, 1 medium, 2 high)
    #[arg(long, allow_hyphen_values = true)]
    pub amplitude: Option<String>,

    /// Pulse morphology (0 smooth, 1 sharp, 2 irregular)
    #[arg(long, allow_hyphen_values = true)]
    pub morphology: Option<String>,

    /// Rule table to score against [default: $DOSHAFORGE_CONFIG or config/dosha_config.json]
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Print the analysis as JSON
    #[arg(long)]
    pub json: bool,

    /// Show the band and score of every feature per dosha
    #[arg(long)]
    pub explain: bool,
}

#[derive(Debug, Args)]
pub struct ConfigArgs {
    /// Rule table to print [default: $DOSHAFORGE_CONFIG or config/dosha_config.json]
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Output format: json, toml or yaml
    #[arg(short, long, default_value = "json")]
    pub format: ConfigFormat,
}

#[derive(Debug, Args)]
pub struct ValidateArgs {
    /// Rule table file (.json, .toml, .yaml)
    pub path: PathBuf,
}
