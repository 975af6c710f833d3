//! Subcommand implementations.
//!
//! Each command returns the text for stdout; `main` prints it and maps
//! errors to a non-zero exit code.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use owo_colors::OwoColorize;
use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

use doshaforge::{
    analyze, load_config, load_config_from, Analysis, ConfigError, DoshaForgeError, DoshaScorer,
    Feature, FeatureBundle, RuleTable, ScoreExplanation,
};

use crate::cli::{AnalyzeArgs, Command, ConfigArgs, ValidateArgs};

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    DoshaForge(#[from] DoshaForgeError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("{}: {source}", .path.display())]
    Invalid {
        path: PathBuf,
        #[source]
        source: ConfigError,
    },

    #[error("JSON output error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type CliResult<T> = Result<T, CliError>;

pub fn run(command: &Command) -> CliResult<String> {
    match command {
        Command::Analyze(args) => run_analyze(args),
        Command::Config(args) => run_config(args),
        Command::Validate(args) => run_validate(args),
    }
}

fn load_table(path: Option<&Path>) -> Result<RuleTable, ConfigError> {
    match path {
        Some(path) => load_config_from(path),
        None => load_config(),
    }
}

#[derive(Serialize)]
struct Report<'a> {
    #[serde(flatten)]
    analysis: &'a Analysis,
    #[serde(skip_serializing_if = "Option::is_none")]
    explanation: Option<ScoreExplanation>,
}

pub fn run_analyze(args: &AnalyzeArgs) -> CliResult<String> {
    let scorer = DoshaScorer::new(load_table(args.config.as_deref())?);

    let mut payload = Map::new();
    for (feature, value) in [
        (Feature::Hr, &args.hr),
        (Feature::Hrv, &args.hrv),
        (Feature::Amplitude, &args.amplitude),
        (Feature::Morphology, &args.morphology),
    ] {
        if let Some(value) = value {
            payload.insert(feature.as_str().to_string(), Value::String(value.clone()));
        }
    }

    let analysis = analyze(&scorer, &Value::Object(payload.clone()))?;
    let explanation = if args.explain {
        let bundle = FeatureBundle::from_json_map(&payload).map_err(DoshaForgeError::from)?;
        Some(scorer.explain(&bundle))
    } else {
        None
    };

    if args.json {
        let report = Report {
            analysis: &analysis,
            explanation,
        };
        return Ok(serde_json::to_string_pretty(&report)?);
    }

    Ok(render_analysis(&analysis, explanation.as_ref()))
}

fn render_analysis(analysis: &Analysis, explanation: Option<&ScoreExplanation>) -> String {
    let width = analysis
        .scores
        .iter()
        .map(|(category, _)| category.len())
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    for (category, total) in analysis.scores.iter() {
        let _ = writeln!(out, "{:<width$}  {:>3}", category, total, width = width);
        let Some(breakdown) = explanation.and_then(|e| e.get(category)) else {
            continue;
        };
        for c in &breakdown.contributions {
            let _ = writeln!(
                out,
                "  {:<10} {:>8} {:<4} +{}",
                c.feature.as_str(),
                c.value,
                c.band.to_string(),
                c.score
            );
        }
    }
    let _ = write!(
        out,
        "Dominant dosha: {}",
        analysis.dominant_dosha.bright_green().bold()
    );
    out
}

pub fn run_config(args: &ConfigArgs) -> CliResult<String> {
    let table = load_table(args.config.as_deref())?;
    Ok(table.to_string_as(args.format)?.trim_end().to_string())
}

pub fn run_validate(args: &ValidateArgs) -> CliResult<String> {
    let table = load_config_from(&args.path).map_err(|source| CliError::Invalid {
        path: args.path.clone(),
        source,
    })?;
    let categories: Vec<&str> = table.categories().collect();
    Ok(format!(
        "{} {}: {} categories ({})",
        "✓".bright_green().bold(),
        args.path.display(),
        categories.len(),
        categories.join(", ")
    ))
}
