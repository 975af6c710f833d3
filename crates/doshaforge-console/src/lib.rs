//! Colorful console output for DoshaForge.
//!
//! Provides a custom `tracing` layer that formats configuration and scoring
//! events with colors. Output goes to stderr so command output on stdout
//! stays machine-readable.
//!
//! ## Log Levels
//!
//! - **INFO**: Analyses and rejected requests
//! - **DEBUG**: Rule table loads and individual scoring calls
//! - **TRACE**: Per-feature band decisions

use std::io::{self, Write};
use std::sync::OnceLock;
use std::time::Instant;

use owo_colors::OwoColorize;
use tracing::field::{Field, Visit};
use tracing::level_filters::LevelFilter;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::Context;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

static INIT: OnceLock<()> = OnceLock::new();
static EPOCH: OnceLock<Instant> = OnceLock::new();

/// Crates whose events this console renders.
const TARGETS: [&str; 3] = ["doshaforge", "doshaforge_config", "doshaforge_scoring"];

/// Initializes console logging at INFO.
///
/// Safe to call multiple times - only the first call has effect.
pub fn init() {
    init_with_level(LevelFilter::INFO);
}

/// Initializes console logging from a `-v` count: 0 is INFO, 1 is DEBUG,
/// anything higher is TRACE.
pub fn init_verbose(verbosity: u8) {
    let level = match verbosity {
        0 => LevelFilter::INFO,
        1 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };
    init_with_level(level);
}

/// Initializes console logging with the given level for DoshaForge crates.
///
/// `RUST_LOG` still applies to everything else.
pub fn init_with_level(level: LevelFilter) {
    INIT.get_or_init(|| {
        EPOCH.get_or_init(Instant::now);

        let _ = tracing_subscriber::registry()
            .with(filter(level))
            .with(DoshaConsoleLayer)
            .try_init();
    });
}

fn filter(level: LevelFilter) -> EnvFilter {
    let mut filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy();
    for target in TARGETS {
        if let Ok(directive) = format!("{}={}", target, level).parse() {
            filter = filter.add_directive(directive);
        }
    }
    filter
}

fn elapsed_secs() -> f64 {
    EPOCH.get().map_or(0.0, |epoch| epoch.elapsed().as_secs_f64())
}

/// A tracing layer that formats DoshaForge events with colors.
pub struct DoshaConsoleLayer;

impl<S: Subscriber> Layer<S> for DoshaConsoleLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        if !metadata.target().starts_with("doshaforge") {
            return;
        }

        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);

        let output = format_event(&visitor, *metadata.level());
        if !output.is_empty() {
            let _ = writeln!(io::stderr(), "{}", output);
        }
    }
}

#[derive(Debug, Default)]
struct EventVisitor {
    event: Option<String>,
    message: Option<String>,
    path: Option<String>,
    format: Option<String>,
    category: Option<String>,
    feature: Option<String>,
    dominant: Option<String>,
    scores: Option<String>,
    reason: Option<String>,
    band: Option<String>,
    categories: Option<u64>,
    features: Option<u64>,
    score: Option<u64>,
    value: Option<f64>,
}

impl EventVisitor {
    fn slot(&mut self, name: &str) -> Option<&mut Option<String>> {
        match name {
            "event" => Some(&mut self.event),
            "message" => Some(&mut self.message),
            "path" => Some(&mut self.path),
            "format" => Some(&mut self.format),
            "category" => Some(&mut self.category),
            "feature" => Some(&mut self.feature),
            "dominant" => Some(&mut self.dominant),
            "scores" => Some(&mut self.scores),
            "reason" => Some(&mut self.reason),
            "band" => Some(&mut self.band),
            _ => None,
        }
    }
}

impl Visit for EventVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        if let Some(slot) = self.slot(field.name()) {
            *slot = Some(format!("{:?}", value).trim_matches('"').to_string());
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        if let Some(slot) = self.slot(field.name()) {
            *slot = Some(value.to_string());
        }
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        match field.name() {
            "categories" => self.categories = Some(value),
            "features" => self.features = Some(value),
            "score" => self.score = Some(value),
            _ => {}
        }
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        if field.name() == "value" {
            self.value = Some(value);
        }
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.record_u64(field, value.max(0) as u64);
    }
}

fn format_event(v: &EventVisitor, level: Level) -> String {
    match v.event.as_deref().unwrap_or("") {
        "config_loaded" => format_config_loaded(v),
        "unknown_feature" => format_unknown_feature(v),
        "score" => format_score(v),
        "band" => format_band(v, level),
        "analyze" => format_analyze(v),
        "rejected" => format_rejected(v),
        _ => format_plain(v, level),
    }
}

fn format_elapsed() -> String {
    format!("{:>7.3}s", elapsed_secs())
        .bright_black()
        .to_string()
}

fn format_config_loaded(v: &EventVisitor) -> String {
    format!(
        "{} {} Rule table │ {} categories │ {} │ {}",
        format_elapsed(),
        "●".bright_cyan().bold(),
        v.categories.unwrap_or(0).bright_yellow(),
        v.format.as_deref().unwrap_or("json").white(),
        v.path.as_deref().unwrap_or("<memory>").bright_black()
    )
}

fn format_unknown_feature(v: &EventVisitor) -> String {
    format!(
        "{} {} Ignoring unknown feature {} in category {}",
        format_elapsed(),
        "⚠".yellow().bold(),
        v.feature.as_deref().unwrap_or("?").yellow(),
        v.category.as_deref().unwrap_or("?").white().bold()
    )
}

fn format_score(v: &EventVisitor) -> String {
    format!(
        "{} {} Scored │ {} features │ {} categories │ dominant {}",
        format_elapsed(),
        "◆".bright_blue(),
        v.features.unwrap_or(0).white(),
        v.categories.unwrap_or(0).white(),
        v.dominant.as_deref().unwrap_or("none").bright_green()
    )
}

fn format_band(v: &EventVisitor, level: Level) -> String {
    if level != Level::TRACE {
        return String::new();
    }

    format!(
        "{}   {} {:<10} {:<10} {:>8} │ {:<4} │ +{}",
        format_elapsed(),
        "·".bright_black(),
        v.category.as_deref().unwrap_or("?").white(),
        v.feature.as_deref().unwrap_or("?").bright_black(),
        v.value.map(|x| x.to_string()).unwrap_or_default().white(),
        v.band.as_deref().unwrap_or("?").bright_blue(),
        v.score.unwrap_or(0).bright_yellow()
    )
}

fn format_analyze(v: &EventVisitor) -> String {
    format!(
        "{} {} Analysis │ {} │ dominant {}",
        format_elapsed(),
        "▶".bright_green().bold(),
        v.scores.as_deref().unwrap_or("").bright_magenta(),
        v.dominant.as_deref().unwrap_or("none").bright_green().bold()
    )
}

fn format_rejected(v: &EventVisitor) -> String {
    format!(
        "{} {} Rejected │ {}",
        format_elapsed(),
        "✗".bright_red().bold(),
        v.reason.as_deref().unwrap_or("unknown reason").red()
    )
}

// Events without a recognised `event` field. Only warnings and errors are
// shown so library debug chatter does not leak into command output.
fn format_plain(v: &EventVisitor, level: Level) -> String {
    let Some(message) = v.message.as_deref() else {
        return String::new();
    };
    let tag = match level {
        Level::ERROR => "ERROR".bright_red().bold().to_string(),
        Level::WARN => "WARN".yellow().bold().to_string(),
        _ => return String::new(),
    };
    format!("{} {} {}", format_elapsed(), tag, message)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn visitor(event: &str) -> EventVisitor {
        EventVisitor {
            event: Some(event.to_string()),
            ..EventVisitor::default()
        }
    }

    #[test]
    fn test_config_loaded_line() {
        let mut v = visitor("config_loaded");
        v.categories = Some(3);
        v.path = Some("config/dosha_config.json".to_string());

        let line = format_event(&v, Level::DEBUG);
        assert!(line.contains("Rule table"));
        assert!(line.contains("config/dosha_config.json"));
        assert!(line.contains('3'));
    }

    #[test]
    fn test_analyze_line() {
        let mut v = visitor("analyze");
        v.scores = Some("kapha=8 pitta=0 vata=0".to_string());
        v.dominant = Some("kapha".to_string());

        let line = format_event(&v, Level::INFO);
        assert!(line.contains("kapha=8 pitta=0 vata=0"));
        assert!(line.contains("dominant"));
    }

    #[test]
    fn test_band_line_only_at_trace() {
        let mut v = visitor("band");
        v.category = Some("vata".to_string());
        v.feature = Some("hr".to_string());
        v.band = Some("high".to_string());
        v.value = Some(112.0);
        v.score = Some(2);

        assert!(format_event(&v, Level::DEBUG).is_empty());
        let line = format_event(&v, Level::TRACE);
        assert!(line.contains("vata"));
        assert!(line.contains("112"));
        assert!(line.contains("high"));
    }

    #[test]
    fn test_rejected_line() {
        let mut v = visitor("rejected");
        v.reason = Some("Missing parameters: hrv".to_string());
        assert!(format_event(&v, Level::INFO).contains("Missing parameters: hrv"));
    }

    #[test]
    fn test_plain_events_only_for_warnings() {
        let v = EventVisitor {
            message: Some("something happened".to_string()),
            ..EventVisitor::default()
        };
        assert!(format_event(&v, Level::INFO).is_empty());
        assert!(format_event(&v, Level::WARN).contains("something happened"));
        assert!(format_event(&v, Level::ERROR).contains("ERROR"));
    }

    #[test]
    fn test_init_is_idempotent() {
        init();
        init_verbose(2);
    }
}
