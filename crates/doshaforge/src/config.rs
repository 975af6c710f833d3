//! Locating and loading the active rule table.

use std::env;
use std::path::{Path, PathBuf};

use doshaforge_config::{ConfigError, RuleTable};
use doshaforge_scoring::DoshaScorer;

/// Rule table used when [`CONFIG_ENV_VAR`] is not set, relative to the
/// working directory.
pub const DEFAULT_CONFIG_PATH: &str = "config/dosha_config.json";

/// Environment variable that overrides [`DEFAULT_CONFIG_PATH`].
pub const CONFIG_ENV_VAR: &str = "DOSHAFORGE_CONFIG";

/// Path of the active rule table.
pub fn config_path() -> PathBuf {
    env::var_os(CONFIG_ENV_VAR)
        .filter(|p| !p.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
}

/// Loads the active rule table.
///
/// # Errors
///
/// Returns error if the file is missing, malformed, or structurally invalid.
pub fn load_config() -> Result<RuleTable, ConfigError> {
    load_config_from(config_path())
}

/// Loads a rule table from an explicit path.
pub fn load_config_from(path: impl AsRef<Path>) -> Result<RuleTable, ConfigError> {
    RuleTable::load(path)
}

/// Builds a scorer over the active rule table.
pub fn default_scorer() -> Result<DoshaScorer, ConfigError> {
    Ok(DoshaScorer::new(load_config()?))
}
