//! Error types for the DoshaForge facade.

use std::fmt;

use thiserror::Error;

use doshaforge_config::ConfigError;
use doshaforge_core::{Feature, ValidationError};

/// A request payload that does not have the shape an analysis needs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestError {
    #[error("No JSON payload provided")]
    NotAnObject,

    /// One or more canonical features were not supplied, in canonical order.
    #[error("Missing parameters: {}", FeatureList(.0))]
    MissingParameters(Vec<Feature>),
}

struct FeatureList<'a>(&'a [Feature]);

impl fmt::Display for FeatureList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, feature) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", feature)?;
        }
        Ok(())
    }
}

/// Main error type for DoshaForge operations.
#[derive(Debug, Error)]
pub enum DoshaForgeError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Request(#[from] RequestError),
}

impl DoshaForgeError {
    /// Returns true for errors caused by the caller's input rather than by
    /// the rule table.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            DoshaForgeError::Validation(_) | DoshaForgeError::Request(_)
        )
    }
}

/// Result type alias for DoshaForge operations.
pub type Result<T> = std::result::Result<T, DoshaForgeError>;
