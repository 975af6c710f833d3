//! Threshold band scoring for DoshaForge.
//!
//! This crate turns a [`FeatureBundle`](doshaforge_core::FeatureBundle) into
//! per-category integer scores using a [`RuleTable`](doshaforge_config::RuleTable):
//! - [`DoshaScorer`]: the engine, built from an explicitly supplied table
//! - [`ScoreResult`]: ordered totals with dominance selection
//! - [`ScoreExplanation`]: per-feature band and score breakdown
//!
//! # Architecture
//!
//! Scoring is a pure function of the table and the bundle. Each category
//! total is the sum over the four canonical features of the band score for
//! the supplied value; a feature with no value or no rule adds nothing.

pub mod analysis;
pub mod result;
pub mod scorer;


pub use analysis::{CategoryAnalysis, FeatureContribution, ScoreExplanation};
pub use result::{Evaluation, ScoreResult};
pub use scorer::DoshaScorer;
