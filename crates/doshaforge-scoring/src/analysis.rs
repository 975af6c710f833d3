//! Score explanation types.
//!
//! An explanation records, for every category, which band each supplied
//! feature fell into and the score that band contributed.

use serde::Serialize;

use doshaforge_core::{Band, Feature};

use crate::result::ScoreResult;

/// The score one feature contributed to one category.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FeatureContribution {
    pub feature: Feature,
    /// Value supplied in the bundle.
    pub value: f64,
    /// Band the value fell into.
    pub band: Band,
    /// Score the rule awards for that band.
    pub score: u32,
}

/// Per-category breakdown in a score explanation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryAnalysis {
    pub category: String,
    /// Sum of all contributions.
    pub total: u64,
    /// Contributions in canonical feature order. Features that were not
    /// supplied, or that the category has no rule for, do not appear.
    pub contributions: Vec<FeatureContribution>,
}

impl CategoryAnalysis {
    pub(crate) fn new(category: &str) -> Self {
        Self {
            category: category.to_string(),
            total: 0,
            contributions: Vec::new(),
        }
    }

    pub(crate) fn add(&mut self, contribution: FeatureContribution) {
        self.total += u64::from(contribution.score);
        self.contributions.push(contribution);
    }

    /// Contribution of a single feature, if it was scored.
    pub fn contribution(&self, feature: Feature) -> Option<&FeatureContribution> {
        self.contributions.iter().find(|c| c.feature == feature)
    }
}

/// Full explanation of a scoring request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreExplanation {
    /// One entry per category, in rule table order.
    pub categories: Vec<CategoryAnalysis>,
    /// Canonical features that were absent from the bundle.
    pub skipped: Vec<Feature>,
}

impl ScoreExplanation {
    /// Analysis for one category.
    pub fn get(&self, category: &str) -> Option<&CategoryAnalysis> {
        self.categories.iter().find(|c| c.category == category)
    }

    /// Collapses the explanation into plain totals.
    pub fn totals(&self) -> ScoreResult {
        ScoreResult::from_pairs(
            self.categories
                .iter()
                .map(|c| (c.category.as_str(), c.total)),
        )
    }
}
