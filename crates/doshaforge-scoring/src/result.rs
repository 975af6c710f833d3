//! Per-category score totals and dominance selection.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Total score per category, in rule table declaration order.
///
/// # Example
///
/// ```
/// use doshaforge_scoring::ScoreResult;
///
/// let result = ScoreResult::from_pairs([("kapha", 2), ("pitta", 4), ("vata", 4)]);
///
/// // Ties go to the category declared first.
/// assert_eq!(result.dominant(), Some("pitta"));
/// assert_eq!(result.get("vata"), Some(4));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct ScoreResult {
    totals: IndexMap<String, u64>,
}

impl ScoreResult {
    /// Creates a result from `(category, total)` pairs, keeping their order.
    pub fn from_pairs<I, N>(iter: I) -> Self
    where
        I: IntoIterator<Item = (N, u64)>,
        N: Into<String>,
    {
        let totals = iter.into_iter().map(|(n, t)| (n.into(), t)).collect();
        Self { totals }
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            totals: IndexMap::with_capacity(capacity),
        }
    }

    pub(crate) fn push(&mut self, category: &str, total: u64) {
        self.totals.insert(category.to_string(), total);
    }

    /// Total for a category.
    pub fn get(&self, category: &str) -> Option<u64> {
        self.totals.get(category).copied()
    }

    /// Iterates `(category, total)` in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> + '_ {
        self.totals.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.totals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.totals.is_empty()
    }

    /// The category with the highest total.
    ///
    /// When several categories share the maximum, the one declared first
    /// wins. Returns `None` only for an empty result.
    pub fn dominant(&self) -> Option<&str> {
        let mut best: Option<(&str, u64)> = None;
        for (category, total) in self.iter() {
            match best {
                Some((_, max)) if total <= max => {}
                _ => best = Some((category, total)),
            }
        }
        best.map(|(category, _)| category)
    }

    /// Categories sorted by descending total, ties in declaration order.
    pub fn ranked(&self) -> Vec<(&str, u64)> {
        let mut ranked: Vec<_> = self.iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked
    }

    /// Returns true if more than one category holds the maximum total.
    pub fn is_tied(&self) -> bool {
        let ranked = self.ranked();
        matches!(ranked.as_slice(), [first, second, ..] if first.1 == second.1)
    }
}

impl fmt::Display for ScoreResult {
    /// Renders as `kapha=2 pitta=0 vata=0`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (category, total)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}={}", category, total)?;
        }
        Ok(())
    }
}

/// Scores together with the dominant category they select.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Evaluation {
    pub scores: ScoreResult,
    pub dominant: Option<String>,
}

impl From<ScoreResult> for Evaluation {
    fn from(scores: ScoreResult) -> Self {
        let dominant = scores.dominant().map(str::to_string);
        Self { scores, dominant }
    }
}
