//! Approximate string matching
//!
//! [`score`] ranks a candidate string against a query in two bands:
//! contiguous substring hits score in the upper band, ordered-subsequence
//! ("fuzzy") hits in the lower band, and shorter candidates win ties inside
//! each band.
//!
//! The filter engine does not call [`score`] directly; it receives a
//! [`Matcher`] strategy at construction ([`ExactMatcher`] for plain
//! containment, [`FuzzyMatcher`] for score thresholds).

use serde::{Deserialize, Serialize};
use std::fmt;

/// Score ceiling for substring matches.
pub const SUBSTRING_BASE_SCORE: u32 = 100;

/// Lowest score a substring match can get, however long the candidate.
///
/// Sits one above [`SUBSEQUENCE_BASE_SCORE`] so a substring hit always outranks
/// a subsequence hit.
pub const SUBSTRING_SCORE_FLOOR: u32 = SUBSEQUENCE_BASE_SCORE + 1;

/// Score ceiling for subsequence matches.
pub const SUBSEQUENCE_BASE_SCORE: u32 = 50;

/// Default minimum score accepted by [`FuzzyMatcher`].
pub const DEFAULT_FUZZY_THRESHOLD: u32 = 10;

/// Score `candidate` against `query`, case-insensitively.
///
/// Returns 0 when either string is empty or when the query characters do not
/// all appear in order in the candidate. Lengths are counted in characters
/// after lower-casing.
///
/// ```
/// use core_catalog::matcher::score;
///
/// assert_eq!(score("Strawberry", "straw"), 95);
/// assert_eq!(score("Strawberry", "sbry"), 44);
/// assert_eq!(score("Strawberry", "xyz"), 0);
/// ```
pub fn score(candidate: &str, query: &str) -> u32 {
    if candidate.is_empty() || query.is_empty() {
        return 0;
    }

    let candidate = candidate.to_lowercase();
    let query = query.to_lowercase();
    let length_gap = candidate
        .chars()
        .count()
        .saturating_sub(query.chars().count());
    let length_gap = u32::try_from(length_gap).unwrap_or(u32::MAX);

    if candidate.contains(&query) {
        return SUBSTRING_BASE_SCORE
            .saturating_sub(length_gap)
            .max(SUBSTRING_SCORE_FLOOR);
    }

    if is_subsequence(&candidate, &query) {
        return SUBSEQUENCE_BASE_SCORE.saturating_sub(length_gap);
    }

    0
}

/// Greedy left-to-right check that every `query` char appears in `candidate`
/// in order.
fn is_subsequence(candidate: &str, query: &str) -> bool {
    let mut pending = query.chars().peekable();
    for ch in candidate.chars() {
        match pending.peek() {
            Some(&wanted) if wanted == ch => {
                pending.next();
            }
            Some(_) => {}
            None => break,
        }
    }
    pending.peek().is_none()
}

/// Match strategy used by the search predicate.
///
/// `term` is the user's search text; implementations decide whether
/// `candidate` (one field value of a record) satisfies it.
pub trait Matcher: fmt::Debug {
    fn is_match(&self, candidate: &str, term: &str) -> bool;
}

/// Case-insensitive containment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExactMatcher;

impl Matcher for ExactMatcher {
    fn is_match(&self, candidate: &str, term: &str) -> bool {
        candidate.to_lowercase().contains(&term.to_lowercase())
    }
}

/// Accepts candidates whose [`score`] reaches a threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FuzzyMatcher {
    threshold: u32,
}

impl FuzzyMatcher {
    /// A threshold of 0 falls back to [`DEFAULT_FUZZY_THRESHOLD`].
    pub fn new(threshold: u32) -> Self {
        let threshold = if threshold == 0 {
            DEFAULT_FUZZY_THRESHOLD
        } else {
            threshold
        };
        Self { threshold }
    }

    pub fn threshold(&self) -> u32 {
        self.threshold
    }
}

impl Default for FuzzyMatcher {
    fn default() -> Self {
        Self::new(DEFAULT_FUZZY_THRESHOLD)
    }
}

impl Matcher for FuzzyMatcher {
    fn is_match(&self, candidate: &str, term: &str) -> bool {
        score(candidate, term) >= self.threshold
    }
}

/// Serializable selection of the match strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum MatchMode {
    /// Plain case-insensitive containment
    #[default]
    Exact,
    /// Scored matching accepted at or above `threshold`
    Fuzzy {
        #[serde(default = "default_threshold")]
        threshold: u32,
    },
}

fn default_threshold() -> u32 {
    DEFAULT_FUZZY_THRESHOLD
}

impl MatchMode {
    /// Fuzzy mode with the default threshold.
    pub fn fuzzy() -> Self {
        MatchMode::Fuzzy {
            threshold: DEFAULT_FUZZY_THRESHOLD,
        }
    }

    /// Build the strategy object for this mode.
    pub fn matcher(&self) -> Box<dyn Matcher> {
        match *self {
            MatchMode::Exact => Box::new(ExactMatcher),
            MatchMode::Fuzzy { threshold } => Box::new(FuzzyMatcher::new(threshold)),
        }
    }
}
