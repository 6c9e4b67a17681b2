//! Match Selector
//!
//! Scores filename-encoded candidates against a target tag vector and picks a
//! single winner.
//!
//! # Candidate Encoding
//! `<weather>,<season>,<scene>,<color>,<animal>.mid`. Names without the
//! configured suffix, or that do not split into exactly `CATEGORY_COUNT`
//! components, are excluded without error.
//!
//! # Scoring
//! - `score`: sum of the category weight for every slot equal to the target
//! - `match_count`: number of equal slots
//!
//! # Selection
//! 1. Highest score
//! 2. Then highest match count
//! 3. Then lexicographically smallest identifier

use crate::tags::{TagVector, CATEGORY_COUNT};
use crate::{Error, Result};
use serde::Serialize;
use std::cmp::Ordering;
use tracing::debug;

/// Default category weights: weather, season, scene, color, animal
pub const DEFAULT_WEIGHTS: [u32; CATEGORY_COUNT] = [4, 5, 3, 3, 2];

/// Default candidate suffix (MIDI files)
pub const DEFAULT_SUFFIX: &str = ".mid";

/// Separator between encoded tag components
pub const TAG_SEPARATOR: char = ',';

/// Scored candidate
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredCandidate {
    pub identifier: String,
    pub tags: TagVector,
    pub score: u32,
    pub match_count: usize,
}

impl ScoredCandidate {
    /// Selection order: better candidates compare as `Less`
    fn selection_order(&self, other: &Self) -> Ordering {
        other
            .score
            .cmp(&self.score)
            .then_with(|| other.match_count.cmp(&self.match_count))
            .then_with(|| self.identifier.cmp(&other.identifier))
    }
}

/// Winning candidate
pub type BestMatch = ScoredCandidate;

/// Match selector
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchSelector {
    weights: [u32; CATEGORY_COUNT],
    suffix: String,
}

impl MatchSelector {
    /// Create a selector with per-category weights and candidate suffix
    ///
    /// # Errors
    /// Zero weights, weights whose total overflows `u32`, and a suffix with
    /// no extension text (`""` or `"."`) are rejected.
    pub fn new(weights: [u32; CATEGORY_COUNT], suffix: impl Into<String>) -> Result<Self> {
        if weights.iter().any(|&w| w == 0) {
            return Err(Error::InvalidInput(format!(
                "category weights must be positive: {:?}",
                weights
            )));
        }
        // Every score is bounded by this total
        if weights
            .iter()
            .try_fold(0u32, |total, &w| total.checked_add(w))
            .is_none()
        {
            return Err(Error::InvalidInput(format!(
                "category weights total exceeds {}: {:?}",
                u32::MAX,
                weights
            )));
        }
        let suffix = suffix.into();
        if suffix.trim_start_matches('.').is_empty() {
            return Err(Error::InvalidInput(format!(
                "candidate suffix must name an extension: {:?}",
                suffix
            )));
        }
        Ok(Self { weights, suffix })
    }

    pub fn weights(&self) -> &[u32; CATEGORY_COUNT] {
        &self.weights
    }

    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    /// Score for a candidate matching every category
    pub fn max_score(&self) -> u32 {
        self.weights.iter().sum()
    }

    /// Decode a candidate identifier into its tag vector
    ///
    /// Returns `None` for identifiers without the suffix or with the wrong
    /// number of components.
    pub fn decode(&self, identifier: &str) -> Option<TagVector> {
        let stem = identifier.strip_suffix(self.suffix.as_str())?;
        TagVector::from_components(stem.split(TAG_SEPARATOR))
    }

    /// Score a decoded candidate against the target
    ///
    /// Returns `(score, match_count)`.
    pub fn score(&self, target: &TagVector, candidate: &TagVector) -> (u32, usize) {
        target
            .slot_matches(candidate)
            .iter()
            .zip(self.weights.iter())
            .filter(|(matched, _)| **matched)
            .fold((0, 0), |(score, count), (_, weight)| (score + weight, count + 1))
    }

    /// Decode and score one identifier
    pub fn evaluate(&self, target: &TagVector, identifier: &str) -> Option<ScoredCandidate> {
        let Some(tags) = self.decode(identifier) else {
            debug!(candidate = %identifier, "Excluding malformed candidate");
            return None;
        };
        let (score, match_count) = self.score(target, &tags);
        Some(ScoredCandidate {
            identifier: identifier.to_string(),
            tags,
            score,
            match_count,
        })
    }

    /// Pick the best candidate
    ///
    /// Returns `None` when no identifier decodes.
    pub fn select_best<I, S>(&self, target: &TagVector, identifiers: I) -> Option<BestMatch>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let best = identifiers
            .into_iter()
            .filter_map(|id| self.evaluate(target, id.as_ref()))
            .min_by(|a, b| a.selection_order(b));

        match &best {
            Some(m) => debug!(
                best = %m.identifier,
                score = m.score,
                match_count = m.match_count,
                "Best match selected"
            ),
            None => debug!("No candidate qualified"),
        }
        best
    }

    /// All decodable candidates in selection order (winner first)
    pub fn rank<I, S>(&self, target: &TagVector, identifiers: I) -> Vec<ScoredCandidate>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut ranked: Vec<ScoredCandidate> = identifiers
            .into_iter()
            .filter_map(|id| self.evaluate(target, id.as_ref()))
            .collect();
        ranked.sort_by(ScoredCandidate::selection_order);
        ranked
    }
}

impl Default for MatchSelector {
    fn default() -> Self {
        Self {
            weights: DEFAULT_WEIGHTS,
            suffix: DEFAULT_SUFFIX.to_string(),
        }
    }
}
