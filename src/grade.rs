//! Decides whether a spoken answer matches the expected phrase.
//!
//! Both strings are [normalized](crate::normalize) first. Equal normalized
//! strings always match. Below a minimum length only equal strings match,
//! since a single edit on a one or two letter word changes the word. Longer
//! strings match when their [similarity](crate::similarity) reaches the
//! threshold.

use serde::Deserialize;
use tracing::debug;

use crate::common::{SimilarityCutoff, WithScoreCutoff};
use crate::distance::levenshtein;
use crate::error::{Error, Result};
use crate::normalize::normalize;

pub const DEFAULT_THRESHOLD: f64 = 0.85;
pub const DEFAULT_MIN_FUZZY_LEN: usize = 3;

/// Parameters of the match decision.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(try_from = "RawMatchConfig")]
pub struct MatchConfig {
    threshold: f64,
    min_fuzzy_len: usize,
}

#[derive(Deserialize)]
struct RawMatchConfig {
    #[serde(default = "default_threshold")]
    threshold: f64,
    #[serde(default = "default_min_fuzzy_len")]
    min_fuzzy_len: usize,
}

fn default_threshold() -> f64 {
    DEFAULT_THRESHOLD
}

fn default_min_fuzzy_len() -> usize {
    DEFAULT_MIN_FUZZY_LEN
}

impl TryFrom<RawMatchConfig> for MatchConfig {
    type Error = Error;

    fn try_from(raw: RawMatchConfig) -> Result<Self> {
        MatchConfig::new(raw.threshold, raw.min_fuzzy_len)
    }
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            min_fuzzy_len: DEFAULT_MIN_FUZZY_LEN,
        }
    }
}

impl MatchConfig {
    /// `threshold` has to be within `[0, 1]` and `min_fuzzy_len` at least 1.
    pub fn new(threshold: f64, min_fuzzy_len: usize) -> Result<Self> {
        if !(0.0..=1.0).contains(&threshold) {
            return Err(Error::InvalidThreshold(threshold));
        }
        if min_fuzzy_len == 0 {
            return Err(Error::InvalidMinLength(min_fuzzy_len));
        }
        Ok(Self {
            threshold,
            min_fuzzy_len,
        })
    }

    pub const fn threshold(&self) -> f64 {
        self.threshold
    }

    /// The threshold as a similarity cutoff.
    pub const fn cutoff(&self) -> WithScoreCutoff<f64> {
        WithScoreCutoff(self.threshold)
    }

    pub const fn min_fuzzy_len(&self) -> usize {
        self.min_fuzzy_len
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// normalized strings are identical
    Exact,
    /// similarity reached the threshold
    Fuzzy,
    /// one string is shorter than the minimum fuzzy length
    TooShort,
    /// similarity is below the threshold
    Mismatch,
}

impl Verdict {
    pub const fn is_match(self) -> bool {
        matches!(self, Verdict::Exact | Verdict::Fuzzy)
    }
}

/// Full result of a comparison. Besides the verdict it keeps the normalized
/// strings, which is what a feedback view shows to the learner.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchOutcome {
    pub spoken: String,
    pub expected: String,
    /// `None` when the decision was made without computing a distance
    pub similarity: Option<f64>,
    pub verdict: Verdict,
}

impl MatchOutcome {
    pub const fn is_match(&self) -> bool {
        self.verdict.is_match()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Matcher {
    config: MatchConfig,
}

impl Matcher {
    pub const fn new(config: MatchConfig) -> Self {
        Self { config }
    }

    pub const fn config(&self) -> &MatchConfig {
        &self.config
    }

    pub fn is_match(&self, spoken: &str, expected: &str) -> bool {
        self.grade(spoken, expected).is_match()
    }

    pub fn grade(&self, spoken: &str, expected: &str) -> MatchOutcome {
        decide(normalize(spoken), normalize(expected), &self.config)
    }
}

fn decide(spoken: String, expected: String, config: &MatchConfig) -> MatchOutcome {
    let min_fuzzy_len = config.min_fuzzy_len;
    let (similarity, verdict) = if spoken == expected {
        (None, Verdict::Exact)
    } else if spoken.chars().count() < min_fuzzy_len || expected.chars().count() < min_fuzzy_len {
        (None, Verdict::TooShort)
    } else {
        let similarity = levenshtein::similarity(&spoken, &expected);
        let verdict = match config.cutoff().score(similarity) {
            Some(_) => Verdict::Fuzzy,
            None => Verdict::Mismatch,
        };
        (Some(similarity), verdict)
    };

    debug!(%spoken, %expected, ?similarity, threshold = config.threshold, ?verdict, "graded answer");

    MatchOutcome {
        spoken,
        expected,
        similarity,
        verdict,
    }
}

/// Compares with the default threshold of `0.85`.
pub fn is_match(spoken: &str, expected: &str) -> bool {
    is_match_with_threshold(spoken, expected, DEFAULT_THRESHOLD)
}

/// Compares with a custom threshold. The threshold is not validated; values
/// outside `[0, 1]` make every fuzzy comparison succeed or fail.
pub fn is_match_with_threshold(spoken: &str, expected: &str, threshold: f64) -> bool {
    let config = MatchConfig {
        threshold,
        min_fuzzy_len: DEFAULT_MIN_FUZZY_LEN,
    };
    decide(normalize(spoken), normalize(expected), &config).is_match()
}
