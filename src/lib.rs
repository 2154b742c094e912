//! `speakmatch` grades spoken answers against the phrase a learner was asked
//! to say. A speech-to-text transcript rarely matches the target exactly, so
//! both strings are normalized and compared with the Levenshtein distance.
//!
//! ## Usage
//!
//! ```rust
//! use speakmatch::{edit_distance, is_match, normalize, similarity};
//!
//! // case and punctuation are ignored
//! assert!(is_match("entrepreneur", "Entrepreneur!"));
//!
//! // one missing letter in a twelve letter word is still close enough
//! assert!(is_match("entreprener", "entrepreneur"));
//!
//! // strings shorter than three characters have to match exactly
//! assert!(!is_match("ab", "ac"));
//!
//! assert_eq!(edit_distance("kitten", "sitting"), 3);
//! assert_eq!(normalize("  Hello,   World!!  "), "hello world");
//! assert_eq!(similarity("", ""), 1.0);
//! ```
//!
//! The thresholds can be changed through a [`Matcher`], which can also be
//! loaded from a TOML [`config::Config`]:
//!
//! ```rust
//! use speakmatch::{MatchConfig, Matcher};
//!
//! let matcher = Matcher::new(MatchConfig::new(0.9, 3)?);
//! assert!(!matcher.is_match("worcestershire", "worcestersire sauce"));
//! # Ok::<(), speakmatch::Error>(())
//! ```
//!
//! Besides the grading core the crate contains the quiz bookkeeping in
//! [`quiz`], the podcast mode in [`podcast`] (participants, generated
//! messages and voices) with its "is it the learner's turn" rules in
//! [`turn`], and an explicit cache for generated conversation situations in
//! [`cache`].

#![forbid(unsafe_code)]
#![allow(
    // lengths are converted to f64 to build ratios
    clippy::cast_precision_loss,
    // things are often more readable this way
    clippy::module_name_repetitions,
    clippy::similar_names,
)]

pub mod cache;
pub mod common;
pub mod config;
pub(crate) mod details;
pub mod distance;
pub mod error;
pub mod grade;
pub mod normalize;
pub mod podcast;
pub mod quiz;
pub mod turn;

pub use distance::levenshtein::{distance as edit_distance, similarity};
pub use error::{Error, Result};
pub use grade::{is_match, is_match_with_threshold, MatchConfig, MatchOutcome, Matcher, Verdict};
pub use normalize::normalize;
