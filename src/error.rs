//! Errors of the fallible parts of the crate.
//!
//! Comparing strings never fails. Errors come from loading and validating
//! configuration, parsing generated JSON, looking up cached situations and
//! the podcast participant rules.

use thiserror::Error;

/// Result type alias for speakmatch operations.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// Reading a configuration file failed
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration is not valid TOML or has the wrong shape
    #[error("invalid configuration: {0}")]
    Toml(#[from] toml::de::Error),

    /// Generated JSON has the wrong shape
    #[error("invalid json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("threshold must be within [0, 1], got {0}")]
    InvalidThreshold(f64),

    #[error("minimum fuzzy length must be at least 1, got {0}")]
    InvalidMinLength(usize),

    #[error("no situation with id {0:?}")]
    SituationNotFound(String),

    /// The situation loader returned nothing
    #[error("situation loader returned no situations")]
    EmptySituations,

    #[error("a podcast needs at least {required} participants, got {actual}")]
    NotEnoughParticipants { required: usize, actual: usize },

    #[error("participant {0:?} has no synthesized voice")]
    NoVoice(String),
}
