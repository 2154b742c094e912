//! TOML configuration.
//!
//! Every key is optional, an empty document yields the defaults:
//!
//! ```toml
//! [matching]
//! threshold = 0.85
//! min_fuzzy_len = 3
//!
//! [turn]
//! user_name = "You"
//! directed_phrases = [" you", "you ", "your "]
//! question_phrases = ["?", "what do you think", "would you"]
//! lenient_min_len = 40
//! lenient_excluded_phrases = ["Let me", "I'll"]
//! ```

use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::debug;

use crate::error::Result;
use crate::grade::{MatchConfig, Matcher};
use crate::turn::TurnRules;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub matching: MatchConfig,
    #[serde(default)]
    pub turn: TurnRules,
}

impl Config {
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        let config = Self::from_toml_str(&text)?;
        debug!(path = %path.display(), ?config, "loaded configuration");
        Ok(config)
    }

    pub fn matcher(&self) -> Matcher {
        Matcher::new(self.matching)
    }
}
