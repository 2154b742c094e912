//! Rules deciding when the learner should speak in a podcast conversation.
//!
//! An AI generated conversation is split into sections, each section is
//! played message by message and after the last message [`TurnRules`]
//! decides whether the learner is expected to answer. The rules are plain
//! phrase lists so they can be tuned in the configuration together with the
//! prompts that produce the conversation.

use serde::Deserialize;
use tracing::debug;

/// Role of messages that are never shown or played.
pub const SYSTEM_ROLE: &str = "system";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Message {
    pub role: String,
    pub content: String,
}

impl Message {
    pub fn new(role: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            content: content.into(),
        }
    }

    pub fn is_system(&self) -> bool {
        self.role == SYSTEM_ROLE
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TurnRules {
    /// Display name of the learner. Messages with this role are the
    /// learner's own (compared case-insensitively).
    pub user_name: String,
    /// Matched against the lowercased content
    pub directed_phrases: Vec<String>,
    /// Matched against the lowercased content
    pub question_phrases: Vec<String>,
    /// A lone message longer than this (in characters) invites an answer
    pub lenient_min_len: usize,
    /// Matched case-sensitively; any hit disables the lenient rule
    pub lenient_excluded_phrases: Vec<String>,
}

impl Default for TurnRules {
    fn default() -> Self {
        fn strings(items: &[&str]) -> Vec<String> {
            items.iter().map(|s| (*s).to_string()).collect()
        }

        Self {
            user_name: "You".to_string(),
            directed_phrases: strings(&[" you", "you ", "your "]),
            question_phrases: strings(&[
                "?",
                "what do you think",
                "your thoughts",
                "would you",
                "could you",
                "how about you",
                "do you agree",
            ]),
            lenient_min_len: 40,
            lenient_excluded_phrases: strings(&["Let me", "I'll"]),
        }
    }
}

/// Individual rule results of [`TurnRules::decide`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TurnDecision {
    pub from_user: bool,
    pub directed_at_user: bool,
    pub question: bool,
    pub single_or_last: bool,
    /// the lenient rule for lone messages fired
    pub lenient: bool,
    pub user_turn: bool,
}

impl TurnRules {
    pub fn is_user(&self, message: &Message) -> bool {
        message.role.to_lowercase() == self.user_name.to_lowercase()
    }

    /// Decides for the message at `index` of a section with `section_len`
    /// messages.
    pub fn decide(&self, message: &Message, index: usize, section_len: usize) -> TurnDecision {
        if self.is_user(message) {
            return TurnDecision {
                from_user: true,
                ..TurnDecision::default()
            };
        }

        let lowered = message.content.to_lowercase();
        let directed_at_user = (!self.user_name.is_empty() && message.content.contains(&self.user_name))
            || self.directed_phrases.iter().any(|p| lowered.contains(p.as_str()));
        let question = self.question_phrases.iter().any(|p| lowered.contains(p.as_str()));
        let single_or_last = section_len == 1 || index + 1 == section_len;

        let mut user_turn = (directed_at_user && question) || (single_or_last && (directed_at_user || question));

        let mut lenient = false;
        if !user_turn && section_len == 1 {
            lenient = message.content.chars().count() > self.lenient_min_len
                && !self
                    .lenient_excluded_phrases
                    .iter()
                    .any(|p| message.content.contains(p.as_str()));
            user_turn = lenient;
        }

        let decision = TurnDecision {
            from_user: false,
            directed_at_user,
            question,
            single_or_last,
            lenient,
            user_turn,
        };
        debug!(role = %message.role, ?decision, "turn decision");
        decision
    }

    /// Plans playback of one section. Every message that is neither a system
    /// nor a learner message is spoken in order; the decision for the last
    /// message of the section tells whether to prompt the learner afterwards.
    pub fn plan_section(&self, section: &[Message]) -> SectionPlan {
        let spoken: Vec<usize> = section
            .iter()
            .enumerate()
            .filter(|(_, m)| !m.is_system() && !self.is_user(m))
            .map(|(i, _)| i)
            .collect();

        let last = section.len().checked_sub(1);
        let prompt_user = match last {
            Some(last) if spoken.last() == Some(&last) => {
                self.decide(&section[last], last, section.len()).user_turn
            }
            _ => false,
        };

        SectionPlan { spoken, prompt_user }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SectionPlan {
    /// indices into the section, in playback order
    pub spoken: Vec<usize>,
    pub prompt_user: bool,
}

/// Conversation split at the learner's messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sections {
    user_name: String,
    sections: Vec<Vec<Message>>,
}

impl Sections {
    /// No sections yet. The first [`Sections::extend_from`] splits the whole
    /// conversation at messages of `user_name`.
    pub fn new(user_name: &str) -> Self {
        Self {
            user_name: user_name.to_string(),
            sections: Vec::new(),
        }
    }

    /// Drops system messages and starts a new section with every learner
    /// message.
    pub fn from_messages(messages: &[Message], user_name: &str) -> Self {
        let user = user_name.to_lowercase();
        let mut sections = Vec::new();
        let mut current: Vec<Message> = Vec::new();

        for message in messages.iter().filter(|m| !m.is_system()) {
            if message.role.to_lowercase() == user && !current.is_empty() {
                sections.push(std::mem::take(&mut current));
            }
            current.push(message.clone());
        }
        if !current.is_empty() {
            sections.push(current);
        }

        Self {
            user_name: user_name.to_string(),
            sections,
        }
    }

    /// Appends every non-system message that is not part of any section yet
    /// as one new section. Messages are identified by role and content.
    /// Returns whether a section was added.
    pub fn extend_from(&mut self, messages: &[Message]) -> bool {
        if self.sections.is_empty() {
            *self = Self::from_messages(messages, &self.user_name);
            return !self.sections.is_empty();
        }

        let new: Vec<Message> = messages
            .iter()
            .filter(|m| !m.is_system())
            .filter(|m| !self.sections.iter().flatten().any(|known| known == *m))
            .cloned()
            .collect();

        if new.is_empty() {
            return false;
        }
        self.sections.push(new);
        true
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&[Message]> {
        self.sections.get(index).map(Vec::as_slice)
    }

    /// The most recent section
    pub fn current(&self) -> Option<&[Message]> {
        self.sections.last().map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = &[Message]> {
        self.sections.iter().map(Vec::as_slice)
    }
}
