//! Podcast mode: the participant roster, reading the conversation a chat
//! model generated, turning it back into chat history and picking the
//! synthesized voice for each message.
//!
//! Nothing here talks to a network service. The generated text goes in as a
//! `&str` and the history and voice ids come out as values for the caller to
//! send wherever it likes.

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::OnceLock;
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::turn::Message;

/// Id of the learner's own participant.
pub const USER_ID: &str = "user";

/// Voice id that marks a participant as spoken by the learner.
pub const CUSTOM_VOICE: &str = "custom";

/// A podcast needs the learner plus at least one other speaker.
pub const MIN_PARTICIPANTS: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Voice {
    pub id: &'static str,
    pub name: &'static str,
}

/// Participant ids with a known synthesized voice.
pub const PREDEFINED_VOICES: &[(&str, Voice)] = &[
    ("elon_musk", Voice { id: "pNInz6obpgDQGcFmaJgB", name: "Elon Musk" }),
    ("joe_rogan", Voice { id: "ODq5zmih8GrVes37Dizd", name: "Joe Rogan" }),
    ("bill_gates", Voice { id: "pNInz6obpgDQGcFmaJgB", name: "Bill Gates" }),
    ("tim_cook", Voice { id: "o7lPisNne0wNCpD9zCkY", name: "Tim Cook" }),
    (USER_ID, Voice { id: CUSTOM_VOICE, name: "You" }),
];

pub fn predefined_voice(participant_id: &str) -> Option<Voice> {
    PREDEFINED_VOICES
        .iter()
        .find(|(id, _)| *id == participant_id)
        .map(|(_, voice)| *voice)
}

/// Resolves the voice id to synthesize with. Unknown participant ids are
/// passed through as voice ids; the learner's voice cannot be synthesized.
pub fn resolve_voice(voice_id: &str) -> Result<String> {
    if voice_id == USER_ID || voice_id == CUSTOM_VOICE {
        return Err(Error::NoVoice(voice_id.to_string()));
    }
    Ok(predefined_voice(voice_id).map_or_else(|| voice_id.to_string(), |v| v.id.to_string()))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "avatarUrl", alias = "avatar_url", default)]
    pub avatar_url: String,
}

impl Participant {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            avatar_url: String::new(),
        }
    }

    /// The learner, always present in a roster.
    pub fn user() -> Self {
        Self::new(USER_ID, "You")
    }

    pub fn is_user(&self) -> bool {
        self.id == USER_ID
    }
}

/// Participants of one podcast. Starts with the learner, who cannot be
/// removed; ids are unique.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Roster {
    participants: Vec<Participant>,
}

impl Default for Roster {
    fn default() -> Self {
        Self::new()
    }
}

impl Roster {
    pub fn new() -> Self {
        Self {
            participants: vec![Participant::user()],
        }
    }

    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    pub fn len(&self) -> usize {
        self.participants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.participants.iter().any(|p| p.id == id)
    }

    /// Adds `participant` unless one with the same id is already present.
    /// Returns whether it was added.
    pub fn add(&mut self, participant: Participant) -> bool {
        if self.contains(&participant.id) {
            return false;
        }
        debug!(id = %participant.id, "participant added");
        self.participants.push(participant);
        true
    }

    /// Removes the participant with `id`. The learner stays.
    pub fn remove(&mut self, id: &str) -> Option<Participant> {
        if id == USER_ID {
            return None;
        }
        let index = self.participants.iter().position(|p| p.id == id)?;
        Some(self.participants.remove(index))
    }

    pub fn can_start(&self) -> bool {
        self.len() >= MIN_PARTICIPANTS
    }

    pub fn start(&self) -> Result<()> {
        if self.can_start() {
            Ok(())
        } else {
            Err(Error::NotEnoughParticipants {
                required: MIN_PARTICIPANTS,
                actual: self.len(),
            })
        }
    }

    pub fn user(&self) -> Option<&Participant> {
        self.participants.iter().find(|p| p.is_user())
    }

    /// Display name of the learner, `"You"` when missing.
    pub fn user_name(&self) -> &str {
        self.user().map_or("You", |p| p.name.as_str())
    }

    /// Finds the participant speaking a message; roles are lowercased names.
    pub fn find_by_role(&self, role: &str) -> Option<&Participant> {
        let role = role.to_lowercase();
        self.participants
            .iter()
            .find(|p| p.name.to_lowercase() == role)
    }

    /// Voice to play `message` with. The learner and unknown speakers have
    /// none.
    pub fn voice_for_message(&self, message: &Message) -> Option<String> {
        let participant = self.find_by_role(&message.role)?;
        if participant.is_user() {
            return None;
        }
        resolve_voice(&participant.id).ok()
    }
}

fn object_regex() -> &'static Regex {
    static OBJECT: OnceLock<Regex> = OnceLock::new();
    // objects nested at most one level deep
    OBJECT.get_or_init(|| Regex::new(r"\{(?:[^{}]|\{[^{}]*\})*\}").expect("valid regex"))
}

fn message_from_value(value: &Value) -> Option<Message> {
    let role = value.get("role")?.as_str().filter(|s| !s.is_empty())?;
    let content = value.get("content")?.as_str().filter(|s| !s.is_empty())?;
    Some(Message::new(role.to_lowercase(), content))
}

fn extract_objects(text: &str) -> Vec<Message> {
    object_regex()
        .find_iter(text)
        .filter_map(|m| match serde_json::from_str::<Value>(m.as_str()) {
            Ok(value) => message_from_value(&value),
            Err(err) => {
                warn!(%err, object = m.as_str(), "skipping unparsable message");
                None
            }
        })
        .collect()
}

/// Reads the messages out of a generated conversation.
///
/// A reply that is a JSON array is read as such. Anything else, including
/// a broken array, falls back to picking `{...}` objects out of the text.
/// Entries without a non-empty `role` and `content` are dropped and roles
/// are lowercased.
pub fn parse_generated_messages(text: &str) -> Vec<Message> {
    let trimmed = text.trim();
    if trimmed.starts_with('[') {
        match serde_json::from_str::<Vec<Value>>(trimmed) {
            Ok(values) => return values.iter().filter_map(message_from_value).collect(),
            Err(err) => warn!(%err, "generated conversation is not a JSON array"),
        }
    }
    extract_objects(trimmed)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

/// Converts podcast messages into chat history for the next request.
///
/// The learner's messages (role equal to the lowercased `user_name`) become
/// user messages. Everyone else's become assistant messages carrying the
/// speaker inline as `{"role": "<role>", "content": "<content>"}`, so the
/// model continues in the same format. System messages are left out.
pub fn to_chat_history(messages: &[Message], user_name: &str) -> Vec<ChatMessage> {
    let user_role = user_name.to_lowercase();
    messages
        .iter()
        .filter(|m| !m.is_system())
        .map(|m| {
            if m.role == user_role {
                ChatMessage {
                    role: ChatRole::User,
                    content: m.content.clone(),
                }
            } else {
                let escaped = m.content.replace('"', "\\\"").replace('\n', "\\n");
                ChatMessage {
                    role: ChatRole::Assistant,
                    content: format!(r#"{{"role": "{}", "content": "{escaped}"}}"#, m.role),
                }
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster() -> Roster {
        let mut roster = Roster::new();
        roster.add(Participant::new("elon_musk", "Elon Musk"));
        roster.add(Participant::new("narrator_7", "Narrator"));
        roster
    }

    #[test]
    fn roster_rules() {
        let mut roster = Roster::new();
        assert_eq!(roster.user_name(), "You");
        assert!(!roster.can_start());
        assert!(matches!(
            roster.start(),
            Err(Error::NotEnoughParticipants { required: 2, actual: 1 })
        ));

        assert!(roster.add(Participant::new("tim_cook", "Tim Cook")));
        assert!(!roster.add(Participant::new("tim_cook", "Someone Else")));
        assert_eq!(roster.len(), 2);
        assert!(roster.start().is_ok());

        assert!(roster.remove(USER_ID).is_none());
        assert!(roster.user().is_some());
        assert_eq!(roster.remove("tim_cook").unwrap().name, "Tim Cook");
        assert!(roster.remove("tim_cook").is_none());
        assert!(!roster.can_start());
    }

    #[test]
    fn parse_json_array() {
        let text = r#"
            [
                {"role": "Elon Musk", "content": "Mars is next."},
                {"role": "Joe Rogan", "content": ""},
                {"content": "no speaker"},
                {"role": "JOE ROGAN", "content": "That's wild."}
            ]"#;
        assert_eq!(
            parse_generated_messages(text),
            [
                Message::new("elon musk", "Mars is next."),
                Message::new("joe rogan", "That's wild."),
            ]
        );
    }

    #[test]
    fn parse_objects_from_prose() {
        let text = r#"Sure! Here is the conversation:
            {"role": "Bill Gates", "content": "Vaccines {and} software."}
            {"role": "Tim Cook", "content": "Privacy matters.", "meta": {"tone": "calm"}}
            {broken}
            That's all."#;
        assert_eq!(
            parse_generated_messages(text),
            [
                Message::new("bill gates", "Vaccines {and} software."),
                Message::new("tim cook", "Privacy matters."),
            ]
        );
    }

    #[test]
    fn broken_array_falls_back_to_objects() {
        let text = r#"[{"role": "Tim Cook", "content": "One."}, {"role": "Elon Musk", "content": "Two."}"#;
        assert_eq!(
            parse_generated_messages(text),
            [Message::new("tim cook", "One."), Message::new("elon musk", "Two.")]
        );
        assert!(parse_generated_messages("nothing here").is_empty());
    }

    #[test]
    fn chat_history() {
        let messages = [
            Message::new("system", "Welcome to the show"),
            Message::new("elon musk", "He said \"go\"\nthen left"),
            Message::new("you", "I agree"),
        ];
        let history = to_chat_history(&messages, "You");
        assert_eq!(
            history,
            [
                ChatMessage {
                    role: ChatRole::Assistant,
                    content: r#"{"role": "elon musk", "content": "He said \"go\"\nthen left"}"#.to_string(),
                },
                ChatMessage {
                    role: ChatRole::User,
                    content: "I agree".to_string(),
                },
            ]
        );
        assert_eq!(
            serde_json::to_value(&history[1]).unwrap(),
            serde_json::json!({"role": "user", "content": "I agree"})
        );

        // the assistant content reads back as a generated message
        assert_eq!(
            parse_generated_messages(&history[0].content),
            [Message::new("elon musk", "He said \"go\"\nthen left")]
        );
    }

    #[test]
    fn voices() {
        assert_eq!(resolve_voice("joe_rogan").unwrap(), "ODq5zmih8GrVes37Dizd");
        assert_eq!(resolve_voice("21m00Tcm4TlvDq8ikWAM").unwrap(), "21m00Tcm4TlvDq8ikWAM");
        assert!(matches!(resolve_voice("user"), Err(Error::NoVoice(id)) if id == "user"));
        assert!(matches!(resolve_voice("custom"), Err(Error::NoVoice(_))));
        assert_eq!(predefined_voice(USER_ID).unwrap().id, CUSTOM_VOICE);
    }

    #[test]
    fn voice_for_message() {
        let roster = roster();
        assert_eq!(
            roster.voice_for_message(&Message::new("elon musk", "Hi")).as_deref(),
            Some("pNInz6obpgDQGcFmaJgB")
        );
        assert_eq!(
            roster.voice_for_message(&Message::new("NARRATOR", "Hi")).as_deref(),
            Some("narrator_7")
        );
        assert_eq!(roster.voice_for_message(&Message::new("you", "Hi")), None);
        assert_eq!(roster.voice_for_message(&Message::new("stranger", "Hi")), None);
    }
}
