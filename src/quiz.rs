//! Bookkeeping for quiz questions: option selection, checking selected
//! options and grading spoken answers of pronunciation questions.

use serde::Deserialize;

use crate::grade::{MatchOutcome, Matcher};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QuestionType {
    /// pick every synonym (or antonym) of the highlighted word
    Synonyms,
    /// pick the one correct option
    CorrectWord,
    /// say the highlighted word
    Pronunciation,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    #[serde(rename = "type")]
    pub kind: QuestionType,
    pub question: String,
    pub content: String,
    #[serde(default)]
    pub highlighted_word: String,
    #[serde(default)]
    pub options: Vec<String>,
    pub correct_answers: Vec<String>,
    #[serde(default)]
    pub explanation: String,
}

impl Question {
    pub fn is_multi_select(&self) -> bool {
        self.kind == QuestionType::Synonyms
    }

    pub fn is_correct_option(&self, option: &str) -> bool {
        self.correct_answers.iter().any(|answer| answer == option)
    }

    /// All selected options are correct and none is missing.
    pub fn all_selections_correct<S: AsRef<str>>(&self, selected: &[S]) -> bool {
        selected.len() == self.correct_answers.len()
            && selected.iter().all(|option| self.is_correct_option(option.as_ref()))
    }

    /// Toggles `option` in `selected`, allowing as many selections as the
    /// question has correct answers.
    pub fn toggle_option(&self, selected: &[String], option: &str) -> Vec<String> {
        update_selected_options(selected, option, self.correct_answers.len(), self.is_multi_select())
    }

    /// The phrase a spoken answer is compared with: the highlighted word of
    /// pronunciation questions, otherwise the first correct answer.
    pub fn pronunciation_target(&self) -> &str {
        match self.kind {
            QuestionType::Pronunciation => self.highlighted_word.as_str(),
            _ => self.correct_answers.first().map_or("", String::as_str),
        }
    }

    /// Grades a speech transcript. An empty transcript means nothing was
    /// recognized and is not graded at all.
    pub fn grade_spoken(&self, transcript: &str, matcher: &Matcher) -> Option<MatchOutcome> {
        if transcript.is_empty() {
            return None;
        }
        Some(matcher.grade(transcript, self.pronunciation_target()))
    }
}

/// Selecting an already selected option deselects it. Multi-select
/// questions add options until `max_selections` is reached, single select
/// questions replace the selection.
pub fn update_selected_options(
    selected: &[String],
    option: &str,
    max_selections: usize,
    multi_select: bool,
) -> Vec<String> {
    if selected.iter().any(|s| s == option) {
        return selected.iter().filter(|s| *s != option).cloned().collect();
    }

    if !multi_select {
        return vec![option.to_string()];
    }

    let mut updated = selected.to_vec();
    if updated.len() < max_selections {
        updated.push(option.to_string());
    }
    updated
}
