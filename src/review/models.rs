//! Data models for review sessions

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single study card: the word on the front, its meaning and example on the back
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub id: Uuid,
    pub word: String,
    pub meaning: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub part_of_speech: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phonetic_uk: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phonetic_us: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_uk: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_us: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example_sentence: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example_translation: Option<String>,
}

impl Card {
    pub fn new(word: impl Into<String>, meaning: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            word: word.into(),
            meaning: meaning.into(),
            part_of_speech: None,
            phonetic_uk: None,
            phonetic_us: None,
            audio_uk: None,
            audio_us: None,
            example_sentence: None,
            example_translation: None,
        }
    }

    /// Front face: the word followed by whatever phonetics are known
    pub fn front_text(&self) -> String {
        let mut parts = vec![self.word.clone()];
        if let Some(uk) = self.phonetic_uk.as_deref().filter(|s| !s.is_empty()) {
            parts.push(format!("UK {}", uk));
        }
        if let Some(us) = self.phonetic_us.as_deref().filter(|s| !s.is_empty()) {
            parts.push(format!("US {}", us));
        }
        parts.join("  ")
    }

    /// Back face: meaning, then the example sentence on its own line
    pub fn back_text(&self) -> String {
        match self.example_sentence.as_deref().filter(|s| !s.is_empty()) {
            Some(example) => format!("{}\n\"{}\"", self.meaning, example),
            None => self.meaning.clone(),
        }
    }

    /// Pronunciation audio references that are present, labelled by accent
    pub fn audio_refs(&self) -> Vec<(&'static str, &str)> {
        [("UK", self.audio_uk.as_deref()), ("US", self.audio_us.as_deref())]
            .into_iter()
            .filter_map(|(accent, url)| url.filter(|s| !s.is_empty()).map(|s| (accent, s)))
            .collect()
    }
}

/// Phase of a review session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SessionPhase {
    /// Started with no cards; judgments are never accepted
    Empty,
    /// Cards remain in the queue
    Active,
    /// Queue drained after at least one judgment
    Complete,
}

/// Tallies for one completed pass through the queue
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResult {
    pub total_words: usize,
    pub known_count: usize,
    /// One per unknown judgment, so a card marked unknown twice counts twice
    pub unknown_count: usize,
    pub timestamp: DateTime<Utc>,
}

impl SessionResult {
    pub fn new(total_words: usize, known_count: usize, unknown_count: usize) -> Self {
        Self {
            total_words,
            known_count,
            unknown_count,
            timestamp: Utc::now(),
        }
    }
}

/// Judgments made so far against the size of the current pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Progress {
    pub reviewed: usize,
    pub total: usize,
}

impl Progress {
    /// Fraction reviewed, capped at 1.0 since repeated unknowns keep counting
    pub fn ratio(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        (self.reviewed as f64 / self.total as f64).min(1.0)
    }
}

/// What a judgment led to
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// More cards remain
    Continue,
    /// The queue drained and this result was dispatched to the sink
    Complete(SessionResult),
}
