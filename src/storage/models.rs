//! Data models for the word store

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::review::{Card, SessionResult};

/// A dictionary word saved by a search
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Word {
    pub id: Uuid,
    /// Always stored lowercased
    pub word: String,
    pub meaning: String,
    #[serde(default)]
    pub phonetic_uk: String,
    #[serde(default)]
    pub phonetic_us: String,
    #[serde(default)]
    pub audio_uk: String,
    #[serde(default)]
    pub audio_us: String,
    #[serde(default)]
    pub example_sentence: String,
    #[serde(default)]
    pub example_translation: String,
    #[serde(default)]
    pub part_of_speech: String,
    pub created_at: DateTime<Utc>,
}

/// Fields for a word about to be stored
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewWord {
    pub word: String,
    pub meaning: String,
    pub phonetic_uk: String,
    pub phonetic_us: String,
    pub audio_uk: String,
    pub audio_us: String,
    pub example_sentence: String,
    pub example_translation: String,
    pub part_of_speech: String,
}

impl Word {
    pub fn new(fields: NewWord) -> Self {
        Self {
            id: Uuid::new_v4(),
            word: fields.word.to_lowercase(),
            meaning: fields.meaning,
            phonetic_uk: fields.phonetic_uk,
            phonetic_us: fields.phonetic_us,
            audio_uk: fields.audio_uk,
            audio_us: fields.audio_us,
            example_sentence: fields.example_sentence,
            example_translation: fields.example_translation,
            part_of_speech: fields.part_of_speech,
            created_at: Utc::now(),
        }
    }
}

/// A named study group
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Group {
    pub fn new(name: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name,
            created_at: now,
            updated_at: now,
        }
    }
}

/// A group together with how many words it holds
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupSummary {
    #[serde(flatten)]
    pub group: Group,
    pub word_count: usize,
}

/// Membership of a word in a group
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WordGroup {
    pub id: Uuid,
    pub word_id: Uuid,
    pub group_id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl WordGroup {
    pub fn new(word_id: Uuid, group_id: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            word_id,
            group_id,
            created_at: Utc::now(),
        }
    }
}

/// A word as listed inside a group
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupWord {
    #[serde(flatten)]
    pub word: Word,
    pub word_group_id: Uuid,
    pub added_at: DateTime<Utc>,
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

impl From<Word> for Card {
    fn from(word: Word) -> Self {
        Card {
            id: word.id,
            word: word.word,
            meaning: word.meaning,
            part_of_speech: non_empty(word.part_of_speech),
            phonetic_uk: non_empty(word.phonetic_uk),
            phonetic_us: non_empty(word.phonetic_us),
            audio_uk: non_empty(word.audio_uk),
            audio_us: non_empty(word.audio_us),
            example_sentence: non_empty(word.example_sentence),
            example_translation: non_empty(word.example_translation),
        }
    }
}

impl From<GroupWord> for Card {
    fn from(entry: GroupWord) -> Self {
        entry.word.into()
    }
}

/// A saved review session
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlashcardSession {
    pub id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_id: Option<Uuid>,
    pub total_words: usize,
    pub known_words: usize,
    pub unknown_words: usize,
    pub created_at: DateTime<Utc>,
}

/// Tallies for a session about to be stored
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSession {
    #[serde(default)]
    pub group_id: Option<Uuid>,
    pub total_words: usize,
    pub known_words: usize,
    pub unknown_words: usize,
    /// When the session finished; the write time when absent
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl NewSession {
    pub fn from_result(group_id: Option<Uuid>, result: &SessionResult) -> Self {
        Self {
            group_id,
            total_words: result.total_words,
            known_words: result.known_count,
            unknown_words: result.unknown_count,
            created_at: Some(result.timestamp),
        }
    }
}

impl FlashcardSession {
    pub fn new(fields: NewSession) -> Self {
        Self {
            id: Uuid::new_v4(),
            group_id: fields.group_id,
            total_words: fields.total_words,
            known_words: fields.known_words,
            unknown_words: fields.unknown_words,
            created_at: fields.created_at.unwrap_or_else(Utc::now),
        }
    }
}
