//! English dictionary lookups
//!
//! Provides:
//! - A client for the free dictionary API
//! - Extraction of phonetics, meaning and example from its entries
//! - Cached lookups that store each new word in the word store

mod client;
pub mod extract;
mod lookup;
mod models;

use async_trait::async_trait;

pub use client::{DictionaryClient, DictionaryError, DEFAULT_BASE_URL};
pub use lookup::{lookup_word, LookupError};
pub use models::*;

/// Source of dictionary entries
#[async_trait]
pub trait DictionaryLookup: Send + Sync {
    async fn lookup(&self, word: &str) -> Result<DictionaryEntry, DictionaryError>;
}
