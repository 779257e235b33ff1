use std::sync::Mutex;

use thiserror::Error;

use super::extract::build_new_word;
use super::{DictionaryError, DictionaryLookup};
use crate::storage::{FileStorage, StorageError, Word};

#[derive(Error, Debug)]
pub enum LookupError {
    #[error("Word parameter is required")]
    EmptyQuery,
    #[error(transparent)]
    Dictionary(#[from] DictionaryError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("Storage lock poisoned")]
    LockPoisoned,
}

/// Return the stored word for `query`, fetching and storing it on first use.
///
/// The storage lock is released while the dictionary request is in flight.
pub async fn lookup_word(
    storage: &Mutex<FileStorage>,
    dictionary: &dyn DictionaryLookup,
    query: &str,
) -> Result<Word, LookupError> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return Err(LookupError::EmptyQuery);
    }

    let cached = {
        let storage = storage.lock().map_err(|_| LookupError::LockPoisoned)?;
        storage.find_word(&query)?
    };
    if let Some(word) = cached {
        log::debug!("Word '{}' served from store", query);
        return Ok(word);
    }

    let entry = dictionary.lookup(&query).await?;
    let fields = build_new_word(&query, &entry, &mut rand::thread_rng());

    let storage = storage.lock().map_err(|_| LookupError::LockPoisoned)?;
    // Another request may have stored it while we were fetching
    if let Some(word) = storage.find_word(&query)? {
        return Ok(word);
    }
    let word = storage.create_word(fields)?;
    log::info!("Added word '{}' from dictionary", word.word);
    Ok(word)
}
