//! Destinations for completed session tallies
//!
//! The engine hands each [`SessionResult`] to a [`SessionSink`] exactly once
//! per completion and never looks at the outcome beyond logging it. Wrap a
//! sink in [`BackgroundSink`] to keep the write off the caller's thread.

use std::sync::{Arc, Mutex, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

use super::models::SessionResult;
use crate::storage::{FileStorage, NewSession, StorageError};

#[derive(Error, Debug)]
pub enum SinkError {
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Server rejected session: {status}")]
    Rejected { status: u16 },

    #[error("Storage lock poisoned")]
    LockPoisoned,
}

pub type Result<T> = std::result::Result<T, SinkError>;

/// Receives the tallies of a completed session
pub trait SessionSink: Send + Sync {
    fn record_session(&self, result: &SessionResult) -> Result<()>;
}

/// Writes sessions straight into the local word store
pub struct StorageSink {
    storage: Arc<Mutex<FileStorage>>,
    group_id: Option<Uuid>,
}

impl StorageSink {
    pub fn new(storage: Arc<Mutex<FileStorage>>, group_id: Option<Uuid>) -> Self {
        Self { storage, group_id }
    }
}

impl SessionSink for StorageSink {
    fn record_session(&self, result: &SessionResult) -> Result<()> {
        let storage = self.storage.lock().map_err(|_| SinkError::LockPoisoned)?;
        let session = storage.record_session(NewSession::from_result(self.group_id, result))?;
        log::debug!("Stored session {} ({} words)", session.id, session.total_words);
        Ok(())
    }
}

/// Body accepted by `POST /api/flashcards/sessions`
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SessionPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    group_id: Option<Uuid>,
    total_words: usize,
    known_words: usize,
    unknown_words: usize,
    created_at: DateTime<Utc>,
}

/// Posts sessions to a running wordbook server
pub struct HttpSink {
    client: reqwest::blocking::Client,
    endpoint: String,
    group_id: Option<Uuid>,
}

impl HttpSink {
    pub fn new(endpoint: impl Into<String>, group_id: Option<Uuid>) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
            group_id,
        })
    }
}

impl SessionSink for HttpSink {
    fn record_session(&self, result: &SessionResult) -> Result<()> {
        let payload = SessionPayload {
            group_id: self.group_id,
            total_words: result.total_words,
            known_words: result.known_count,
            unknown_words: result.unknown_count,
            created_at: result.timestamp,
        };

        let response = self.client.post(&self.endpoint).json(&payload).send()?;
        if !response.status().is_success() {
            return Err(SinkError::Rejected {
                status: response.status().as_u16(),
            });
        }
        Ok(())
    }
}

/// Runs the inner sink on a spawned thread and returns immediately.
///
/// Failures surface only as a warning in the log. Call [`flush`] before the
/// process exits so pending writes are not cut off.
///
/// [`flush`]: BackgroundSink::flush
pub struct BackgroundSink {
    inner: Arc<dyn SessionSink>,
    pending: Mutex<Vec<JoinHandle<()>>>,
}

impl BackgroundSink {
    pub fn new(inner: impl SessionSink + 'static) -> Self {
        Self {
            inner: Arc::new(inner),
            pending: Mutex::new(Vec::new()),
        }
    }

    /// Wait up to `timeout` for pending writes. Returns false if some are
    /// still running when the time is up.
    pub fn flush(&self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        let mut pending = self.pending.lock().unwrap_or_else(PoisonError::into_inner);

        loop {
            pending.retain(|handle| !handle.is_finished());
            if pending.is_empty() {
                return true;
            }
            if Instant::now() >= deadline {
                log::warn!(
                    "{} review session write(s) still running after {:?}",
                    pending.len(),
                    timeout
                );
                return false;
            }
            thread::sleep(FLUSH_POLL);
        }
    }
}

const FLUSH_POLL: Duration = Duration::from_millis(20);

impl SessionSink for BackgroundSink {
    fn record_session(&self, result: &SessionResult) -> Result<()> {
        let inner = Arc::clone(&self.inner);
        let result = result.clone();
        let handle = thread::spawn(move || {
            if let Err(e) = inner.record_session(&result) {
                log::warn!("Failed to save review session: {}", e);
            }
        });

        let mut pending = self.pending.lock().unwrap_or_else(PoisonError::into_inner);
        pending.retain(|handle| !handle.is_finished());
        pending.push(handle);
        Ok(())
    }
}
