//! Word store for Wordbook
//!
//! Plain JSON files holding looked-up words, study groups, group
//! memberships and completed review sessions.

mod file_storage;
mod models;

pub use file_storage::{FileStorage, Result, StorageError};
pub use models::*;
