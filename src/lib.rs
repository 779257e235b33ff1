//! Wordbook: look up English words, collect them into study groups and
//! drill them with flashcard review sessions.

pub mod config;
pub mod dictionary;
pub mod review;
pub mod server;
pub mod storage;

pub use config::Config;
