//! Flashcard review sessions for Wordbook
//!
//! This module provides:
//! - The session-local spaced repetition engine (known cards leave the
//!   queue, unknown cards go to the back of it)
//! - The command vocabulary input surfaces translate their events into
//! - Sinks that receive the tallies of each completed session

pub mod command;
pub mod models;
pub mod session;
pub mod sink;

pub use command::{Applied, ReviewCommand};
pub use models::*;
pub use session::{Completion, Judgement, ReviewSession};
pub use sink::{BackgroundSink, HttpSink, SessionSink, SinkError, StorageSink};
