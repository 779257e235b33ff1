//! Review session state machine
//!
//! A session drills a fixed list of cards. The head of the queue is the
//! current card. Marking it known removes it for the rest of the pass;
//! marking it unknown rotates it to the tail so it comes back later in the
//! same pass. When the queue drains the session becomes complete, the
//! tallies go to the sink once, and the caller may restart with either the
//! unknown cards or the full list.
//!
//! Judgments are only reachable through [`Judgement`], which exists only
//! while a current card does, and restarts only through [`Completion`],
//! which exists only once the session is complete.

use std::collections::{HashSet, VecDeque};
use std::sync::Arc;

use super::models::{Card, Outcome, Progress, SessionPhase, SessionResult};
use super::sink::SessionSink;

pub struct ReviewSession {
    /// Input list, kept for full restarts
    cards: Vec<Card>,
    queue: VecDeque<Card>,
    known: Vec<Card>,
    unknown: Vec<Card>,
    /// Number of cards the current pass started with
    pass_size: usize,
    /// Browsing cursor into the queue, independent of the head
    cursor: usize,
    flipped: bool,
    phase: SessionPhase,
    result: Option<SessionResult>,
    sink: Option<Arc<dyn SessionSink>>,
}

impl ReviewSession {
    pub fn new(cards: Vec<Card>) -> Self {
        let phase = if cards.is_empty() {
            SessionPhase::Empty
        } else {
            SessionPhase::Active
        };

        Self {
            queue: cards.iter().cloned().collect(),
            pass_size: cards.len(),
            cards,
            known: Vec::new(),
            unknown: Vec::new(),
            cursor: 0,
            flipped: false,
            phase,
            result: None,
            sink: None,
        }
    }

    /// Attach the sink that receives the tallies of each completed pass
    pub fn with_sink(mut self, sink: Arc<dyn SessionSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    // ==================== Queries ====================

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn is_complete(&self) -> bool {
        self.phase == SessionPhase::Complete
    }

    /// Card at the head of the queue
    pub fn current(&self) -> Option<&Card> {
        self.queue.front()
    }

    /// Card under the browsing cursor
    pub fn browsed(&self) -> Option<&Card> {
        self.queue.get(self.cursor)
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_flipped(&self) -> bool {
        self.flipped
    }

    pub fn queue(&self) -> &VecDeque<Card> {
        &self.queue
    }

    pub fn known(&self) -> &[Card] {
        &self.known
    }

    pub fn unknown(&self) -> &[Card] {
        &self.unknown
    }

    /// The list the session was created with
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn progress(&self) -> Progress {
        Progress {
            reviewed: self.known.len() + self.unknown.len(),
            total: self.pass_size,
        }
    }

    /// Tallies of the pass that just completed
    pub fn result(&self) -> Option<&SessionResult> {
        self.result.as_ref()
    }

    // ==================== Display ====================

    pub fn flip(&mut self) {
        self.flipped = !self.flipped;
    }

    /// Move the cursor back one card. Returns false at the first card.
    pub fn previous(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        self.flipped = false;
        true
    }

    /// Move the cursor forward one card. Returns false at the last card.
    pub fn next(&mut self) -> bool {
        if self.cursor + 1 >= self.queue.len() {
            return false;
        }
        self.cursor += 1;
        self.flipped = false;
        true
    }

    // ==================== Judgments ====================

    /// Handle for judging the current card; `None` unless the session is
    /// active with a card at the head of the queue.
    pub fn judge(&mut self) -> Option<Judgement<'_>> {
        if self.phase != SessionPhase::Active || self.queue.is_empty() {
            return None;
        }
        Some(Judgement { session: self })
    }

    pub fn mark_known(&mut self) -> Option<Outcome> {
        self.judge().map(Judgement::known)
    }

    pub fn mark_unknown(&mut self) -> Option<Outcome> {
        self.judge().map(Judgement::unknown)
    }

    fn check_completion(&mut self) -> Outcome {
        if !self.queue.is_empty() || (self.known.is_empty() && self.unknown.is_empty()) {
            return Outcome::Continue;
        }

        let result = SessionResult::new(self.pass_size, self.known.len(), self.unknown.len());
        self.phase = SessionPhase::Complete;
        self.result = Some(result.clone());

        log::info!(
            "Review session complete: {} words, {} known, {} unknown",
            result.total_words,
            result.known_count,
            result.unknown_count
        );

        // The transition above already happened; a failed write cannot undo it.
        if let Some(sink) = &self.sink {
            if let Err(e) = sink.record_session(&result) {
                log::warn!("Failed to record review session: {}", e);
            }
        }

        Outcome::Complete(result)
    }

    fn clamp_cursor(&mut self) {
        let last = self.queue.len().saturating_sub(1);
        if self.cursor > last {
            self.cursor = last;
        }
    }

    // ==================== Restarts ====================

    /// Handle for restarting; `None` unless the session is complete
    pub fn completed(&mut self) -> Option<Completion<'_>> {
        if self.phase != SessionPhase::Complete {
            return None;
        }
        let result = self.result.clone()?;
        Some(Completion {
            session: self,
            result,
        })
    }

    pub fn restart_with_unknown_only(&mut self) -> bool {
        self.completed()
            .map_or(false, Completion::restart_with_unknown_only)
    }

    pub fn restart_full(&mut self) -> bool {
        self.completed().map_or(false, |c| {
            c.restart_full();
            true
        })
    }

    fn start_pass(&mut self, queue: VecDeque<Card>) {
        self.pass_size = queue.len();
        self.queue = queue;
        self.known.clear();
        self.unknown.clear();
        self.cursor = 0;
        self.flipped = false;
        self.result = None;
        self.phase = SessionPhase::Active;
    }
}

/// Permission to judge the card at the head of the queue
pub struct Judgement<'a> {
    session: &'a mut ReviewSession,
}

impl<'a> Judgement<'a> {
    /// The card being judged
    pub fn card(&self) -> &Card {
        &self.session.queue[0]
    }

    /// Remove the card from the queue for the rest of the pass
    pub fn known(self) -> Outcome {
        let session = self.session;
        if let Some(card) = session.queue.pop_front() {
            session.known.push(card);
        }
        session.flipped = false;
        session.clamp_cursor();
        session.check_completion()
    }

    /// Send the card to the back of the queue and tally it
    pub fn unknown(self) -> Outcome {
        let session = self.session;
        if let Some(card) = session.queue.pop_front() {
            session.unknown.push(card.clone());
            session.queue.push_back(card);
        }
        session.flipped = false;
        session.check_completion()
    }
}

/// Access to a completed session's result and restarts
pub struct Completion<'a> {
    session: &'a mut ReviewSession,
    result: SessionResult,
}

impl<'a> Completion<'a> {
    pub fn result(&self) -> &SessionResult {
        &self.result
    }

    /// Distinct cards marked unknown during the pass, in first-marked order
    pub fn unknown_cards(&self) -> Vec<Card> {
        let mut seen = HashSet::new();
        self.session
            .unknown
            .iter()
            .filter(|card| seen.insert(card.id))
            .cloned()
            .collect()
    }

    /// Start a new pass over the unknown cards. Returns false, leaving the
    /// session complete, when nothing was marked unknown.
    pub fn restart_with_unknown_only(self) -> bool {
        let cards = self.unknown_cards();
        if cards.is_empty() {
            return false;
        }
        log::debug!("Restarting review with {} unknown cards", cards.len());
        self.session.start_pass(cards.into());
        true
    }

    /// Start a new pass over the original list
    pub fn restart_full(self) {
        let cards: VecDeque<Card> = self.session.cards.iter().cloned().collect();
        log::debug!("Restarting review with all {} cards", cards.len());
        self.session.start_pass(cards);
    }
}
