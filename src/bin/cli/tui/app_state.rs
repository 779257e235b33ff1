use std::sync::Arc;

use wordbook_lib::review::{Applied, Card, Outcome, ReviewCommand, ReviewSession, SessionSink};

pub struct TuiState {
    pub session: ReviewSession,
    pub group_name: String,

    /// Distinct words missed in the pass that just completed
    pub missed: Vec<Card>,

    pub flash_message: Option<String>,
    pub show_help: bool,
    pub quit: bool,
}

impl TuiState {
    pub fn new(group_name: String, cards: Vec<Card>, sink: Option<Arc<dyn SessionSink>>) -> Self {
        let session = ReviewSession::new(cards);
        let session = match sink {
            Some(sink) => session.with_sink(sink),
            None => session,
        };

        Self {
            session,
            group_name,
            missed: Vec::new(),
            flash_message: None,
            show_help: false,
            quit: false,
        }
    }

    pub fn apply(&mut self, command: ReviewCommand) {
        match command.apply(&mut self.session) {
            Applied::Judged(Outcome::Complete(result)) => {
                self.missed = self
                    .session
                    .completed()
                    .map(|completion| completion.unknown_cards())
                    .unwrap_or_default();
                self.flash_message = Some(format!(
                    "Session complete: {} of {} known",
                    result.known_count, result.total_words
                ));
            }
            Applied::Restarted => {
                self.missed.clear();
                self.flash_message =
                    Some(format!("Reviewing {} words", self.session.progress().total));
            }
            Applied::Ignored
                if command == ReviewCommand::RestartUnknown && self.session.is_complete() =>
            {
                self.flash_message = Some("No unknown words to review".to_string());
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> TuiState {
        TuiState::new(
            "Animals".to_string(),
            vec![Card::new("cat", "feline"), Card::new("dog", "canine")],
            None,
        )
    }

    #[test]
    fn test_completion_collects_missed_words() {
        let mut state = state();
        state.apply(ReviewCommand::MarkUnknown);
        state.apply(ReviewCommand::MarkKnown);
        state.apply(ReviewCommand::MarkUnknown);
        state.apply(ReviewCommand::MarkKnown);

        assert!(state.session.is_complete());
        assert_eq!(state.missed.len(), 1);
        assert_eq!(state.missed[0].word, "cat");
        assert_eq!(
            state.flash_message.as_deref(),
            Some("Session complete: 2 of 2 known")
        );

        state.apply(ReviewCommand::RestartUnknown);
        assert!(state.missed.is_empty());
        assert_eq!(state.session.progress().total, 1);
        assert_eq!(state.flash_message.as_deref(), Some("Reviewing 1 words"));
    }

    #[test]
    fn test_restart_unknown_with_nothing_missed() {
        let mut state = state();
        state.apply(ReviewCommand::MarkKnown);
        state.apply(ReviewCommand::MarkKnown);

        state.apply(ReviewCommand::RestartUnknown);
        assert!(state.session.is_complete());
        assert_eq!(state.flash_message.as_deref(), Some("No unknown words to review"));
    }
}
