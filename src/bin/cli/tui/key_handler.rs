use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use wordbook_lib::review::ReviewCommand;

use super::app_state::TuiState;

/// Review command bound to a key, given whether the session is complete
pub fn command_for_key(key: &KeyEvent, complete: bool) -> Option<ReviewCommand> {
    if complete {
        return match key.code {
            KeyCode::Char('r') => Some(ReviewCommand::RestartUnknown),
            KeyCode::Char('n') => Some(ReviewCommand::RestartFull),
            _ => None,
        };
    }

    match key.code {
        KeyCode::Char(' ') | KeyCode::Enter => Some(ReviewCommand::Flip),
        KeyCode::Left | KeyCode::Char('h') => Some(ReviewCommand::Previous),
        KeyCode::Right | KeyCode::Char('l') => Some(ReviewCommand::Next),
        KeyCode::Char('k') => Some(ReviewCommand::MarkKnown),
        KeyCode::Char('u') => Some(ReviewCommand::MarkUnknown),
        _ => None,
    }
}

pub fn handle_key(state: &mut TuiState, key: KeyEvent) {
    // Clear flash message on any keypress
    state.flash_message = None;

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        state.quit = true;
        return;
    }

    if state.show_help {
        // Any key closes the help overlay
        state.show_help = false;
        return;
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => state.quit = true,
        KeyCode::Char('?') => state.show_help = true,
        _ => {
            if let Some(command) = command_for_key(&key, state.session.is_complete()) {
                state.apply(command);
            }
        }
    }
}
