//! Operation vocabulary shared by every input surface

use serde::{Deserialize, Serialize};

use super::models::Outcome;
use super::session::ReviewSession;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ReviewCommand {
    Flip,
    Previous,
    Next,
    MarkKnown,
    MarkUnknown,
    /// Only honoured once the session is complete
    RestartUnknown,
    /// Only honoured once the session is complete
    RestartFull,
}

/// What applying a command did to the session
#[derive(Debug, Clone, PartialEq)]
pub enum Applied {
    /// The command was not valid in the current state
    Ignored,
    /// Display state changed (flip or cursor move)
    Display,
    Judged(Outcome),
    Restarted,
}

impl ReviewCommand {
    pub fn apply(self, session: &mut ReviewSession) -> Applied {
        match self {
            Self::Flip => {
                if session.current().is_none() {
                    return Applied::Ignored;
                }
                session.flip();
                Applied::Display
            }
            Self::Previous => moved(session.previous()),
            Self::Next => moved(session.next()),
            Self::MarkKnown => session
                .mark_known()
                .map_or(Applied::Ignored, Applied::Judged),
            Self::MarkUnknown => session
                .mark_unknown()
                .map_or(Applied::Ignored, Applied::Judged),
            Self::RestartUnknown => restarted(session.restart_with_unknown_only()),
            Self::RestartFull => restarted(session.restart_full()),
        }
    }
}

fn moved(did_move: bool) -> Applied {
    if did_move {
        Applied::Display
    } else {
        Applied::Ignored
    }
}

fn restarted(did_restart: bool) -> Applied {
    if did_restart {
        Applied::Restarted
    } else {
        Applied::Ignored
    }
}
