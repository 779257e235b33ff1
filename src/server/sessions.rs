use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;

use super::{ApiError, ServerState};
use crate::storage::{FlashcardSession, NewSession};

/// Number of sessions returned by the history listing
const RECENT_SESSIONS: usize = 10;

pub async fn create_session(
    State(state): State<Arc<ServerState>>,
    body: Result<Json<NewSession>, JsonRejection>,
) -> Result<Json<FlashcardSession>, ApiError> {
    let Json(request) = body?;
    let session = state.storage()?.record_session(request)?;
    log::info!(
        "Saved review session: {}/{} known, {} unknown",
        session.known_words,
        session.total_words,
        session.unknown_words
    );
    Ok(Json(session))
}

pub async fn list_sessions(
    State(state): State<Arc<ServerState>>,
) -> Result<Json<Vec<FlashcardSession>>, ApiError> {
    let sessions = state.storage()?.recent_sessions(RECENT_SESSIONS)?;
    Ok(Json(sessions))
}
