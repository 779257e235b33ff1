use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{ApiError, ServerState};
use crate::dictionary::lookup_word;
use crate::storage::{Group, Word, WordGroup};

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddToGroupRequest {
    #[serde(default)]
    pub word_id: Option<Uuid>,
    #[serde(default)]
    pub group_id: Option<Uuid>,
}

/// A new membership together with the word and group it links
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WordGroupResponse {
    #[serde(flatten)]
    pub membership: WordGroup,
    pub word: Word,
    pub group: Group,
}

pub async fn search_word(
    State(state): State<Arc<ServerState>>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Word>, ApiError> {
    let q = query
        .q
        .filter(|q| !q.trim().is_empty())
        .ok_or_else(|| ApiError::bad_request("Word parameter is required"))?;

    let word = lookup_word(&state.storage, state.dictionary.as_ref(), &q).await?;
    Ok(Json(word))
}

pub async fn add_to_group(
    State(state): State<Arc<ServerState>>,
    body: Result<Json<AddToGroupRequest>, JsonRejection>,
) -> Result<Json<WordGroupResponse>, ApiError> {
    let Json(request) = body?;
    let (Some(word_id), Some(group_id)) = (request.word_id, request.group_id) else {
        return Err(ApiError::bad_request("Word ID and Group ID are required"));
    };

    let storage = state.storage()?;
    let membership = storage.add_word_to_group(word_id, group_id)?;
    let word = storage.get_word(word_id)?;
    let group = storage.get_group(group_id)?;

    Ok(Json(WordGroupResponse {
        membership,
        word,
        group,
    }))
}
