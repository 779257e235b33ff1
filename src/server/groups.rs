use std::sync::Arc;

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;

use super::{ApiError, MessageResponse, ServerState};
use crate::storage::{Group, GroupSummary, GroupWord};

#[derive(Debug, Default, Deserialize)]
pub struct GroupNameRequest {
    #[serde(default)]
    pub name: Option<String>,
}

impl GroupNameRequest {
    fn name(&self) -> Result<&str, ApiError> {
        match self.name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => Ok(name),
            _ => Err(ApiError::bad_request("Group name is required")),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoveWordRequest {
    #[serde(default)]
    pub word_group_id: Option<Uuid>,
}

pub async fn list_groups(
    State(state): State<Arc<ServerState>>,
) -> Result<Json<Vec<GroupSummary>>, ApiError> {
    let groups = state.storage()?.list_groups()?;
    Ok(Json(groups))
}

pub async fn create_group(
    State(state): State<Arc<ServerState>>,
    body: Result<Json<GroupNameRequest>, JsonRejection>,
) -> Result<Json<Group>, ApiError> {
    let Json(request) = body?;
    let name = request.name()?;
    let group = state.storage()?.create_group(name)?;
    Ok(Json(group))
}

pub async fn update_group(
    State(state): State<Arc<ServerState>>,
    id: Result<Path<Uuid>, PathRejection>,
    body: Result<Json<GroupNameRequest>, JsonRejection>,
) -> Result<Json<Group>, ApiError> {
    let Path(id) = id?;
    let Json(request) = body?;
    let name = request.name()?;
    let group = state.storage()?.rename_group(id, name)?;
    Ok(Json(group))
}

pub async fn delete_group(
    State(state): State<Arc<ServerState>>,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let Path(id) = id?;
    state.storage()?.delete_group(id)?;
    Ok(Json(MessageResponse::new("Group deleted successfully")))
}

pub async fn group_words(
    State(state): State<Arc<ServerState>>,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<Vec<GroupWord>>, ApiError> {
    let Path(id) = id?;
    let words = state.storage()?.group_words(id)?;
    Ok(Json(words))
}

pub async fn remove_group_word(
    State(state): State<Arc<ServerState>>,
    id: Result<Path<Uuid>, PathRejection>,
    body: Result<Json<RemoveWordRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let Path(id) = id?;
    let Json(request) = body?;
    let word_group_id = request
        .word_group_id
        .ok_or_else(|| ApiError::bad_request("Word Group ID is required"))?;
    state.storage()?.remove_word_from_group(id, word_group_id)?;
    Ok(Json(MessageResponse::new(
        "Word removed from group successfully",
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::server::test_support::test_state;
    use crate::storage::NewWord;
    use axum::http::StatusCode;

    fn named(name: &str) -> Result<Json<GroupNameRequest>, JsonRejection> {
        Ok(Json(GroupNameRequest {
            name: Some(name.to_string()),
        }))
    }

    fn path(id: Uuid) -> Result<Path<Uuid>, PathRejection> {
        Ok(Path(id))
    }

    #[tokio::test]
    async fn test_create_and_list_groups() {
        let (state, _temp) = test_state();

        let Json(group) = create_group(State(state.clone()), named(" Travel "))
            .await
            .unwrap();
        assert_eq!(group.name, "Travel");

        let Json(groups) = list_groups(State(state)).await.unwrap();
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].word_count, 0);
    }

    #[tokio::test]
    async fn test_create_group_validation() {
        let (state, _temp) = test_state();

        let err = create_group(State(state.clone()), Ok(Json(GroupNameRequest::default())))
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.message, "Group name is required");

        create_group(State(state.clone()), named("Food")).await.unwrap();
        let err = create_group(State(state), named("Food")).await.unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_update_and_delete_group() {
        let (state, _temp) = test_state();
        let Json(group) = create_group(State(state.clone()), named("Old")).await.unwrap();

        let Json(renamed) = update_group(State(state.clone()), path(group.id), named("New"))
            .await
            .unwrap();
        assert_eq!(renamed.name, "New");

        let err = update_group(State(state.clone()), path(Uuid::new_v4()), named("Other"))
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::NOT_FOUND);

        delete_group(State(state.clone()), path(group.id)).await.unwrap();
        let Json(groups) = list_groups(State(state)).await.unwrap();
        assert!(groups.is_empty());
    }

    #[tokio::test]
    async fn test_group_words_and_removal() {
        let (state, _temp) = test_state();
        let (group, membership) = {
            let storage = state.storage.lock().unwrap();
            let group = storage.create_group("Nouns").unwrap();
            let word = storage
                .create_word(NewWord {
                    word: "table".to_string(),
                    meaning: "a piece of furniture".to_string(),
                    ..Default::default()
                })
                .unwrap();
            let membership = storage.add_word_to_group(word.id, group.id).unwrap();
            (group, membership)
        };

        let Json(words) = group_words(State(state.clone()), path(group.id)).await.unwrap();
        assert_eq!(words.len(), 1);
        assert_eq!(words[0].word.word, "table");
        assert_eq!(words[0].word_group_id, membership.id);

        let err = remove_group_word(
            State(state.clone()),
            path(group.id),
            Ok(Json(RemoveWordRequest::default())),
        )
        .await
        .unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);

        remove_group_word(
            State(state.clone()),
            path(group.id),
            Ok(Json(RemoveWordRequest {
                word_group_id: Some(membership.id),
            })),
        )
        .await
        .unwrap();

        let Json(words) = group_words(State(state), path(group.id)).await.unwrap();
        assert!(words.is_empty());
    }
}
