//! HTTP API for words, groups and review sessions.
//!
//! Mirrors the routes a browser front end uses: word search backed by the
//! dictionary, group management, group word listings and session history.

mod error;
mod groups;
mod sessions;
mod words;

use std::net::SocketAddr;
use std::sync::{Arc, Mutex, MutexGuard};

use axum::routing::{get, post, put};
use axum::Router;
use serde::Serialize;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tower_http::cors::CorsLayer;

use crate::config::ServerConfig;
use crate::dictionary::DictionaryLookup;
use crate::storage::FileStorage;

pub use error::ApiError;

/// Server state shared across requests.
pub struct ServerState {
    pub storage: Arc<Mutex<FileStorage>>,
    pub dictionary: Arc<dyn DictionaryLookup>,
}

impl ServerState {
    pub fn new(storage: Arc<Mutex<FileStorage>>, dictionary: Arc<dyn DictionaryLookup>) -> Self {
        Self {
            storage,
            dictionary,
        }
    }

    fn storage(&self) -> Result<MutexGuard<'_, FileStorage>, ApiError> {
        self.storage
            .lock()
            .map_err(|_| ApiError::internal("Storage lock poisoned"))
    }
}

/// Body of confirmation responses
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
        }
    }
}

pub fn router(state: Arc<ServerState>, cors: bool) -> Router {
    let app = Router::new()
        .route("/api/words/search", get(words::search_word))
        .route("/api/words/add-to-group", post(words::add_to_group))
        .route(
            "/api/groups",
            get(groups::list_groups).post(groups::create_group),
        )
        .route(
            "/api/groups/{id}",
            put(groups::update_group).delete(groups::delete_group),
        )
        .route(
            "/api/groups/{id}/words",
            get(groups::group_words).delete(groups::remove_group_word),
        )
        .route(
            "/api/flashcards/sessions",
            get(sessions::list_sessions).post(sessions::create_session),
        )
        .with_state(state);

    if cors {
        app.layer(CorsLayer::permissive())
    } else {
        app
    }
}

/// Handle for a running server.
pub struct WordbookServer {
    /// Address the server is listening on.
    pub addr: SocketAddr,
    /// Shutdown signal sender.
    shutdown_tx: Option<oneshot::Sender<()>>,
    task: Option<tokio::task::JoinHandle<()>>,
}

impl WordbookServer {
    pub fn port(&self) -> u16 {
        self.addr.port()
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Stop the server gracefully and wait for in-flight requests.
    pub async fn stop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        if let Some(task) = self.task.take() {
            let _ = task.await;
        }
    }
}

/// Start the API server on the configured address.
pub async fn start_server(
    config: &ServerConfig,
    state: ServerState,
) -> Result<WordbookServer, Box<dyn std::error::Error + Send + Sync>> {
    let app = router(Arc::new(state), config.cors);

    let listener = TcpListener::bind(&config.bind).await?;
    let addr = listener.local_addr()?;

    log::info!("Wordbook API listening on http://{}", addr);

    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

    let task = tokio::spawn(async move {
        let result = axum::serve(listener, app)
            .with_graceful_shutdown(async {
                let _ = shutdown_rx.await;
                log::info!("Wordbook API shutting down");
            })
            .await;
        if let Err(e) = result {
            log::error!("Server error: {}", e);
        }
    });

    Ok(WordbookServer {
        addr,
        shutdown_tx: Some(shutdown_tx),
        task: Some(task),
    })
}


#[cfg(test)]
mod tests {
    use super::test_support::test_state;
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Method, Request, StatusCode};
    use serde_json::Value;
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_start_and_stop_server() {
        let (state, _temp) = test_state();
        let state = ServerState::new(Arc::clone(&state.storage), Arc::clone(&state.dictionary));
        let config = ServerConfig {
            bind: "127.0.0.1:0".to_string(),
            cors: false,
        };

        let mut server = start_server(&config, state).await.unwrap();
        assert_ne!(server.port(), 0);
        assert!(server.base_url().starts_with("http://127.0.0.1:"));

        server.stop().await;
    }

    async fn send(
        state: Arc<ServerState>,
        method: Method,
        uri: &str,
        body: &str,
    ) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        let response = router(state, false).oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_malformed_id_is_json_error() {
        let (state, _temp) = test_state();

        let (status, body) = send(
            state.clone(),
            Method::PUT,
            "/api/groups/not-a-uuid",
            r#"{"name":"Food"}"#,
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());

        let (status, body) = send(state, Method::GET, "/api/groups/42/words", "").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn test_malformed_body_is_json_error() {
        let (state, _temp) = test_state();

        let (status, body) = send(
            state.clone(),
            Method::POST,
            "/api/flashcards/sessions",
            r#"{"knownWords":1}"#,
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("totalWords"));

        let (status, body) = send(state.clone(), Method::POST, "/api/groups", "{").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());

        let (status, body) = send(
            state.clone(),
            Method::POST,
            "/api/words/add-to-group",
            r#"{"wordId":"nope","groupId":"nope"}"#,
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());

        let unknown = format!(
            r#"{{"wordId":"{}","groupId":"{}"}}"#,
            uuid::Uuid::new_v4(),
            uuid::Uuid::new_v4()
        );
        let (status, body) = send(state, Method::POST, "/api/words/add-to-group", &unknown).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body["error"].as_str().unwrap().contains("not found"));
    }
}
