use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{Method, StatusCode},
    routing::{get, put},
    Json, Router,
};
use models::Record;
use serde_json::json;
use tokio::sync::Mutex;
use tower_http::cors::{Any, CorsLayer};

use crate::directory::{Directory, DirectoryError};
use crate::error::ApiError;

/// Shared state for the directory HTTP API.
///
/// One mutex guards the list and its file, so each request that touches the
/// collection runs to completion, write included, before the next one starts.
#[derive(Clone)]
pub struct AppState {
    directory: Arc<Mutex<Directory>>,
}

impl AppState {
    pub fn new(directory: Directory) -> Self {
        Self {
            directory: Arc::new(Mutex::new(directory)),
        }
    }

    pub fn directory(&self) -> &Mutex<Directory> {
        &self.directory
    }

    /// Run a mutation on the blocking pool while holding the lock, since
    /// every mutation rewrites the store file.
    async fn mutate<T, F>(&self, op: F) -> Result<T, ApiError>
    where
        T: Send + 'static,
        F: FnOnce(&mut Directory) -> Result<T, DirectoryError> + Send + 'static,
    {
        let mut directory = self.directory.clone().lock_owned().await;
        let result = tokio::task::spawn_blocking(move || op(&mut *directory)).await?;
        Ok(result?)
    }
}

/// Lightweight health probe used by readiness checks.
async fn health() -> Json<serde_json::Value> {
    Json(json!({"status":"ok"}))
}

/// Full user list in stored order.
async fn list_users(State(state): State<AppState>) -> Json<Vec<Record>> {
    Json(state.directory().lock().await.users().to_vec())
}

/// Append the body as a new record, whatever fields it carries.
async fn create_user(
    State(state): State<AppState>,
    Json(record): Json<Record>,
) -> Result<(StatusCode, Json<Record>), ApiError> {
    let created = state.mutate(move |d| d.create(record)).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Replace the first record with this id by the body, id included.
async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(record): Json<Record>,
) -> Result<Json<Record>, ApiError> {
    let updated = state.mutate(move |d| d.update(&id, record)).await?;
    Ok(Json(updated))
}

/// Drop every record with this id; succeeds even when none match.
async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.mutate(move |d| d.delete(&id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Assemble the API with permissive CORS so a client on any origin can call it.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        .route("/users", get(list_users).post(create_user))
        .route("/users/:id", put(update_user).delete(delete_user))
        .layer(cors)
        .with_state(state)
}
