//! HTTP surface over the item store.
//!
//! API endpoints:
//! - POST   /api/items                           - Create (JSON body)
//! - GET    /api/items                           - List all items
//! - GET    /api/items/create?id=&name=&desc=    - Create from query parameters
//! - GET    /api/items/search?name=              - Exact-name search
//! - GET    /api/items/info                      - Backend diagnostics
//! - GET    /api/items/{id}                      - Get one item
//! - PUT    /api/items/{id}                      - Update name/description
//! - DELETE /api/items/{id}                      - Delete

use std::collections::HashMap;
use std::sync::Arc;

use anyhow::Result;
use axum::{
    Json, Router,
    body::Bytes,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use itemkv::{Diagnostics, ItemStore, StoreError};
use serde_json::{Value, json};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use crate::codec;

/// Shared handler state. The store is constructed once at startup.
#[derive(Clone)]
pub struct AppState {
    store: Arc<ItemStore>,
    diagnostics: Arc<Diagnostics>,
}

impl AppState {
    pub fn new(store: Arc<ItemStore>, diagnostics: Diagnostics) -> Self {
        Self {
            store,
            diagnostics: Arc::new(diagnostics),
        }
    }
}

/// Build the router for the item API.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/items", get(list_items).post(create_item))
        .route("/api/items/create", get(create_item_from_query))
        .route("/api/items/search", get(search_items))
        .route("/api/items/info", get(info))
        .route(
            "/api/items/{id}",
            get(get_item).put(update_item).delete(delete_item),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serve the API on `listener` until Ctrl-C.
pub async fn serve(listener: TcpListener, state: AppState) -> Result<()> {
    let addr = listener.local_addr()?;
    info!("Server started at http://{}", addr);
    info!("  - POST   /api/items");
    info!("  - GET    /api/items");
    info!("  - GET    /api/items/create?id=&name=&desc=");
    info!("  - GET    /api/items/search?name=");
    info!("  - GET    /api/items/info");
    info!("  - GET    /api/items/{{id}}");
    info!("  - PUT    /api/items/{{id}}");
    info!("  - DELETE /api/items/{{id}}");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutting down");
}

/// Store error mapped to an HTTP status and a JSON `{"error": ...}` body.
#[derive(Debug)]
pub struct ApiError(StoreError);

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        Self(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            StoreError::InvalidArgument(_) => StatusCode::BAD_REQUEST,
            StoreError::NotFound(_) => StatusCode::NOT_FOUND,
            StoreError::AlreadyExists(_) => StatusCode::CONFLICT,
            StoreError::InternalConsistency(_) | StoreError::Backend(_) => {
                error!(error = %self.0, "request failed");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        (status, Json(json!({ "error": self.0.to_string() }))).into_response()
    }
}

type ApiResult<T> = std::result::Result<T, ApiError>;

async fn create_item(
    State(state): State<AppState>,
    body: Bytes,
) -> ApiResult<(StatusCode, Json<Value>)> {
    let new = codec::decode_create_body(&body)?;
    let item = state.store.create(new)?;
    Ok((StatusCode::CREATED, Json(codec::encode_item(&item))))
}

async fn create_item_from_query(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> ApiResult<(StatusCode, Json<Value>)> {
    let new = codec::decode_create_query(&params)?;
    let item = state.store.create(new)?;
    Ok((StatusCode::CREATED, Json(codec::encode_item(&item))))
}

async fn get_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Value>> {
    let item = state.store.get(&id)?;
    Ok(Json(codec::encode_item(&item)))
}

async fn search_items(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> ApiResult<Json<Value>> {
    let items = match params.get("name") {
        Some(name) => state.store.search_by_name(name)?,
        None => Vec::new(),
    };
    Ok(Json(codec::encode_items(&items)))
}

async fn update_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Bytes,
) -> ApiResult<Json<Value>> {
    // An unknown id is reported as 404 even when the body is also invalid.
    let patch = match codec::decode_update_body(&body) {
        Ok(patch) => patch,
        Err(e) => {
            state.store.get(&id)?;
            return Err(e.into());
        }
    };
    let item = state.store.update(&id, &patch.name, &patch.description)?;
    Ok(Json(codec::encode_item(&item)))
}

async fn delete_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    state.store.delete(&id)?;
    Ok(StatusCode::NO_CONTENT)
}

async fn list_items(State(state): State<AppState>) -> Json<Value> {
    Json(codec::encode_items(&state.store.list_all()))
}

async fn info(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.diagnostics.report())
}
