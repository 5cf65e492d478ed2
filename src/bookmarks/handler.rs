//! HTTP Handlers for the Bookmarks API

use axum::{
    Json,
    extract::{Path, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::Value as JsonValue;

use super::{Bookmark, Bookmarks, CreateBookmark, UpdateBookmark, validate_create, validate_update};
use crate::handler::AppState;
use crate::{config::Environment, unpack_error};

// ============================================================================
// Response Types
// ============================================================================

#[derive(Debug, Serialize)]
struct ErrorBody {
    message: String,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: ErrorBody,
}

fn success<T: Serialize>(data: T) -> Response {
    (StatusCode::OK, Json(data)).into_response()
}

fn created_at(location: String, data: impl Serialize) -> Response {
    (
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(data),
    )
        .into_response()
}

fn no_content() -> Response {
    StatusCode::NO_CONTENT.into_response()
}

fn not_found(msg: &str) -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse {
            error: ErrorBody {
                message: msg.to_string(),
            },
        }),
    )
        .into_response()
}

fn bad_request(msg: String) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: ErrorBody { message: msg },
        }),
    )
        .into_response()
}

// Storage failures surface as a 500; production responses carry a sanitized
// message, everything else gets the unpacked error chain. Detail is always
// logged.
fn storage_error(state: &AppState, err: anyhow::Error) -> Response {
    let detail = unpack_error(&err);
    tracing::error!("bookmark storage operation failed: {}", detail);

    let message = match state.environment {
        Environment::Production => "server error".to_string(),
        Environment::Development => detail,
    };

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse {
            error: ErrorBody { message },
        }),
    )
        .into_response()
}

// ============================================================================
// Payload shaping
// ============================================================================

fn text_value(value: &JsonValue) -> String {
    match value {
        JsonValue::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn optional_text(body: &JsonValue, field: &str) -> Option<String> {
    body.get(field).filter(|v| !v.is_null()).map(text_value)
}

// ============================================================================
// Handlers
// ============================================================================

pub async fn list_bookmarks(State(state): State<AppState>) -> Response {
    let store = Bookmarks::new(state.db.connection());

    match store.list_all().await {
        Ok(bookmarks) => {
            let views: Vec<Bookmark> = bookmarks.into_iter().map(Bookmark::into_view).collect();
            success(views)
        }
        Err(e) => storage_error(&state, e),
    }
}

pub async fn get_bookmark(State(state): State<AppState>, Path(id): Path<i64>) -> Response {
    let store = Bookmarks::new(state.db.connection());

    match store.get_by_id(id).await {
        Ok(Some(bookmark)) => success(bookmark.into_view()),
        Ok(None) => {
            tracing::error!("bookmark with id {} not found", id);
            not_found("Bookmark not found")
        }
        Err(e) => storage_error(&state, e),
    }
}

pub async fn create_bookmark(
    State(state): State<AppState>,
    Json(body): Json<JsonValue>,
) -> Response {
    if let Err(e) = validate_create(&body) {
        tracing::error!("invalid create payload: {}", e);
        return bad_request(e.to_string());
    }

    let input = CreateBookmark {
        title: text_value(&body["title"]),
        url: text_value(&body["url"]),
        description: text_value(&body["description"]),
        rating: body["rating"].clone(),
    };

    let store = Bookmarks::new(state.db.connection());
    match store.insert(input).await {
        Ok(bookmark) => {
            tracing::info!("bookmark with id {} created", bookmark.id);
            let location = format!("/api/bookmarks/{}", bookmark.id);
            created_at(location, bookmark.into_view())
        }
        Err(e) => storage_error(&state, e),
    }
}

pub async fn update_bookmark(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(body): Json<JsonValue>,
) -> Response {
    let store = Bookmarks::new(state.db.connection());

    // Resolve the record before inspecting the payload, so an absent id is a
    // 404 even when the body would not validate.
    match store.get_by_id(id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            tracing::error!("bookmark with id {} not found", id);
            return not_found("Bookmark not found");
        }
        Err(e) => return storage_error(&state, e),
    }

    if let Err(e) = validate_update(&body) {
        tracing::error!("invalid update payload for bookmark {}: {}", id, e);
        return bad_request(e.to_string());
    }

    let changes = UpdateBookmark {
        title: optional_text(&body, "title"),
        url: optional_text(&body, "url"),
        description: optional_text(&body, "description"),
        rating: body.get("rating").filter(|v| !v.is_null()).cloned(),
    };

    match store.update_by_id(id, changes).await {
        Ok(_) => {
            tracing::info!("bookmark with id {} updated", id);
            no_content()
        }
        Err(e) => storage_error(&state, e),
    }
}

pub async fn delete_bookmark(State(state): State<AppState>, Path(id): Path<i64>) -> Response {
    let store = Bookmarks::new(state.db.connection());

    match store.get_by_id(id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            tracing::error!("bookmark with id {} not found", id);
            return not_found("Bookmark not found");
        }
        Err(e) => return storage_error(&state, e),
    }

    match store.delete_by_id(id).await {
        Ok(_) => {
            tracing::info!("bookmark with id {} deleted", id);
            no_content()
        }
        Err(e) => storage_error(&state, e),
    }
}
