//! HTTP surface: the property delete endpoint
//!
//! The pages talk to the backend directly; deletion goes through this server
//! because it chains storage and row deletions that the client should not
//! orchestrate. Status mapping: 401 when the caller cannot be resolved, 404
//! when the property is missing or owned by someone else, 500 on any other
//! failure, 200 with a success flag otherwise.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::error::Error;
use crate::workflow;
use crate::Supabase;

/// Shared state for the HTTP handlers
#[derive(Clone)]
pub struct AppState {
    pub supabase: Arc<Supabase>,
}

/// Build the application router
pub fn router(supabase: Arc<Supabase>) -> Router {
    Router::new()
        .route("/api/properties/:id/delete", post(delete_property))
        .with_state(AppState { supabase })
}

async fn delete_property(
    State(state): State<AppState>,
    Path(property_id): Path<Uuid>,
    headers: HeaderMap,
) -> (StatusCode, Json<Value>) {
    let Some(token) = bearer_token(&headers) else {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "error": "Unauthorized" })),
        );
    };

    let caller = match state.supabase.auth().get_user(token).await {
        Ok(user) => user,
        Err(_) => {
            return (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "error": "Unauthorized" })),
            );
        }
    };

    match workflow::delete_property(&state.supabase, token, caller.id, property_id).await {
        Ok(()) => (StatusCode::OK, Json(json!({ "success": true }))),
        Err(Error::NotFound) => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "Property not found or unauthorized" })),
        ),
        Err(error) => {
            tracing::error!(%error, %property_id, "property deletion failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Failed to delete property" })),
            )
        }
    }
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}
