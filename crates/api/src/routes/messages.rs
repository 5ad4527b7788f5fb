//! Message history routes.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use database::{message, Message, NewMessage};
use serde::Deserialize;

use crate::error::{ApiError, Result};
use crate::extract::{ApiJson, CurrentUser};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    pub limit: Option<i64>,
}

/// Message history, oldest first. `?limit=N` keeps the latest N.
pub async fn list(
    State(state): State<AppState>,
    me: CurrentUser,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<Vec<Message>>> {
    if matches!(query.limit, Some(limit) if limit < 0) {
        return Err(ApiError::BadRequest("limit must not be negative".to_string()));
    }

    Ok(Json(message::list_messages(state.db.pool(), me.id(), query.limit).await?))
}

/// Append a message without running the assistant.
pub async fn create(
    State(state): State<AppState>,
    me: CurrentUser,
    ApiJson(new_message): ApiJson<NewMessage>,
) -> Result<(StatusCode, Json<Message>)> {
    let created = message::create_message(state.db.pool(), me.id(), &new_message).await?;
    Ok((StatusCode::CREATED, Json(created)))
}
