//! Assistant chat route.

use axum::extract::State;
use axum::Json;
use orchestrator::TurnOutcome;
use serde::Deserialize;

use crate::error::{ApiError, Result};
use crate::extract::{ApiJson, CurrentUser};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: String,
}

/// Run one chat turn: store the message, let the assistant reply and
/// create any task or alarm it asked for.
pub async fn chat(
    State(state): State<AppState>,
    me: CurrentUser,
    ApiJson(request): ApiJson<ChatRequest>,
) -> Result<Json<TurnOutcome>> {
    if request.message.is_empty() {
        return Err(ApiError::BadRequest("Message is required".to_string()));
    }

    let outcome = state.orchestrator.handle_turn(me.id(), &request.message).await?;
    Ok(Json(outcome))
}
