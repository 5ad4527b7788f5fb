//! User routes.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use database::{user, NewUser, User};
use tracing::info;

use crate::error::Result;
use crate::extract::{ApiJson, CurrentUser};
use crate::state::AppState;

/// Register a user. Credentials are handled by the upstream authenticator.
pub async fn create(
    State(state): State<AppState>,
    ApiJson(new_user): ApiJson<NewUser>,
) -> Result<(StatusCode, Json<User>)> {
    let created = user::create_user(state.db.pool(), &new_user).await?;
    info!(user_id = created.id, "Registered user");
    Ok((StatusCode::CREATED, Json(created)))
}

/// The calling user.
pub async fn current(CurrentUser(me): CurrentUser) -> Json<User> {
    Json(me)
}
