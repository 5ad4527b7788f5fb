//! Settings routes. Settings are created with defaults on first access.

use axum::extract::State;
use axum::Json;
use database::{settings, SettingsPatch, UserSettings};

use crate::error::Result;
use crate::extract::{ApiJson, CurrentUser};
use crate::state::AppState;

pub async fn get(State(state): State<AppState>, me: CurrentUser) -> Result<Json<UserSettings>> {
    Ok(Json(settings::get_or_create_settings(state.db.pool(), me.id()).await?))
}

pub async fn update(
    State(state): State<AppState>,
    me: CurrentUser,
    ApiJson(patch): ApiJson<SettingsPatch>,
) -> Result<Json<UserSettings>> {
    Ok(Json(settings::update_settings(state.db.pool(), me.id(), &patch).await?))
}
