//! Alarm routes.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use database::{alarm, Alarm, AlarmPatch, NewAlarm};

use crate::error::Result;
use crate::extract::{ApiJson, CurrentUser};
use crate::state::AppState;

pub async fn list(State(state): State<AppState>, me: CurrentUser) -> Result<Json<Vec<Alarm>>> {
    Ok(Json(alarm::list_alarms(state.db.pool(), me.id()).await?))
}

pub async fn get(
    State(state): State<AppState>,
    me: CurrentUser,
    Path(id): Path<i64>,
) -> Result<Json<Alarm>> {
    Ok(Json(alarm::get_alarm(state.db.pool(), me.id(), id).await?))
}

pub async fn create(
    State(state): State<AppState>,
    me: CurrentUser,
    ApiJson(new_alarm): ApiJson<NewAlarm>,
) -> Result<(StatusCode, Json<Alarm>)> {
    let created = alarm::create_alarm(state.db.pool(), me.id(), &new_alarm).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn update(
    State(state): State<AppState>,
    me: CurrentUser,
    Path(id): Path<i64>,
    ApiJson(patch): ApiJson<AlarmPatch>,
) -> Result<Json<Alarm>> {
    Ok(Json(alarm::update_alarm(state.db.pool(), me.id(), id, &patch).await?))
}

pub async fn delete(
    State(state): State<AppState>,
    me: CurrentUser,
    Path(id): Path<i64>,
) -> Result<StatusCode> {
    alarm::delete_alarm(state.db.pool(), me.id(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}
