//! Task routes.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use database::{task, NewTask, Task, TaskPatch};

use crate::error::Result;
use crate::extract::{ApiJson, CurrentUser};
use crate::state::AppState;

pub async fn list(State(state): State<AppState>, me: CurrentUser) -> Result<Json<Vec<Task>>> {
    Ok(Json(task::list_tasks(state.db.pool(), me.id()).await?))
}

pub async fn get(
    State(state): State<AppState>,
    me: CurrentUser,
    Path(id): Path<i64>,
) -> Result<Json<Task>> {
    Ok(Json(task::get_task(state.db.pool(), me.id(), id).await?))
}

pub async fn create(
    State(state): State<AppState>,
    me: CurrentUser,
    ApiJson(new_task): ApiJson<NewTask>,
) -> Result<(StatusCode, Json<Task>)> {
    let created = task::create_task(state.db.pool(), me.id(), &new_task).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn update(
    State(state): State<AppState>,
    me: CurrentUser,
    Path(id): Path<i64>,
    ApiJson(patch): ApiJson<TaskPatch>,
) -> Result<Json<Task>> {
    Ok(Json(task::update_task(state.db.pool(), me.id(), id, &patch).await?))
}

pub async fn delete(
    State(state): State<AppState>,
    me: CurrentUser,
    Path(id): Path<i64>,
) -> Result<StatusCode> {
    task::delete_task(state.db.pool(), me.id(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}
