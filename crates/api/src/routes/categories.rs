//! Category routes.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use database::{category, Category, CategoryPatch, NewCategory};

use crate::error::Result;
use crate::extract::{ApiJson, CurrentUser};
use crate::state::AppState;

pub async fn list(State(state): State<AppState>, me: CurrentUser) -> Result<Json<Vec<Category>>> {
    Ok(Json(category::list_categories(state.db.pool(), me.id()).await?))
}

pub async fn get(
    State(state): State<AppState>,
    me: CurrentUser,
    Path(id): Path<i64>,
) -> Result<Json<Category>> {
    Ok(Json(category::get_category(state.db.pool(), me.id(), id).await?))
}

pub async fn create(
    State(state): State<AppState>,
    me: CurrentUser,
    ApiJson(new_category): ApiJson<NewCategory>,
) -> Result<(StatusCode, Json<Category>)> {
    let created = category::create_category(state.db.pool(), me.id(), &new_category).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn update(
    State(state): State<AppState>,
    me: CurrentUser,
    Path(id): Path<i64>,
    ApiJson(patch): ApiJson<CategoryPatch>,
) -> Result<Json<Category>> {
    Ok(Json(category::update_category(state.db.pool(), me.id(), id, &patch).await?))
}

pub async fn delete(
    State(state): State<AppState>,
    me: CurrentUser,
    Path(id): Path<i64>,
) -> Result<StatusCode> {
    category::delete_category(state.db.pool(), me.id(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}
