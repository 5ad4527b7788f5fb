//! Request extractors: the calling user and JSON bodies with JSON errors.

use axum::async_trait;
use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, FromRequestParts, Request};
use axum::http::request::Parts;
use axum::Json;
use database::{user, DatabaseError, User};
use serde::de::DeserializeOwned;

use crate::error::ApiError;
use crate::state::AppState;

/// Header carrying the authenticated user's ID, set by the upstream
/// authenticator.
pub const USER_ID_HEADER: &str = "x-user-id";

/// The user a request acts for.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

impl CurrentUser {
    pub fn id(&self) -> i64 {
        self.0.id
    }
}

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let id = parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.trim().parse::<i64>().ok())
            .ok_or(ApiError::Unauthorized)?;

        match user::get_user(state.db.pool(), id).await {
            Ok(found) => Ok(CurrentUser(found)),
            Err(DatabaseError::NotFound { .. }) => Err(ApiError::Unauthorized),
            Err(e) => Err(e.into()),
        }
    }
}

/// `Json<T>` whose rejection is a JSON 400 instead of axum's plain text.
#[derive(Debug)]
pub struct ApiJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(ApiJson(value)),
            Err(rejection) => Err(ApiError::BadRequest(rejection_message(rejection))),
        }
    }
}

fn rejection_message(rejection: JsonRejection) -> String {
    format!("Invalid request body: {}", rejection.body_text())
}
