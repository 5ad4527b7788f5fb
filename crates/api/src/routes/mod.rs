//! Route handlers for the Aura API.

pub mod alarms;
pub mod categories;
pub mod chat;
pub mod health;
pub mod messages;
pub mod settings;
pub mod tasks;
pub mod users;

use axum::routing::{get, post};
use axum::Router;

use crate::state::AppState;

/// Build the router with all routes.
pub fn router() -> Router<AppState> {
    Router::new()
        // Health check
        .route("/health", get(health::health))
        // Users
        .route("/api/users", post(users::create))
        .route("/api/user", get(users::current))
        // Entities
        .route("/api/tasks", get(tasks::list).post(tasks::create))
        .route(
            "/api/tasks/:id",
            get(tasks::get).patch(tasks::update).delete(tasks::delete),
        )
        .route("/api/alarms", get(alarms::list).post(alarms::create))
        .route(
            "/api/alarms/:id",
            get(alarms::get).patch(alarms::update).delete(alarms::delete),
        )
        .route(
            "/api/categories",
            get(categories::list).post(categories::create),
        )
        .route(
            "/api/categories/:id",
            get(categories::get)
                .patch(categories::update)
                .delete(categories::delete),
        )
        // Chat
        .route("/api/messages", get(messages::list).post(messages::create))
        .route("/api/ai/chat", post(chat::chat))
        // Settings
        .route("/api/settings", get(settings::get).patch(settings::update))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{Method, Request, StatusCode};
    use axum::Router;
    use database::{seed, Database};
    use http_body_util::BodyExt;
    use mock_brain::CannedBrain;
    use orchestrator::{Brain, ExtractorConfig, Orchestrator};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::router;
    use crate::extract::USER_ID_HEADER;
    use crate::state::AppState;

    async fn app_with(brain: Option<Arc<dyn Brain>>) -> (Router, i64) {
        let db = Database::in_memory().await.unwrap();
        let demo = seed::seed_demo(db.pool()).await.unwrap();
        let orchestrator = Orchestrator::with_brain(db.clone(), brain, ExtractorConfig::default());
        let app = router().with_state(AppState::new(db, orchestrator));
        (app, demo.id)
    }

    async fn app() -> (Router, i64) {
        app_with(None).await
    }

    async fn send(
        app: &Router,
        method: Method,
        uri: &str,
        user: Option<i64>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(id) = user {
            builder = builder.header(USER_ID_HEADER, id.to_string());
        }
        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    #[tokio::test]
    async fn test_health() {
        let (app, _) = app().await;
        let (status, body) = send(&app, Method::GET, "/health", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_missing_or_unknown_user_is_unauthorized() {
        let (app, _) = app().await;

        let (status, body) = send(&app, Method::GET, "/api/tasks", None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "Not authenticated");

        let (status, _) = send(&app, Method::GET, "/api/tasks", Some(9999), None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_register_and_current_user() {
        let (app, _) = app().await;

        let (status, created) = send(
            &app,
            Method::POST,
            "/api/users",
            None,
            Some(json!({"username": "sam", "name": "Sam"})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let id = created["id"].as_i64().unwrap();

        let (status, me) = send(&app, Method::GET, "/api/user", Some(id), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(me["username"], "sam");

        let (status, _) = send(
            &app,
            Method::POST,
            "/api/users",
            None,
            Some(json!({"username": "sam"})),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_task_crud() {
        let (app, demo) = app().await;

        let (status, created) = send(
            &app,
            Method::POST,
            "/api/tasks",
            Some(demo),
            Some(json!({"title": "Write report", "date": "2025-03-11T09:00:00Z", "categoryId": 2})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["completed"], false);
        let id = created["id"].as_i64().unwrap();

        let (status, updated) = send(
            &app,
            Method::PATCH,
            &format!("/api/tasks/{}", id),
            Some(demo),
            Some(json!({"completed": true})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["completed"], true);
        assert_eq!(updated["title"], "Write report");

        let (status, _) = send(&app, Method::DELETE, &format!("/api/tasks/{}", id), Some(demo), None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, body) = send(&app, Method::GET, &format!("/api/tasks/{}", id), Some(demo), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn test_invalid_task_is_bad_request() {
        let (app, demo) = app().await;

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/tasks",
            Some(demo),
            Some(json!({"title": "  ", "date": "2025-03-11T09:00:00Z"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "title cannot be empty");

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/tasks",
            Some(demo),
            Some(json!({"title": "No date"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().starts_with("Invalid request body"));
    }

    #[tokio::test]
    async fn test_other_users_rows_are_not_found() {
        let (app, demo) = app().await;
        let (_, other) = send(
            &app,
            Method::POST,
            "/api/users",
            None,
            Some(json!({"username": "sam"})),
        )
        .await;
        let other = other["id"].as_i64().unwrap();

        let (_, alarms) = send(&app, Method::GET, "/api/alarms", Some(demo), None).await;
        let alarm_id = alarms[0]["id"].as_i64().unwrap();

        let (status, _) = send(
            &app,
            Method::PATCH,
            &format!("/api/alarms/{}", alarm_id),
            Some(other),
            Some(json!({"isActive": false})),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (_, others) = send(&app, Method::GET, "/api/alarms", Some(other), None).await;
        assert_eq!(others, json!([]));
    }

    #[tokio::test]
    async fn test_categories_listed_in_order() {
        let (app, demo) = app().await;

        let (status, categories) = send(&app, Method::GET, "/api/categories", Some(demo), None).await;
        assert_eq!(status, StatusCode::OK);
        let names: Vec<&str> = categories
            .as_array()
            .unwrap()
            .iter()
            .map(|c| c["name"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["Daily", "Work", "Personal"]);
    }

    #[tokio::test]
    async fn test_chat_creates_alarm() {
        let (app, demo) = app().await;

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/ai/chat",
            Some(demo),
            Some(json!({"message": "wake me at 7am"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["assistantMessage"]["isUser"], false);
        assert_eq!(body["createdEntity"]["type"], "alarm");
        assert_eq!(body["createdEntity"]["data"]["days"], "Once");

        let (_, history) = send(&app, Method::GET, "/api/messages?limit=2", Some(demo), None).await;
        let history = history.as_array().unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0]["content"], "wake me at 7am");
        assert_eq!(history[1]["content"], body["assistantMessage"]["content"]);
    }

    #[tokio::test]
    async fn test_chat_uses_model_reply() {
        let brain: Arc<dyn Brain> = Arc::new(CannedBrain::new("Happy to chat!"));
        let (app, demo) = app_with(Some(brain)).await;

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/ai/chat",
            Some(demo),
            Some(json!({"message": "how are you?"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["assistantMessage"]["content"], "Happy to chat!");
        assert!(body.get("createdEntity").is_none());
    }

    #[tokio::test]
    async fn test_chat_requires_message() {
        let (app, demo) = app().await;

        let (status, body) = send(&app, Method::POST, "/api/ai/chat", Some(demo), Some(json!({}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Message is required");
    }

    #[tokio::test]
    async fn test_chat_rejects_oversized_message() {
        let (app, demo) = app().await;

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/ai/chat",
            Some(demo),
            Some(json!({"message": "x".repeat(9000)})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().starts_with("content is too long"));

        let (_, history) = send(&app, Method::GET, "/api/messages", Some(demo), None).await;
        assert!(history
            .as_array()
            .unwrap()
            .iter()
            .all(|m| m["content"].as_str().unwrap().len() < 9000));
    }

    #[tokio::test]
    async fn test_post_message_only_persists() {
        let (app, demo) = app().await;

        let (status, created) = send(
            &app,
            Method::POST,
            "/api/messages",
            Some(demo),
            Some(json!({"content": "note to self: schedule nothing"})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["isUser"], true);

        let (_, tasks_before) = send(&app, Method::GET, "/api/tasks", Some(demo), None).await;
        let (_, latest) = send(&app, Method::GET, "/api/messages?limit=1", Some(demo), None).await;
        assert_eq!(latest[0]["id"], created["id"]);
        // Seeded tasks only; no assistant turn ran
        assert_eq!(tasks_before.as_array().unwrap().len(), 5);

        let (status, _) = send(&app, Method::GET, "/api/messages?limit=-1", Some(demo), None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_settings_defaults_and_patch() {
        let (app, demo) = app().await;

        let (status, defaults) = send(&app, Method::GET, "/api/settings", Some(demo), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(defaults["darkMode"], true);
        assert_eq!(defaults["calendarSync"], false);

        let (status, patched) = send(
            &app,
            Method::PATCH,
            "/api/settings",
            Some(demo),
            Some(json!({"calendarSync": true})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(patched["calendarSync"], true);
        assert_eq!(patched["darkMode"], true);
        assert_eq!(patched["id"], defaults["id"]);
    }
}
