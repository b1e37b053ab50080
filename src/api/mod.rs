//! HTTP API module
//!
//! This module contains all HTTP endpoint handlers and response structures.

pub mod handlers;
pub mod responses;

use std::sync::Arc;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;
use handlers::*;

/// Create the HTTP router with all endpoints
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route(
            "/session",
            post(enter_handler).get(session_handler).delete(exit_handler),
        )
        .route("/session/intent", post(intent_handler))
        .route("/health", get(health_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use axum::{
        body::{self, Body},
        http::{Method, Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;

    fn test_app() -> Router {
        create_router(Arc::new(AppState::new(0, "127.0.0.1".to_string())))
    }

    async fn call(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("request");

        let response = app.clone().oneshot(request).await.expect("response");
        let status = response.status();
        let bytes = body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body");
        (status, serde_json::from_slice(&bytes).expect("json"))
    }

    #[tokio::test]
    async fn enter_intents_and_exit() {
        let app = test_app();

        let (status, body) = call(
            &app,
            Method::POST,
            "/session",
            Some(json!({ "name": "X", "durationMinMinutes": 5 })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["session"]["timer"]["display"], "05:00");
        assert_eq!(body["session"]["timer"]["kind"], "countdown");
        assert_eq!(body["session"]["activeView"], "timer");

        let (status, body) = call(
            &app,
            Method::POST,
            "/session/intent",
            Some(json!({ "intent": "addTeam" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let teams = body["session"]["scoreboard"]["teams"].as_array().unwrap();
        assert_eq!(teams.len(), 3);
        assert_eq!(teams[2]["name"], "Team 3");
        assert_eq!(teams[2]["color"], "yellow");

        let (_, body) = call(
            &app,
            Method::POST,
            "/session/intent",
            Some(json!({ "intent": "updateScore", "index": 0, "delta": -5 })),
        )
        .await;
        assert_eq!(body["session"]["scoreboard"]["teams"][0]["score"], 0);

        let (status, body) = call(&app, Method::DELETE, "/session", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "closed");
        assert_eq!(body["session"]["timer"]["isRunning"], false);

        let (status, _) = call(&app, Method::GET, "/session", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn second_enter_conflicts() {
        let app = test_app();
        let game = json!({ "name": "Charades", "duration": { "min": 10, "max": 20 } });

        let (status, body) = call(&app, Method::POST, "/session", Some(game.clone())).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["session"]["timer"]["seconds"], 600);

        let (status, body) = call(&app, Method::POST, "/session", Some(game)).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["status"], "error");
    }

    #[tokio::test]
    async fn intents_without_a_session_are_not_found() {
        let app = test_app();
        let (status, _) = call(
            &app,
            Method::POST,
            "/session/intent",
            Some(json!({ "intent": "toggleRunning" })),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = call(&app, Method::DELETE, "/session", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn missing_duration_falls_back_and_health_reports_the_session() {
        let app = test_app();
        let (_, body) = call(&app, Method::POST, "/session", Some(json!({ "name": "" }))).await;
        assert_eq!(body["session"]["gameName"], "Game");
        assert_eq!(body["session"]["timer"]["display"], "05:00");

        let (status, body) = call(&app, Method::GET, "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["session_active"], true);
        assert_eq!(body["last_action"], "enter");
    }
}
