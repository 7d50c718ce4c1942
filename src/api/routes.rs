//! API Routes
//!
//! Configures the Axum router with all cache server endpoints.

use axum::{
    routing::{get, post, put},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    clear_handler, delete_handler, exists_handler, get_handler, health_handler, set_handler,
    stats_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `PUT /cache/:namespace` - Store a key-value pair
/// - `GET /cache/:namespace/:key` - Retrieve a value by key
/// - `DELETE /cache/:namespace/:key` - Delete a key
/// - `GET /cache/:namespace/:key/exists` - Check for a live key
/// - `POST /clear` - Clear the default namespace
/// - `GET /stats` - Per-namespace statistics
/// - `GET /health` - Health check endpoint
///
/// # Middleware
/// - CORS: Allows any origin
/// - Tracing: Logs all requests
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/cache/:namespace", put(set_handler))
        .route("/cache/:namespace/:key", get(get_handler).delete(delete_handler))
        .route("/cache/:namespace/:key/exists", get(exists_handler))
        .route("/clear", post(clear_handler))
        .route("/stats", get(stats_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use tower::util::ServiceExt;

    fn create_test_app() -> (Router, AppState) {
        let state = AppState::with_defaults().unwrap();
        (create_router(state.clone()), state)
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let (app, state) = create_test_app();

        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        state.registry.destroy().await;
    }

    #[tokio::test]
    async fn test_set_endpoint() {
        let (app, state) = create_test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .method("PUT")
                    .uri("/cache/general")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"key":"test","value":"hello"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        state.registry.destroy().await;
    }

    #[tokio::test]
    async fn test_get_not_found() {
        let (app, state) = create_test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/cache/general/nonexistent")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        state.registry.destroy().await;
    }
}
