//! HTTP route handlers.

use askama::Template;
use axum::{
    Json, Router,
    extract::State,
    response::{Html, IntoResponse},
    routing::get,
};
use tower_http::services::ServeDir;

use crate::presenter::PageModel;

use super::state::AppState;
use super::templates::IndexTemplate;

/// Create the application router.
///
/// `static_dir` is the path to the static assets directory.
pub fn create_router(state: AppState, static_dir: &str) -> Router {
    Router::new()
        .route("/", get(index_page))
        .route("/health", get(health))
        .route("/api/map", get(map_model))
        .nest_service("/static", ServeDir::new(static_dir))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Map page shell.
async fn index_page() -> impl IntoResponse {
    Html(
        IndexTemplate
            .render()
            .unwrap_or_else(|e| format!("Template error: {}", e)),
    )
}

/// Current page model: scene, summary line and countdown label.
async fn map_model(State(state): State<AppState>) -> Json<PageModel> {
    Json(state.store.snapshot())
}

#[cfg(test)]
mod http_tests {
    use tokio::net::TcpListener;

    use super::*;
    use crate::presenter::{SceneStore, SummaryLine};

    async fn serve(store: SceneStore) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base = format!("http://{}", listener.local_addr().unwrap());
        let app = create_router(AppState::new(store), "static");
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        base
    }

    #[tokio::test]
    async fn health_answers_ok() {
        let base = serve(SceneStore::new()).await;

        let response = reqwest::get(format!("{base}/health")).await.unwrap();

        assert_eq!(response.status(), 200);
        assert_eq!(response.text().await.unwrap(), "ok");
    }

    #[tokio::test]
    async fn index_serves_the_page_shell() {
        let base = serve(SceneStore::new()).await;

        let response = reqwest::get(format!("{base}/")).await.unwrap();

        assert_eq!(response.status(), 200);
        let html = response.text().await.unwrap();
        assert!(html.contains("id=\"map\""));
    }

    #[tokio::test]
    async fn map_model_reflects_the_store() {
        let store = SceneStore::new();
        store.set_summary(SummaryLine::fetch_error());
        store.set_countdown(42);
        let base = serve(store).await;

        let response = reqwest::get(format!("{base}/api/map")).await.unwrap();
        assert_eq!(response.status(), 200);

        let model: serde_json::Value = response.json().await.unwrap();
        assert_eq!(model["scene"], serde_json::Value::Null);
        assert_eq!(model["summary"]["kind"], "error");
        assert_eq!(model["countdown_text"], "Next update in 42 seconds");
    }

    #[tokio::test]
    async fn static_assets_are_served() {
        let base = serve(SceneStore::new()).await;

        let response = reqwest::get(format!("{base}/static/style.css")).await.unwrap();

        assert_eq!(response.status(), 200);
        let body = response.text().await.unwrap();
        assert!(body.contains(".station-marker"));
    }
}
