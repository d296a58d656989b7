//! Axum router: page shells, the JSON API, health, and static assets.

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::web::AppState;
use crate::web::handlers;

pub fn build_router(state: AppState) -> Router {
    let mut router: Router<AppState> = Router::new();
    for page in crate::pages::Page::ALL {
        router = router.route(page.path(), get(move || handlers::page(page)));
    }

    let mut router = router
        .route("/api/chat", post(handlers::chat))
        .route("/api/generate-image", post(handlers::generate_image))
        .route("/api/temp-mail/generate", post(handlers::generate_temp_mail))
        .route("/health", get(handlers::health));

    let static_dir = &state.server.static_dir;
    if static_dir.is_dir() {
        router = router.nest_service("/static", ServeDir::new(static_dir));
        tracing::info!(path = %static_dir.display(), "static file serving enabled");
    }

    router
        .layer(DefaultBodyLimit::max(state.server.max_body_bytes))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
