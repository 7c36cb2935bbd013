use axum::{middleware, routing::get, Router};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};

use super::{handlers, pages, AppState};
use crate::middleware::{make_span_with_request_id, request_id_middleware};

/// Creates the application router with all routes
pub fn create_router(state: AppState) -> Router {
    let js_dir = state.static_dir.join("js");

    Router::new()
        .route("/", get(pages::index).post(pages::search))
        .route("/health", get(handlers::health_check))
        .nest("/api/v1", api_routes())
        .nest_service("/static/js", ServeDir::new(js_dir))
        .layer(
            ServiceBuilder::new()
                .layer(middleware::from_fn(request_id_middleware))
                .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

/// JSON API routes under /api/v1
fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/movies", get(handlers::get_movie))
        .route("/recommendations", get(handlers::get_recommendations))
}
