use axum::{middleware, routing::get, Router};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use super::handlers;
use super::AppState;
use crate::middleware::request_id::{make_span_with_request_id, request_id_middleware};

/// Creates the main API router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/health", get(handlers::health_check))
        // Release calendar
        .route(
            "/cantidad_filmaciones_mes/:mes",
            get(handlers::films_per_month),
        )
        .route(
            "/cantidad_filmaciones_dia/:dia",
            get(handlers::films_per_weekday),
        )
        // Titles
        .route("/score_titulo/:titulo", get(handlers::title_score))
        .route("/votos_titulo/:titulo", get(handlers::title_votes))
        // People
        .route("/get_actor/:nombre", get(handlers::get_actor))
        .route("/get_director/:nombre", get(handlers::get_director))
        .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
