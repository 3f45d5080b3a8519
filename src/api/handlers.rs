use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use serde_json::{json, Value};

use crate::{
    error::AppResult,
    middleware::request_id::RequestId,
    models::QueryAnswer,
    services::queries,
};

use super::AppState;

pub const WELCOME: &str = "Bienvenid@s! ¿Qué vemos hoy?";

/// Landing page
pub async fn index() -> &'static str {
    WELCOME
}

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    (
        StatusCode::OK,
        Json(json!({ "status": "healthy", "movies": state.dataset.len() })),
    )
}

/// Films released in a given month
pub async fn films_per_month(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Path(mes): Path<String>,
) -> AppResult<Json<QueryAnswer>> {
    tracing::info!(request_id = %request_id, mes = %mes, "Counting films per month");
    queries::films_per_month(&state.dataset, &mes).map(Json)
}

/// Films released on a given weekday
pub async fn films_per_weekday(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Path(dia): Path<String>,
) -> AppResult<Json<QueryAnswer>> {
    tracing::info!(request_id = %request_id, dia = %dia, "Counting films per weekday");
    queries::films_per_weekday(&state.dataset, &dia).map(Json)
}

pub async fn title_score(
    State(state): State<AppState>,
    Path(titulo): Path<String>,
) -> AppResult<Json<QueryAnswer>> {
    queries::title_score(&state.dataset, &titulo).map(Json)
}

pub async fn title_votes(
    State(state): State<AppState>,
    Path(titulo): Path<String>,
) -> AppResult<Json<QueryAnswer>> {
    queries::title_votes(&state.dataset, &titulo).map(Json)
}

/// Actor film count and return
pub async fn get_actor(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Path(nombre): Path<String>,
) -> AppResult<Json<QueryAnswer>> {
    let result = queries::actor_stats(&state.dataset, &nombre);
    if let Err(e) = &result {
        tracing::info!(request_id = %request_id, error = %e, "Actor query rejected");
    }
    result.map(Json)
}

/// Director return with per-film breakdown
pub async fn get_director(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Path(nombre): Path<String>,
) -> AppResult<Json<QueryAnswer>> {
    let result = queries::director_stats(&state.dataset, &nombre);
    if let Err(e) = &result {
        tracing::info!(request_id = %request_id, error = %e, "Director query rejected");
    }
    result.map(Json)
}
