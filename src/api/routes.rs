use crate::api::server::AppState;
use crate::update::{self, Outcome, UpdateRequest};
use axum::extract::{RawQuery, State};
use axum::response::{IntoResponse, Redirect};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

pub(super) fn new(state: AppState) -> Router {
    let update_path = state.config.route_path();
    Router::new()
        .route(&state.config.healthcheck_path(), get(health_check))
        .route(&update_path, get(update))
        // Anything below the update path is the update endpoint too.
        .route(&format!("{update_path}*rest"), get(update))
        .route(update_path.trim_end_matches('/'), get(redirect_to_update))
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(state.config.http_timeout))
        .with_state(state)
}

#[allow(clippy::unused_async)]
async fn health_check() -> impl IntoResponse {
    Json(json!({"ok":"healthy"}))
}

async fn update(State(state): State<AppState>, RawQuery(query): RawQuery) -> Outcome {
    let request = UpdateRequest::from_query(query.as_deref().unwrap_or_default());
    update::handle(&state.config, state.exchange.as_ref(), &request).await
}

#[allow(clippy::unused_async)]
async fn redirect_to_update(State(state): State<AppState>, RawQuery(query): RawQuery) -> Redirect {
    let path = state.config.route_path();
    match query {
        Some(query) => Redirect::permanent(&format!("{path}?{query}")),
        None => Redirect::permanent(&path),
    }
}
