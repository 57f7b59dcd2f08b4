use axum::{
    extract::{rejection::{JsonRejection, QueryRejection}, Path, Query, Request, State},
    routing::get,
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use uuid::Uuid;

use common::types::Health;
use models::Item;
use service::{Dispatcher, ItemFields, ItemRequest, Method};

use crate::errors::ApiError;

#[derive(Clone)]
pub struct AppState {
    pub dispatcher: Dispatcher,
}

pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// `GET /{version}/todo?user_id=..&id=..`
async fn get_item(
    State(state): State<AppState>,
    Path(version): Path<String>,
    fields: Result<Query<ItemFields>, QueryRejection>,
) -> Result<Json<Item>, ApiError> {
    let Query(fields) = fields.map_err(|e| ApiError::invalid(e.body_text()))?;
    let item = state.dispatcher.dispatch(ItemRequest::new(Method::Get, version, fields)).await?;
    Ok(Json(item))
}

/// `POST /{version}/todo` with a JSON item body; any `id` in the body is ignored.
async fn create_item(
    State(state): State<AppState>,
    Path(version): Path<String>,
    body: Result<Json<ItemFields>, JsonRejection>,
) -> Result<Json<Item>, ApiError> {
    let Json(fields) = body.map_err(|e| ApiError::invalid(e.body_text()))?;
    let item = state.dispatcher.dispatch(ItemRequest::new(Method::Post, version, fields)).await?;
    Ok(Json(item))
}

/// `PUT /{version}/todo` with a JSON item body identifying an existing item.
async fn update_item(
    State(state): State<AppState>,
    Path(version): Path<String>,
    body: Result<Json<ItemFields>, JsonRejection>,
) -> Result<Json<Item>, ApiError> {
    let Json(fields) = body.map_err(|e| ApiError::invalid(e.body_text()))?;
    let item = state.dispatcher.dispatch(ItemRequest::new(Method::Put, version, fields)).await?;
    Ok(Json(item))
}

/// Build the application router: health check plus the versioned to-do routes.
pub fn build_router(state: AppState, cors: CorsLayer) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/:version/todo", get(get_item).post(create_item).put(update_item))
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                // one span per request, tagged with a fresh trace id
                .make_span_with(|req: &Request| {
                    let trace_id = Uuid::new_v4();
                    tracing::info_span!("request", method = %req.method(), uri = %req.uri(), %trace_id)
                })
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
