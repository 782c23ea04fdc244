//! Raw queue primitive handlers over the waiting line.

use axum::{extract::State, http::StatusCode, Json};
use counterline_core::{QueueError, QueueStats, TicketView};
use serde::Serialize;
use std::sync::Arc;
use tracing::info;

use super::tickets::{api_error, ApiError};
use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IsEmptyResponse {
    pub is_empty: bool,
}

#[derive(Debug, Serialize)]
pub struct SizeResponse {
    pub size: usize,
}

/// EmptyQueue is an expected outcome, reported as a client error.
fn queue_error(err: QueueError) -> ApiError {
    match err {
        QueueError::EmptyQueue => api_error(StatusCode::BAD_REQUEST, err.to_string()),
    }
}

/// Add a new ticket to the back of the line
pub async fn enqueue(State(state): State<Arc<AppState>>) -> (StatusCode, Json<TicketView>) {
    let ticket = state.registry().create_ticket();
    info!(number = ticket.number(), "Ticket enqueued");
    (StatusCode::CREATED, Json(ticket.to_view()))
}

/// Remove the head of the line without calling it
pub async fn dequeue(State(state): State<Arc<AppState>>) -> Result<Json<TicketView>, ApiError> {
    state
        .registry()
        .dequeue()
        .map(|ticket| Json(ticket.to_view()))
        .map_err(queue_error)
}

/// Look at the head of the line
pub async fn peek(State(state): State<Arc<AppState>>) -> Result<Json<TicketView>, ApiError> {
    state
        .registry()
        .peek()
        .map(|ticket| Json(ticket.to_view()))
        .map_err(queue_error)
}

pub async fn is_empty(State(state): State<Arc<AppState>>) -> Json<IsEmptyResponse> {
    Json(IsEmptyResponse {
        is_empty: state.registry().is_empty(),
    })
}

pub async fn size(State(state): State<Arc<AppState>>) -> Json<SizeResponse> {
    Json(SizeResponse {
        size: state.registry().size(),
    })
}

pub async fn stats(State(state): State<Arc<AppState>>) -> Json<QueueStats> {
    Json(state.registry().stats())
}
