//! Ticket API handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use counterline_core::{Ticket, TicketView};
use serde::Serialize;
use std::sync::Arc;
use tracing::info;

use crate::state::AppState;

// ============================================================================
// Response Types
// ============================================================================

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

pub type ApiError = (StatusCode, Json<ErrorResponse>);

pub(crate) fn api_error(status: StatusCode, message: impl Into<String>) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
}

fn views(tickets: Vec<Ticket>) -> Json<Vec<TicketView>> {
    Json(tickets.into_iter().map(TicketView::from).collect())
}

// ============================================================================
// Handlers
// ============================================================================

/// Take a new ticket
pub async fn create_ticket(State(state): State<Arc<AppState>>) -> (StatusCode, Json<TicketView>) {
    let ticket = state.registry().create_ticket();
    info!(number = ticket.number(), "Ticket issued");
    (StatusCode::CREATED, Json(ticket.to_view()))
}

/// List waiting tickets, oldest first
pub async fn list_waiting(State(state): State<Arc<AppState>>) -> Json<Vec<TicketView>> {
    views(state.registry().waiting())
}

/// List called tickets
pub async fn list_called(State(state): State<Arc<AppState>>) -> Json<Vec<TicketView>> {
    views(state.registry().called())
}

/// List served tickets
pub async fn list_served(State(state): State<Arc<AppState>>) -> Json<Vec<TicketView>> {
    views(state.registry().served())
}

/// List every ticket: waiting, then called, then served
pub async fn list_all(State(state): State<Arc<AppState>>) -> Json<Vec<TicketView>> {
    views(state.registry().all())
}

/// Get a ticket by number
pub async fn get_ticket(
    State(state): State<Arc<AppState>>,
    Path(number): Path<u64>,
) -> Result<Json<TicketView>, ApiError> {
    state
        .registry()
        .find(number)
        .map(|ticket| Json(ticket.to_view()))
        .ok_or_else(|| api_error(StatusCode::NOT_FOUND, format!("Ticket not found: {}", number)))
}

/// Call the oldest waiting ticket
pub async fn call_next(State(state): State<Arc<AppState>>) -> Result<Json<TicketView>, ApiError> {
    match state.registry().call_next() {
        Some(ticket) => {
            info!(number = ticket.number(), "Ticket called");
            Ok(Json(ticket.to_view()))
        }
        None => Err(api_error(StatusCode::NOT_FOUND, "No waiting ticket")),
    }
}

/// Serve the oldest called ticket
pub async fn serve_next(State(state): State<Arc<AppState>>) -> Result<Json<TicketView>, ApiError> {
    match state.registry().serve_next() {
        Some(ticket) => {
            info!(number = ticket.number(), "Ticket served");
            Ok(Json(ticket.to_view()))
        }
        None => Err(api_error(StatusCode::NOT_FOUND, "No called ticket")),
    }
}

/// Call a specific waiting ticket
pub async fn call_by_number(
    State(state): State<Arc<AppState>>,
    Path(number): Path<u64>,
) -> Result<StatusCode, ApiError> {
    if state.registry().call_by_number(number) {
        info!(number, "Ticket called out of order");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(api_error(
            StatusCode::NOT_FOUND,
            format!("Ticket {} is not waiting", number),
        ))
    }
}

/// Serve a specific called ticket
pub async fn serve_by_number(
    State(state): State<Arc<AppState>>,
    Path(number): Path<u64>,
) -> Result<StatusCode, ApiError> {
    if state.registry().serve_by_number(number) {
        info!(number, "Ticket served out of order");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(api_error(
            StatusCode::NOT_FOUND,
            format!("Ticket {} has not been called", number),
        ))
    }
}
