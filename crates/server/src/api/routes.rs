use axum::{
    http::{header, HeaderValue, Method},
    middleware,
    routing::{get, post},
    Router,
};
use counterline_core::CorsConfig;
use std::sync::Arc;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::warn;

use super::{handlers, middleware::metrics_middleware, queue, tickets};
use crate::state::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    let cors = cors_layer(&state.config().cors);

    // API routes
    let api_routes = Router::new()
        .route("/config", get(handlers::get_config))
        // Tickets
        .route("/tickets", post(tickets::create_ticket).get(tickets::list_waiting))
        .route("/tickets/all", get(tickets::list_all))
        .route("/tickets/called", get(tickets::list_called))
        .route("/tickets/served", get(tickets::list_served))
        .route("/tickets/call", post(tickets::call_next))
        .route("/tickets/serve", post(tickets::serve_next))
        .route("/tickets/{number}", get(tickets::get_ticket))
        .route("/tickets/{number}/call", post(tickets::call_by_number))
        .route("/tickets/{number}/serve", post(tickets::serve_by_number))
        // Raw queue primitives
        .route("/queue/enqueue", post(queue::enqueue))
        .route("/queue/dequeue", post(queue::dequeue))
        .route("/queue/peek", get(queue::peek))
        .route("/queue/isEmpty", get(queue::is_empty))
        .route("/queue/size", get(queue::size))
        .route("/queue/stats", get(queue::stats));

    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health))
        .route("/metrics", get(handlers::metrics))
        .nest("/api", api_routes)
        .with_state(state)
        .layer(middleware::from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    if config.allows_any() {
        return layer.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();
    layer.allow_origin(AllowOrigin::list(origins))
}
