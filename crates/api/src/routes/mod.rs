pub mod health;

use axum::routing::{get, post};
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /leads                     search by company, or list recent (GET)
/// /leads/calendly-status     record a Calendly booking (POST)
/// /leads/{id}                get one lead (GET)
/// /analyze                   analyze a website (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/leads", get(handlers::leads::list_leads))
        .route(
            "/leads/calendly-status",
            post(handlers::calendly::update_calendly_status),
        )
        .route("/leads/{id}", get(handlers::leads::get_lead))
        .route("/analyze", post(handlers::analysis::analyze_url))
}
