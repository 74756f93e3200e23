//! REST API endpoint exposing the market rates currently in use.

use std::sync::Arc;

use crate::{ApiApplication, pending};
use aide::axum::{ApiRouter, routing::get_with};
use axum::{Json, extract::State, http::StatusCode};
use glimmr_core::models::RateSnapshot;

/// Creates a router with rate-related endpoints.
pub fn router<T: ApiApplication>() -> ApiRouter<T> {
    ApiRouter::new().api_route("/", get_with(get_rates::<T>, |op| op.tag("rates")))
}

/// Retrieve the current rate snapshot.
///
/// # Returns
///
/// - `200 OK`: The snapshot every price is currently computed from
/// - `503 Service Unavailable`: No fresh snapshot is available
async fn get_rates<T: ApiApplication>(
    State(app): State<T>,
) -> Result<Json<Arc<RateSnapshot>>, (StatusCode, String)> {
    app.rates().map(Json).ok_or_else(pending)
}
