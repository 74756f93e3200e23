//! REST API endpoints for pricing arbitrary compositions.
//!
//! These are the storefront's "what would this cost" calls: the body is a
//! material composition, priced against the current snapshot under the
//! configured policy. Nothing is read from or written to the catalog.

use crate::{ApiApplication, pending, pricing_failure};
use aide::axum::{ApiRouter, routing::post_with};
use axum::{Json, extract::State, http::StatusCode};
use glimmr_core::{
    models::{
        DisplayPrice, MaterialComposition, MaterialCompositionDto, PriceBreakdown, PricingError,
    },
    ports::Pricer as _,
};
use schemars::JsonSchema;
use serde::Serialize;

/// Creates a router with quote endpoints.
pub fn router<T: ApiApplication>() -> ApiRouter<T> {
    ApiRouter::new()
        .api_route("/", post_with(quote::<T>, |op| op.tag("pricing")))
        .api_route("/live", post_with(live_quote::<T>, |op| op.tag("pricing")))
}

/// The live estimate for a composition
#[derive(Serialize, JsonSchema)]
struct LiveQuote {
    /// Metal plus diamond value, or pending
    price: DisplayPrice,
}

fn validate(body: MaterialCompositionDto) -> Result<MaterialComposition, (StatusCode, String)> {
    MaterialComposition::try_from(body).map_err(|err| pricing_failure(PricingError::from(err)))
}

/// Compute the itemized price of a composition.
///
/// # Returns
///
/// - `200 OK`: The full breakdown
/// - `422 Unprocessable Entity`: The composition is invalid, too large to
///   price or names an unknown diamond grade
/// - `503 Service Unavailable`: A rate the composition needs is unavailable
async fn quote<T: ApiApplication>(
    State(app): State<T>,
    Json(body): Json<MaterialCompositionDto>,
) -> Result<Json<PriceBreakdown>, (StatusCode, String)> {
    let composition = validate(body)?;
    let rates = app.rates().ok_or_else(pending)?;
    app.pricer()
        .compute_price(&composition, &rates)
        .map(Json)
        .map_err(pricing_failure)
}

/// Compute the live (pre-charges, pre-tax) estimate of a composition.
///
/// A composition that cannot be priced right now is reported as pending
/// rather than as an error, mirroring what a listing card shows.
///
/// # Returns
///
/// - `200 OK`: The estimate, or pending
/// - `422 Unprocessable Entity`: The composition is invalid or names an
///   unknown diamond grade
async fn live_quote<T: ApiApplication>(
    State(app): State<T>,
    Json(body): Json<MaterialCompositionDto>,
) -> Result<Json<LiveQuote>, (StatusCode, String)> {
    let composition = validate(body)?;
    let Some(rates) = app.rates() else {
        return Ok(Json(LiveQuote {
            price: DisplayPrice::Pending,
        }));
    };
    let price = app
        .pricer()
        .live_unit_price(&composition, &rates)
        .map_err(pricing_failure)?;
    Ok(Json(LiveQuote {
        price: price.into(),
    }))
}
