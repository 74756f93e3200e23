//! REST API endpoints for priced catalog views.
//!
//! Catalog views are never allowed to fail because one product cannot be
//! priced: such products render as "Pricing pending". Data problems are
//! logged for the catalog owner instead of being surfaced to shoppers.

use std::sync::Arc;

use crate::ApiApplication;
use aide::axum::{ApiRouter, routing::get_with};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use glimmr_core::{
    models::{
        CachedPrice, DisplayPrice, Material, MaterialComposition, PriceBreakdown, PricingError,
        ProductId, ProductRecord, RateSnapshot,
    },
    ports::{CatalogRepository as _, Pricer as _},
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use tracing::{Level, event};

/// Path parameter for product-specific endpoints.
#[derive(Deserialize, JsonSchema)]
struct Id {
    /// The catalog identifier of the product
    product_id: ProductId,
}

/// One card in the catalog listing
#[derive(Serialize, JsonSchema)]
struct ProductListing {
    id: ProductId,
    name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    category: Option<String>,
    material: Material,
    /// Live estimate (metal plus diamond)
    price: DisplayPrice,
}

/// A product page
#[derive(Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
struct ProductDetail {
    id: ProductId,
    name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    category: Option<String>,
    composition: MaterialComposition,
    /// Itemized price, absent while pricing is pending
    breakdown: Option<PriceBreakdown>,
    /// Final price, or pending
    price: DisplayPrice,
    /// Timestamp of the snapshot the breakdown was computed from
    #[serde(with = "time::serde::rfc3339::option")]
    #[schemars(schema_with = "optional_time_schema")]
    rates_as_of: Option<OffsetDateTime>,
}

fn optional_time_schema(_: &mut schemars::SchemaGenerator) -> schemars::Schema {
    schemars::json_schema!({
        "type": ["string", "null"],
        "format": "date-time",
    })
}

impl ProductDetail {
    fn new(record: ProductRecord, priced: Option<CachedPrice>) -> Self {
        let (breakdown, rates_as_of) = match priced {
            Some(CachedPrice {
                breakdown,
                rates_as_of,
            }) => (Some(breakdown), Some(rates_as_of)),
            None => (None, None),
        };
        Self {
            id: record.id,
            name: record.name,
            category: record.category,
            composition: record.composition,
            price: breakdown
                .as_ref()
                .map_or(DisplayPrice::Pending, PriceBreakdown::display_price),
            breakdown,
            rates_as_of,
        }
    }
}

/// Creates a router with product-related endpoints.
pub fn router<T: ApiApplication>() -> ApiRouter<T> {
    ApiRouter::new()
        .api_route("/", get_with(list_products::<T>, |op| op.tag("products")))
        .api_route(
            "/{product_id}",
            get_with(get_product::<T>, |op| op.tag("products")),
        )
}

/// Collapse a failed calculation into "pending" for a catalog view.
fn pending_for(product_id: &ProductId, err: PricingError) {
    if err.is_pending() {
        event!(Level::DEBUG, product = product_id.as_str(), err = err.to_string(), "price pending");
    } else {
        event!(
            Level::WARN,
            product = product_id.as_str(),
            err = err.to_string(),
            "catalog product cannot be priced"
        );
    }
}

/// List the catalog with a live price for every product.
///
/// # Returns
///
/// - `200 OK`: Every product, in catalog order
/// - `500 Internal Server Error`: The catalog could not be read
async fn list_products<T: ApiApplication>(
    State(app): State<T>,
) -> Result<Json<Vec<ProductListing>>, (StatusCode, String)> {
    let rates = app.rates();
    let records = app.catalog().list_products().await.map_err(|err| {
        event!(Level::ERROR, err = err.to_string());
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            "failed to list products".to_string(),
        )
    })?;

    let listing = records
        .into_iter()
        .map(|record| {
            let price: DisplayPrice = match rates.as_deref() {
                Some(rates) => app
                    .pricer()
                    .live_unit_price(&record.composition, rates)
                    .unwrap_or_else(|err| {
                        pending_for(&record.id, err);
                        None
                    })
                    .into(),
                None => DisplayPrice::Pending,
            };
            ProductListing {
                material: record.composition.material(),
                id: record.id,
                name: record.name,
                category: record.category,
                price,
            }
        })
        .collect();

    Ok(Json(listing))
}

/// Retrieve a product page with its itemized price.
///
/// A breakdown cached against the current snapshot is served as is; otherwise
/// the price is recomputed and the cache refreshed.
///
/// # Returns
///
/// - `200 OK`: Product data, priced or pending
/// - `404 Not Found`: Product does not exist
/// - `500 Internal Server Error`: The catalog could not be read
async fn get_product<T: ApiApplication>(
    State(app): State<T>,
    Path(Id { product_id }): Path<Id>,
) -> Result<Json<ProductDetail>, (StatusCode, String)> {
    let rates = app.rates();
    let record = app
        .catalog()
        .get_product(&product_id)
        .await
        .map_err(|err| {
            event!(Level::ERROR, err = err.to_string());
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("failed to get product {}", product_id),
            )
        })?
        .ok_or((
            StatusCode::NOT_FOUND,
            format!("unknown product {}", product_id),
        ))?;

    let priced = match rates {
        Some(rates) => price_product(&app, &record, rates).await,
        None => None,
    };

    Ok(Json(ProductDetail::new(record, priced)))
}

async fn price_product<T: ApiApplication>(
    app: &T,
    record: &ProductRecord,
    rates: Arc<RateSnapshot>,
) -> Option<CachedPrice> {
    if let Some(cached) = record
        .cached_price
        .as_ref()
        .filter(|cached| cached.is_current(rates.timestamp()))
    {
        return Some(cached.clone());
    }

    let breakdown = match app.pricer().compute_price(&record.composition, &rates) {
        Ok(breakdown) => breakdown,
        Err(err) => {
            pending_for(&record.id, err);
            return None;
        }
    };

    let fresh = CachedPrice {
        breakdown,
        rates_as_of: rates.timestamp(),
    };
    // display cache only, the fresh price is served either way
    if let Err(err) = app.catalog().store_price(&record.id, fresh.clone()).await {
        event!(
            Level::ERROR,
            product = record.id.as_str(),
            err = err.to_string(),
            "failed to cache price"
        );
    }
    Some(fresh)
}
