#![warn(missing_docs)]
#![doc = include_str!("../README.md")]

mod product_routes;
mod quote_routes;
mod rate_routes;

use aide::{
    axum::{ApiRouter, routing::get},
    openapi::OpenApi,
};
use axum::{Extension, Json, http::StatusCode};
use glimmr_core::{
    models::{DisplayPrice, PricingError},
    ports::Application,
};
use schemars::JsonSchema;
use serde::Serialize;
use std::sync::Arc;
use tracing::{Level, event};

mod openapi;
use openapi::{api_docs, docs_routes};

pub mod config;
use config::AxumConfig;

/// Response for the health check endpoint
#[derive(Serialize, JsonSchema)]
#[schemars(inline)]
struct HealthResponse {
    status: String,
}

/// Simple health check endpoint
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

/// Construct a full API router with the given state.
///
/// The generated OpenAPI document is returned alongside the router so callers
/// can export it without serving.
pub fn router<T: ApiApplication>(state: T, config: &AxumConfig) -> (axum::Router, Arc<OpenApi>) {
    let mut api = OpenApi::default();
    let router = ApiRouter::new()
        .api_route("/health", get(health_check))
        .nest("/rates", rate_routes::router())
        .nest("/quote", quote_routes::router())
        .nest("/product", product_routes::router())
        .nest_api_service("/docs", docs_routes())
        .finish_api_with(&mut api, api_docs);

    // shared by every docs request; cloning the document itself is expensive
    let api = Arc::new(api);

    let router = router
        .layer(Extension(api.clone()))
        .layer(config.cors())
        .with_state(state);

    (router, api)
}

/// Starts the HTTP server with the provided configuration
pub async fn start_server<T: ApiApplication>(
    config: AxumConfig,
    app: T,
) -> Result<(), std::io::Error> {
    let listener = tokio::net::TcpListener::bind(config.bind_address).await?;

    tracing::info!("Listening for requests on {}", listener.local_addr()?);

    let (service, _) = router(app, &config);
    axum::serve(listener, service).await
}

/// Everything axum needs from shared state, collected into one bound.
///
/// Any [`Application`] whose ports are thread-safe qualifies through the
/// blanket implementation below.
pub trait ApiApplication:
    Clone + Send + Sync + 'static + Application<Catalog: Send + Sync + 'static, Pricer: Send + Sync + 'static>
{
}

impl<T> ApiApplication for T where
    T: Clone
        + Send
        + Sync
        + 'static
        + Application<Catalog: Send + Sync + 'static, Pricer: Send + Sync + 'static>
{
}

/// The rejection used whenever a price is temporarily unavailable.
pub(crate) fn pending() -> (StatusCode, String) {
    (StatusCode::SERVICE_UNAVAILABLE, DisplayPrice::Pending.to_string())
}

/// Map a pricing failure onto the HTTP contract: missing rates are "pending",
/// everything else is a data problem the caller has to fix.
pub(crate) fn pricing_failure(err: PricingError) -> (StatusCode, String) {
    if err.is_pending() {
        event!(Level::INFO, err = err.to_string(), "pricing pending");
        pending()
    } else {
        event!(Level::WARN, err = err.to_string(), "unpriceable composition");
        (StatusCode::UNPROCESSABLE_ENTITY, err.to_string())
    }
}
