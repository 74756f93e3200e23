//! The generated OpenAPI document and a browsable rendering of it.

use std::sync::Arc;

use aide::{
    axum::{ApiRouter, IntoApiResponse, routing::get},
    openapi::{OpenApi, Tag},
    transform::TransformOpenApi,
};
use axum::{
    Extension, Json,
    response::{Html, IntoResponse},
};

const DOCS_PAGE: &str = r#"<!doctype html>
<html>
  <head>
    <meta charset="utf-8">
    <title>Glimmr Pricing API</title>
    <script type="module" src="https://unpkg.com/rapidoc@9.3.8/dist/rapidoc-min.js"></script>
  </head>
  <body>
    <rapi-doc spec-url="/docs/api.json"
        render-style="focused"
        allow-spec-file-download="true"
        show-method-in-nav-bar="as-colored-text"
    ></rapi-doc>
  </body>
</html>"#;

/// `/docs` (RapiDoc) and `/docs/api.json` (the raw document).
pub(crate) fn docs_routes() -> ApiRouter {
    ApiRouter::new()
        .route("/", get(docs_page))
        .route("/api.json", get(openapi_json))
}

async fn docs_page() -> impl IntoApiResponse {
    Html(DOCS_PAGE).into_response()
}

async fn openapi_json(Extension(api): Extension<Arc<OpenApi>>) -> impl IntoApiResponse {
    Json(api).into_response()
}

fn tag(name: &str, description: &str) -> Tag {
    Tag {
        name: name.into(),
        description: Some(description.into()),
        ..Default::default()
    }
}

/// Document-level metadata.
pub(crate) fn api_docs(api: TransformOpenApi) -> TransformOpenApi {
    api.title("Glimmr Pricing API")
        .summary("Live jewelry prices from market metal and diamond rates.")
        .description(
            "Prices material compositions against the rate snapshot currently in force \
             and serves priced catalog views. A price that cannot be computed is \
             reported as pending, never as zero.",
        )
        .version(env!("CARGO_PKG_VERSION"))
        .tag(tag("pricing", "Quote arbitrary compositions"))
        .tag(tag("products", "Catalog views with live prices"))
        .tag(tag("rates", "The market rate snapshot in use"))
}
