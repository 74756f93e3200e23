use axum::http::StatusCode;
use axum_test::TestServer;
use glimmr_axum::{config::AxumConfig, router};
use glimmr_core::models::{
    CachedPrice, DiamondSpec, GradeDimension, Karat, Material, MaterialComposition, PriceBreakdown,
    ProductRecord, RateSnapshot, RateSnapshotDto,
};
use rstest::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::{Value, json};
use time::macros::datetime;

mod app;
use app::{TestApp, TestCatalog};

fn market() -> RateSnapshotDto {
    RateSnapshot::builder(datetime!(2026-03-02 09:30 UTC))
        .gold_per_gram(dec!(6500))
        .silver_per_gram(dec!(85))
        .diamond_base_rate_per_carat(dec!(50000))
        .grade(GradeDimension::Cut, "round", dec!(1.0))
        .grade(GradeDimension::Color, "D", dec!(1.2))
        .grade(GradeDimension::Clarity, "VS1", dec!(1.0))
}

fn product(id: &str, composition: MaterialComposition) -> ProductRecord {
    ProductRecord {
        id: id.into(),
        name: id.replace('-', " "),
        category: Some("rings".to_string()),
        composition,
        cached_price: None,
    }
}

#[fixture]
fn catalog() -> TestCatalog {
    TestCatalog::new([
        product(
            "aria-22k-ring",
            MaterialComposition::metal(Material::Gold, dec!(10), Some(Karat::K22)).unwrap(),
        ),
        product(
            "lumen-solitaire",
            MaterialComposition::new(
                Material::Platinum,
                dec!(4),
                None,
                Some(DiamondSpec::new(dec!(0.5), "round", "D", "VS1")),
            )
            .unwrap(),
        ),
        product(
            "trillion-pendant",
            MaterialComposition::loose_diamond(DiamondSpec::new(dec!(1), "trillion", "D", "VS1"))
                .unwrap(),
        ),
    ])
}

fn server(app: TestApp) -> TestServer {
    let (router, _) = router(app, &AxumConfig::default());
    TestServer::new(router).unwrap()
}

// Amounts travel as exact JSON numbers, so compare them as decimals.
fn decimal(value: &Value) -> Decimal {
    serde_json::from_value(value.clone()).unwrap()
}

fn gold_ring() -> Value {
    json!({ "material": "gold", "weight": 10, "karat": 22 })
}

#[test_log::test(tokio::test)]
async fn test_health() {
    let server = server(TestApp::new(TestCatalog::default(), None));
    let response = server.get("/health").await;
    response.assert_status_ok();
    response.assert_json(&json!({ "status": "ok" }));
}

#[rstest]
#[test_log::test(tokio::test)]
async fn test_quote_gold_ring(catalog: TestCatalog) {
    let server = server(TestApp::new(catalog, Some(market().build().unwrap())));
    let response = server.post("/quote").json(&gold_ring()).await;
    response.assert_status_ok();

    let breakdown: PriceBreakdown = response.json();
    assert_eq!(breakdown.making_charges, dec!(500));
    assert_eq!(breakdown.diamond_cost, dec!(0));
    assert_eq!(breakdown.final_price, dec!(61886));
}

#[rstest]
#[test_log::test(tokio::test)]
async fn test_quote_missing_rate_is_pending(catalog: TestCatalog) {
    let mut rates = market();
    rates.gold_per_gram = None;
    let server = server(TestApp::new(catalog, Some(rates.build().unwrap())));

    let response = server.post("/quote").json(&gold_ring()).await;
    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);
    response.assert_text("Pricing pending");
}

#[rstest]
#[test_log::test(tokio::test)]
async fn test_quote_without_snapshot_is_pending(catalog: TestCatalog) {
    let server = server(TestApp::new(catalog, None));

    let response = server.post("/quote").json(&gold_ring()).await;
    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);

    let response = server.get("/rates").await;
    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);
    response.assert_text("Pricing pending");
}

#[rstest]
#[case::unknown_grade(json!({
    "material": "diamond",
    "weight": 0,
    "diamond": { "carat": 1, "cut": "trillion", "color": "D", "clarity": "VS1" }
}))]
#[case::negative_weight(json!({ "material": "silver", "weight": -1 }))]
#[case::unknown_material(json!({ "material": "titanium", "weight": 5 }))]
#[case::diamond_without_spec(json!({ "material": "diamond", "weight": 0 }))]
#[case::too_heavy_to_price(serde_json::from_str::<Value>(
    r#"{ "material": "gold", "weight": 1000000000000000000000000000, "karat": 22 }"#
).unwrap())]
#[test_log::test(tokio::test)]
async fn test_quote_rejects_bad_data(catalog: TestCatalog, #[case] body: Value) {
    let server = server(TestApp::new(catalog, Some(market().build().unwrap())));

    let response = server.post("/quote").json(&body).await;
    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    let message = response.text();
    assert!(message.starts_with("invalid composition") || message.starts_with("unknown"));

    let response = server.post("/quote/live").json(&body).await;
    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
}

#[rstest]
#[test_log::test(tokio::test)]
async fn test_live_quote(catalog: TestCatalog) {
    let server = server(TestApp::new(catalog, Some(market().build().unwrap())));

    let response = server
        .post("/quote/live")
        .json(&json!({ "material": "silver", "weight": 20 }))
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["price"]["status"], json!("priced"));
    assert_eq!(decimal(&body["price"]["amount"]), dec!(1700));

    let response = server
        .post("/quote/live")
        .json(&json!({ "material": "platinum", "weight": 2 }))
        .await;
    response.assert_status_ok();
    response.assert_json(&json!({ "price": { "status": "pending" } }));
}

#[rstest]
#[test_log::test(tokio::test)]
async fn test_rates_are_served(catalog: TestCatalog) {
    let server = server(TestApp::new(catalog, Some(market().build().unwrap())));

    let response = server.get("/rates").await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(decimal(&body["goldPerGram"]), dec!(6500));
    assert_eq!(body["timestamp"], json!("2026-03-02T09:30:00Z"));
    assert!(body.get("platinumPerGram").is_none());
}

#[rstest]
#[test_log::test(tokio::test)]
async fn test_listing_never_fails_on_one_product(catalog: TestCatalog) {
    let server = server(TestApp::new(catalog, Some(market().build().unwrap())));

    let response = server.get("/product").await;
    response.assert_status_ok();
    let listing: Vec<Value> = response.json();
    assert_eq!(listing.len(), 3);

    // 6500 × 10 × 22 / 24
    assert_eq!(listing[0]["id"], json!("aria-22k-ring"));
    assert_eq!(listing[0]["material"], json!("gold"));
    assert_eq!(listing[0]["price"]["status"], json!("priced"));

    // no platinum rate in this market
    assert_eq!(listing[1]["price"], json!({ "status": "pending" }));
    // grade missing from the tables
    assert_eq!(listing[2]["price"], json!({ "status": "pending" }));
}

#[rstest]
#[test_log::test(tokio::test)]
async fn test_listing_without_snapshot(catalog: TestCatalog) {
    let server = server(TestApp::new(catalog, None));

    let listing: Vec<Value> = server.get("/product").await.json();
    assert!(
        listing
            .iter()
            .all(|card| card["price"] == json!({ "status": "pending" }))
    );
}

#[rstest]
#[test_log::test(tokio::test)]
async fn test_unknown_product(catalog: TestCatalog) {
    let server = server(TestApp::new(catalog, Some(market().build().unwrap())));

    let response = server.get("/product/nope").await;
    response.assert_status(StatusCode::NOT_FOUND);
}

#[rstest]
#[test_log::test(tokio::test)]
async fn test_detail_prices_and_caches(catalog: TestCatalog) {
    let rates = market().build().unwrap();
    let as_of = rates.timestamp();
    let app = TestApp::new(catalog, Some(rates));
    let server = server(app.clone());

    let response = server.get("/product/aria-22k-ring").await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["price"]["status"], json!("priced"));
    assert_eq!(decimal(&body["price"]["amount"]), dec!(61886));
    assert_eq!(decimal(&body["breakdown"]["finalPrice"]), dec!(61886));
    assert_eq!(body["ratesAsOf"], json!("2026-03-02T09:30:00Z"));

    let cached = app.catalog.record("aria-22k-ring").unwrap().cached_price.unwrap();
    assert_eq!(cached.rates_as_of, as_of);
    assert_eq!(cached.breakdown.final_price, dec!(61886));
}

#[rstest]
#[test_log::test(tokio::test)]
async fn test_detail_reuses_current_cache_only() {
    let rates = market().build().unwrap();
    let mut record = product(
        "aria-22k-ring",
        MaterialComposition::metal(Material::Gold, dec!(10), Some(Karat::K22)).unwrap(),
    );
    let sentinel = PriceBreakdown {
        metal_cost: dec!(1),
        diamond_cost: dec!(0),
        making_charges: dec!(0),
        gst: dec!(0),
        final_price: dec!(1),
    };

    // computed from this very snapshot: served as is
    record.cached_price = Some(CachedPrice {
        breakdown: sentinel.clone(),
        rates_as_of: rates.timestamp(),
    });
    let app = TestApp::new(TestCatalog::new([record.clone()]), Some(rates.clone()));
    let body: Value = server(app).get("/product/aria-22k-ring").await.json();
    assert_eq!(decimal(&body["breakdown"]["finalPrice"]), dec!(1));

    // computed from an older snapshot: recomputed
    record.cached_price = Some(CachedPrice {
        breakdown: sentinel,
        rates_as_of: datetime!(2026-03-01 09:30 UTC),
    });
    let app = TestApp::new(TestCatalog::new([record]), Some(rates));
    let body: Value = server(app).get("/product/aria-22k-ring").await.json();
    assert_eq!(decimal(&body["breakdown"]["finalPrice"]), dec!(61886));
}

#[rstest]
#[test_log::test(tokio::test)]
async fn test_detail_pending(catalog: TestCatalog) {
    let server = server(TestApp::new(catalog, Some(market().build().unwrap())));

    let response = server.get("/product/lumen-solitaire").await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["price"], json!({ "status": "pending" }));
    assert_eq!(body["breakdown"], Value::Null);
    assert_eq!(body["ratesAsOf"], Value::Null);
}

#[test_log::test(tokio::test)]
async fn test_openapi_document() {
    let server = server(TestApp::new(TestCatalog::default(), None));

    let response = server.get("/docs/api.json").await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["info"]["title"], json!("Glimmr Pricing API"));
    let paths: Vec<&String> = body["paths"].as_object().unwrap().keys().collect();
    assert!(paths.iter().any(|path| path.starts_with("/quote")));
    assert!(paths.iter().any(|path| path.ends_with("{product_id}")));
}

#[test_log::test(tokio::test)]
async fn test_cors_origins() {
    use axum::http::{HeaderValue, header::ORIGIN};

    let config = AxumConfig {
        allowed_origins: vec!["https://shop.glimmr.in".to_string()],
        ..Default::default()
    };
    let (router, _) = router(TestApp::new(TestCatalog::default(), None), &config);
    let server = TestServer::new(router).unwrap();

    let response = server
        .get("/health")
        .add_header(ORIGIN, HeaderValue::from_static("https://shop.glimmr.in"))
        .await;
    assert_eq!(
        response.headers()["access-control-allow-origin"],
        "https://shop.glimmr.in"
    );

    let response = server
        .get("/health")
        .add_header(ORIGIN, HeaderValue::from_static("https://elsewhere.example"))
        .await;
    assert!(response.headers().get("access-control-allow-origin").is_none());
}
