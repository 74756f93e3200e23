use std::{convert::Infallible, fs::File, sync::Arc};

use glimmr_axum::{router, start_server};
use glimmr_pricing::PriceCalculator;
use glimmrd::{
    AppConfig, CatalogConfig, Cli, RateFeedConfig,
    catalog::MemoryCatalog,
    impls::GlimmrApp,
    rates::{RateBoard, refresh},
};
use time::OffsetDateTime;
use tokio::select;
use tracing::{Level, event};
use tracing_subscriber::{layer::SubscriberExt as _, util::SubscriberInitExt as _};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Libraries only emit `tracing` events; the binary decides where they go.
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::import()?;

    let AppConfig {
        server,
        pricing,
        rates,
        catalog,
    } = AppConfig::load(&cli)?;
    let RateFeedConfig {
        source,
        schedule,
        max_age,
    } = rates;

    let catalog = match catalog {
        CatalogConfig { path: Some(path) } => MemoryCatalog::load(&path)?,
        CatalogConfig { path: None } => MemoryCatalog::default(),
    };

    let (publisher, board) = RateBoard::new(max_age);
    let app = GlimmrApp {
        catalog: Arc::new(catalog),
        pricer: PriceCalculator::new(pricing),
        rates: board,
    };

    // If requested, dump the schema and exit.
    if let Some(path) = cli.schema {
        let schema = router(app, &server).1;
        serde_json::to_writer_pretty(File::create(path)?, &schema)?;
        return Ok(());
    }

    // We always run the server task.
    let server_task = tokio::spawn(async move { start_server(server, app).await });

    // Without a feed every price stays pending, but the catalog is still served
    let Some(source) = source else {
        event!(Level::WARN, "no rate source configured, all prices will be pending");
        server_task.await??;
        return Ok(());
    };
    let source = source.build()?;

    let feed_task = tokio::spawn(async move {
        let f = async move |_: OffsetDateTime| {
            refresh(&source, &publisher).await;
            Ok::<(), Infallible>(())
        };
        schedule.schedule(f).await
    });

    select! {
        r = server_task => r??,
        r = feed_task => r??,
    }

    Ok(())
}
