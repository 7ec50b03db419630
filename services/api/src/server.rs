use crate::cli::ServeArgs;
use crate::infra::{build_commerce, load_catalog, AppState};
use crate::routes::with_storefront_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use longevity_market::config::AppConfig;
use longevity_market::error::AppError;
use longevity_market::integrations::PartnerFeeds;
use longevity_market::telemetry;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let catalog = Arc::new(load_catalog(&config.catalog)?);
    let feeds = Arc::new(PartnerFeeds::from_credentials(&config.vendors));
    let commerce = build_commerce(&config, Arc::clone(&catalog));

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
        catalog: Arc::clone(&catalog),
        feeds,
        affiliates: Arc::new(config.vendors.affiliate_settings()),
    };

    let app = with_storefront_routes(commerce)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        products = catalog.len(),
        "longevity marketplace ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
