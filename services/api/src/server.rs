use crate::cli::ServeArgs;
use crate::demo::sample_catalog;
use crate::infra::{AppState, InMemoryItemCatalog};
use crate::routes::with_suggestion_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use suggestion_engine::catalog::CatalogImporter;
use suggestion_engine::config::AppConfig;
use suggestion_engine::error::AppError;
use suggestion_engine::suggestions::SuggestionService;
use suggestion_engine::telemetry;
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

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let catalog = match args.catalog.take() {
        Some(path) => InMemoryItemCatalog::from_items(CatalogImporter::from_path(&path)?),
        None => sample_catalog()?,
    };
    info!(items = catalog.len(), "catalog loaded");

    let suggestion_service = Arc::new(SuggestionService::new(Arc::new(catalog), config.scoring));

    let app = with_suggestion_routes(suggestion_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "suggestion engine ready");

    axum::serve(listener, app).await?;
    Ok(())
}
