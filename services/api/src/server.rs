use crate::cli::ServeArgs;
use crate::infra::{load_catalog, AppState};
use crate::routes::with_advisor_routes;
use advisor::config::AppConfig;
use advisor::error::AppError;
use advisor::telemetry;
use advisor::workflows::recommendation::{RecommendationService, RecommendationStores};
use advisor::workflows::roadmap::RoadmapService;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
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

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let catalog = Arc::new(load_catalog(config.catalog.seed_path.as_deref())?);
    let recommendation_service = Arc::new(RecommendationService::new(
        RecommendationStores::shared(catalog.clone()),
        config.pipeline,
    ));
    let roadmap_service = Arc::new(RoadmapService::new(catalog));

    let app = with_advisor_routes(recommendation_service, roadmap_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        top_categories = config.pipeline.top_category_limit,
        domain_limit = config.pipeline.domain_limit,
        "pathway advisor ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
