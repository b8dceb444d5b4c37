use crate::cli::ServeArgs;
use crate::demo::synthetic_dataset;
use crate::infra::{load_dataset, AppState, DatasetRepository};
use crate::routes::with_report_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use healthrisk::config::{AppConfig, AppEnvironment};
use healthrisk::error::AppError;
use healthrisk::telemetry;
use healthrisk::workflows::assessment::ReportService;
use healthrisk::workflows::intake::AssessmentDataset;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::{info, warn};

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

    let dataset = match load_dataset(None, None, Some(&config.reporting))? {
        Some(dataset) => dataset,
        None if config.environment == AppEnvironment::Development => {
            warn!("no dataset configured; serving the synthetic demo company");
            synthetic_dataset()
        }
        None => {
            warn!("no dataset configured; only ad-hoc reports will return data");
            AssessmentDataset::default()
        }
    };

    let repository = Arc::new(DatasetRepository::new(dataset));
    let service = Arc::new(ReportService::new(
        repository,
        config.reporting.percent_base,
    ));

    let app = with_report_routes(service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        percent_base = %config.reporting.percent_base,
        "health risk report service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
