use crate::infra::{deserialize_optional_date, AppState};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use chrono::{Local, NaiveDate};
use healthrisk::error::AppError;
use healthrisk::workflows::assessment::{
    compute_report, report_router, AssessmentRepository, Company, CompanyReport, PercentBase,
    RawAssessmentRow, ReportError, ReportOptions, ReportService,
};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tracing::info;

/// Ad-hoc report over rows supplied by the caller instead of the configured store.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ReportRequest {
    pub(crate) company: Company,
    pub(crate) responses: Vec<RawAssessmentRow>,
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub(crate) today: Option<NaiveDate>,
    #[serde(default)]
    pub(crate) percent_base: Option<PercentBase>,
}

pub(crate) fn with_report_routes<R>(service: Arc<ReportService<R>>) -> axum::Router
where
    R: AssessmentRepository + 'static,
{
    let default_base = service.percent_base();
    report_router(service)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route(
            "/api/v1/reports",
            axum::routing::post(move |payload: Json<ReportRequest>| {
                ad_hoc_report_endpoint(default_base, payload)
            }),
        )
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn ad_hoc_report_endpoint(
    default_base: PercentBase,
    Json(payload): Json<ReportRequest>,
) -> Result<Json<CompanyReport>, AppError> {
    let ReportRequest {
        company,
        responses,
        today,
        percent_base,
    } = payload;

    if responses.is_empty() {
        return Err(AppError::Report(ReportError::NoData { slug: company.url }));
    }

    let today = today.unwrap_or_else(|| Local::now().date_naive());
    let options = ReportOptions::new(today).with_percent_base(percent_base.unwrap_or(default_base));
    info!(company = %company.url, rows = responses.len(), "ad-hoc report requested");

    let report = tokio::task::spawn_blocking(move || compute_report(&company, &responses, options))
        .await
        .map_err(|err| AppError::Server(axum::Error::new(err)))?;
    Ok(Json(report))
}
