use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::repository::AssessmentRepository;
use super::service::{ReportError, ReportService};
use crate::error::AppError;

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ReportQuery {
    #[serde(default)]
    today: Option<NaiveDate>,
}

impl ReportQuery {
    fn today(&self) -> NaiveDate {
        self.today.unwrap_or_else(|| Local::now().date_naive())
    }
}

/// Router exposing the company and employee report endpoints.
pub fn report_router<R>(service: Arc<ReportService<R>>) -> Router
where
    R: AssessmentRepository + 'static,
{
    Router::new()
        .route(
            "/api/v1/companies/:slug/report",
            get(company_report_handler::<R>),
        )
        .route(
            "/api/v1/companies/:slug/health-metrics",
            get(health_metrics_handler::<R>),
        )
        .route(
            "/api/v1/companies/:slug/needs",
            get(employee_needs_handler::<R>),
        )
        .route(
            "/api/v1/companies/:slug/assessments/:assessment_id",
            get(employee_report_handler::<R>),
        )
        .with_state(service)
}

/// Runs the CPU-bound report work off the async executor.
async fn blocking<T, F>(work: F) -> Response
where
    T: Serialize + Send + 'static,
    F: FnOnce() -> Result<T, ReportError> + Send + 'static,
{
    match tokio::task::spawn_blocking(work).await {
        Ok(Ok(body)) => (StatusCode::OK, axum::Json(body)).into_response(),
        Ok(Err(error)) => AppError::from(error).into_response(),
        Err(join_error) => {
            let payload = json!({ "error": join_error.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn company_report_handler<R>(
    State(service): State<Arc<ReportService<R>>>,
    Path(slug): Path<String>,
    Query(query): Query<ReportQuery>,
) -> Response
where
    R: AssessmentRepository + 'static,
{
    let today = query.today();
    blocking(move || service.company_report(&slug, today)).await
}

pub(crate) async fn health_metrics_handler<R>(
    State(service): State<Arc<ReportService<R>>>,
    Path(slug): Path<String>,
    Query(query): Query<ReportQuery>,
) -> Response
where
    R: AssessmentRepository + 'static,
{
    let today = query.today();
    blocking(move || service.health_metrics(&slug, today)).await
}

pub(crate) async fn employee_needs_handler<R>(
    State(service): State<Arc<ReportService<R>>>,
    Path(slug): Path<String>,
    Query(query): Query<ReportQuery>,
) -> Response
where
    R: AssessmentRepository + 'static,
{
    let today = query.today();
    blocking(move || service.employee_needs(&slug, today)).await
}

pub(crate) async fn employee_report_handler<R>(
    State(service): State<Arc<ReportService<R>>>,
    Path((slug, assessment_id)): Path<(String, u64)>,
    Query(query): Query<ReportQuery>,
) -> Response
where
    R: AssessmentRepository + 'static,
{
    let today = query.today();
    blocking(move || service.employee_report(&slug, assessment_id, today)).await
}
