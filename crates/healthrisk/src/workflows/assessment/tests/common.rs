use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::NaiveDate;
use serde_json::{json, Value};

use crate::workflows::assessment::domain::{Company, RawAssessmentRow};
use crate::workflows::assessment::repository::{AssessmentRepository, RepositoryError};
use crate::workflows::assessment::{report_router, PercentBase, ReportService};

pub(super) fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 30).expect("valid date")
}

pub(super) fn company(slug: &str) -> Company {
    Company {
        id: Some(11),
        name: "Acme Industries".to_string(),
        company_type: Some("Manufacturing".to_string()),
        phone_number: Some("+91 98000 00000".to_string()),
        email: Some("hr@acme.test".to_string()),
        city: Some("Pune".to_string()),
        url: slug.to_string(),
    }
}

pub(super) fn response_row(id: u64, gender: &str, pressure: Option<&str>) -> RawAssessmentRow {
    let mut history = vec![json!({"questionId": "PMH3", "response": ["Diabetes"], "score": 8})];
    if let Some(pressure) = pressure {
        history.push(json!({"questionId": "PMH14", "response": pressure, "score": 10}));
    }

    RawAssessmentRow {
        assessment_id: Some(id),
        company_slug: "acme".to_string(),
        employee_info: json!({
            "firstName": format!("Employee{id}"),
            "lastName": "Test",
            "email": format!("employee{id}@acme.test"),
            "gender": gender,
            "dob": "1990-01-15",
            "weight": 72,
            "height": "5.8",
        })
        .to_string(),
        health_assessment: json!([
            {"subHeading": "Personal Medical History", "questions": history},
            {"subHeading": "Health Benefits and Expenditure", "questions": [
                {"questionId": "HBE1", "response": "Yes"},
                {"questionId": "HBE7", "response": "Yes"},
            ]},
        ])
        .to_string(),
        created_at: Some("2024-06-01T08:30:00Z".to_string()),
    }
}

pub(super) fn acme_rows() -> Vec<RawAssessmentRow> {
    vec![
        response_row(1, "Male", Some("140 mmHg or higher / 90 mmHg or higher")),
        response_row(2, "Female", Some("140 mmHg or higher / 90 mmHg or higher")),
        response_row(3, "Female", Some("80-119 mmHg / 60-79 mmHg")),
        response_row(4, "Male", None),
    ]
}

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    pub(super) companies: Arc<Mutex<HashMap<String, Company>>>,
    pub(super) responses: Arc<Mutex<HashMap<String, Vec<RawAssessmentRow>>>>,
}

impl MemoryRepository {
    pub(super) fn with(company: Company, rows: Vec<RawAssessmentRow>) -> Self {
        let repository = Self::default();
        repository
            .responses
            .lock()
            .expect("repository mutex poisoned")
            .insert(company.url.clone(), rows);
        repository
            .companies
            .lock()
            .expect("repository mutex poisoned")
            .insert(company.url.clone(), company);
        repository
    }
}

impl AssessmentRepository for MemoryRepository {
    fn company_by_slug(&self, slug: &str) -> Result<Option<Company>, RepositoryError> {
        let guard = self.companies.lock().expect("repository mutex poisoned");
        Ok(guard.get(slug).cloned())
    }

    fn responses_for_company(&self, slug: &str) -> Result<Vec<RawAssessmentRow>, RepositoryError> {
        let guard = self.responses.lock().expect("repository mutex poisoned");
        Ok(guard.get(slug).cloned().unwrap_or_default())
    }
}

pub(super) struct UnavailableRepository;

impl AssessmentRepository for UnavailableRepository {
    fn company_by_slug(&self, _slug: &str) -> Result<Option<Company>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn responses_for_company(&self, _slug: &str) -> Result<Vec<RawAssessmentRow>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) fn build_service() -> ReportService<MemoryRepository> {
    let repository = MemoryRepository::with(company("acme"), acme_rows());
    ReportService::new(Arc::new(repository), PercentBase::Submitted)
}

pub(super) fn router_with_service(service: ReportService<MemoryRepository>) -> axum::Router {
    report_router(Arc::new(service))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 256 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
