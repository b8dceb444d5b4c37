use super::domain::{Company, RawAssessmentRow};

/// Read-only data access for reporting, so the service can run against any store.
pub trait AssessmentRepository: Send + Sync {
    fn company_by_slug(&self, slug: &str) -> Result<Option<Company>, RepositoryError>;
    fn responses_for_company(&self, slug: &str) -> Result<Vec<RawAssessmentRow>, RepositoryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
