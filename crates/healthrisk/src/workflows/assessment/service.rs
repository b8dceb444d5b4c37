use std::sync::Arc;

use chrono::NaiveDate;

use super::domain::{Company, RawAssessmentRow, RecordParseError};
use super::parser::parse_row;
use super::population::{employee_needs, health_metrics, Cohort, EmployeeNeeds, HealthData, PercentBase};
use super::report::{compute_report, employee_report, CompanyReport, EmployeeReport, ReportOptions};
use super::repository::{AssessmentRepository, RepositoryError};

/// Loads a company's rows through the repository and hands them to the report engine.
pub struct ReportService<R> {
    repository: Arc<R>,
    percent_base: PercentBase,
}

impl<R> ReportService<R>
where
    R: AssessmentRepository + 'static,
{
    pub fn new(repository: Arc<R>, percent_base: PercentBase) -> Self {
        Self {
            repository,
            percent_base,
        }
    }

    pub fn percent_base(&self) -> PercentBase {
        self.percent_base
    }

    fn load(&self, slug: &str) -> Result<(Company, Vec<RawAssessmentRow>), ReportError> {
        let company = self
            .repository
            .company_by_slug(slug)?
            .ok_or_else(|| ReportError::CompanyNotFound {
                slug: slug.to_string(),
            })?;

        let rows = self.repository.responses_for_company(slug)?;
        if rows.is_empty() {
            return Err(ReportError::NoData {
                slug: slug.to_string(),
            });
        }

        Ok((company, rows))
    }

    fn cohort(&self, rows: &[RawAssessmentRow], today: NaiveDate) -> Cohort {
        Cohort::from_rows(rows, today).with_percent_base(self.percent_base)
    }

    /// Full company report, recomputed on every call.
    pub fn company_report(
        &self,
        slug: &str,
        today: NaiveDate,
    ) -> Result<CompanyReport, ReportError> {
        let (company, rows) = self.load(slug)?;
        let options = ReportOptions::new(today).with_percent_base(self.percent_base);
        Ok(compute_report(&company, &rows, options))
    }

    pub fn health_metrics(&self, slug: &str, today: NaiveDate) -> Result<HealthData, ReportError> {
        let (_, rows) = self.load(slug)?;
        Ok(health_metrics(&self.cohort(&rows, today)))
    }

    pub fn employee_needs(
        &self,
        slug: &str,
        today: NaiveDate,
    ) -> Result<EmployeeNeeds, ReportError> {
        let (company, rows) = self.load(slug)?;
        Ok(employee_needs(&company, &self.cohort(&rows, today)))
    }

    /// Individual report for one stored submission of the company.
    pub fn employee_report(
        &self,
        slug: &str,
        assessment_id: u64,
        today: NaiveDate,
    ) -> Result<EmployeeReport, ReportError> {
        let (company, rows) = self.load(slug)?;
        let row = rows
            .iter()
            .find(|row| row.assessment_id == Some(assessment_id))
            .ok_or_else(|| ReportError::AssessmentNotFound {
                slug: slug.to_string(),
                assessment_id,
            })?;

        let record = parse_row(row).map_err(|source| ReportError::UnreadableAssessment {
            assessment_id,
            source,
        })?;
        Ok(employee_report(&company, &record, today))
    }
}

/// Error raised by the report service.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("company '{slug}' not found")]
    CompanyNotFound { slug: String },
    #[error("no employees found for company '{slug}'")]
    NoData { slug: String },
    #[error("assessment {assessment_id} not found for company '{slug}'")]
    AssessmentNotFound { slug: String, assessment_id: u64 },
    #[error("assessment {assessment_id} could not be read")]
    UnreadableAssessment {
        assessment_id: u64,
        #[source]
        source: RecordParseError,
    },
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl ReportError {
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::CompanyNotFound { .. }
                | Self::NoData { .. }
                | Self::AssessmentNotFound { .. }
                | Self::Repository(RepositoryError::NotFound)
        )
    }
}
