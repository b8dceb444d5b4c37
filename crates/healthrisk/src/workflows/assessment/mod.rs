//! Health-risk assessment engine: parses stored questionnaire rows, classifies answers,
//! scores sections and rolls a company's employees up into a report.

pub mod classification;
pub mod domain;
pub mod metrics;
mod normalizer;
pub mod parser;
pub mod population;
pub mod report;
pub mod repository;
pub mod router;
pub mod scoring;
pub mod service;
pub mod tables;

#[cfg(test)]
mod tests;

pub use classification::{
    BloodPressureCategory, BmiCategory, CholesterolCategory, GlucoseCategory, Reading,
    Satisfaction,
};
pub use domain::{
    AssessmentRecord, Company, EmployeeInfo, Gender, HealthAssessment, Height, HeightError,
    QuestionCode, RawAssessmentRow, RecordParseError, Response, Section, SectionKind,
};
pub use metrics::{age_on, compute_employee_metrics, compute_metrics, EmployeeMetrics};
pub use population::{Cohort, PercentBase};
pub use report::{compute_report, CompanyReport, EmployeeReport, ReportOptions};
pub use repository::{AssessmentRepository, RepositoryError};
pub use router::report_router;
pub use scoring::{RiskBand, SectionScore};
pub use service::{ReportError, ReportService};
