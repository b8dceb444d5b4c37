use chrono::NaiveDate;
use healthrisk::config::{ConfigError, ReportingConfig};
use healthrisk::error::AppError;
use healthrisk::workflows::assessment::{
    AssessmentRepository, Company, PercentBase, RawAssessmentRow, RepositoryError,
};
use healthrisk::workflows::intake::{AssessmentDataset, CsvDatasetImporter};
use metrics_exporter_prometheus::PrometheusHandle;
use serde::Deserialize;
use std::path::PathBuf;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Serves reports from a dataset loaded once at startup.
#[derive(Default, Clone)]
pub(crate) struct DatasetRepository {
    dataset: Arc<AssessmentDataset>,
}

impl DatasetRepository {
    pub(crate) fn new(dataset: AssessmentDataset) -> Self {
        Self {
            dataset: Arc::new(dataset),
        }
    }
}

impl AssessmentRepository for DatasetRepository {
    fn company_by_slug(&self, slug: &str) -> Result<Option<Company>, RepositoryError> {
        Ok(self.dataset.company(slug).cloned())
    }

    fn responses_for_company(&self, slug: &str) -> Result<Vec<RawAssessmentRow>, RepositoryError> {
        Ok(self.dataset.responses_for(slug))
    }
}

/// Loads the CSV exports named on the command line, falling back to the configured pair.
pub(crate) fn load_dataset(
    companies: Option<PathBuf>,
    responses: Option<PathBuf>,
    reporting: Option<&ReportingConfig>,
) -> Result<Option<AssessmentDataset>, AppError> {
    let paths = match (companies, responses) {
        (Some(companies), Some(responses)) => Some((companies, responses)),
        (None, None) => reporting
            .and_then(|config| config.dataset.as_ref())
            .map(|paths| (paths.companies.clone(), paths.responses.clone())),
        _ => {
            return Err(AppError::Config(ConfigError::IncompleteDataset))
        }
    };

    let Some((companies, responses)) = paths else {
        return Ok(None);
    };

    let dataset = CsvDatasetImporter::from_paths(&companies, &responses)?;
    info!(
        companies = dataset.companies.len(),
        responses = dataset.responses.len(),
        source = %companies.display(),
        "assessment dataset loaded"
    );
    Ok(Some(dataset))
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

pub(crate) fn parse_percent_base(raw: &str) -> Result<PercentBase, String> {
    raw.parse::<PercentBase>()
        .map_err(|value| format!("expected 'submitted' or 'parsed', got '{value}'"))
}

pub(crate) fn deserialize_optional_date<'de, D>(
    deserializer: D,
) -> Result<Option<NaiveDate>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    opt.map(|value| parse_date(&value).map_err(serde::de::Error::custom))
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn dataset() -> AssessmentDataset {
        AssessmentDataset {
            companies: vec![Company {
                id: Some(1),
                name: "Acme".to_string(),
                company_type: None,
                phone_number: None,
                email: None,
                city: None,
                url: "acme".to_string(),
            }],
            responses: vec![RawAssessmentRow {
                assessment_id: Some(9),
                company_slug: "acme".to_string(),
                employee_info: "{}".to_string(),
                health_assessment: "[]".to_string(),
                created_at: None,
            }],
        }
    }

    #[test]
    fn repository_answers_from_the_dataset() {
        let repository = DatasetRepository::new(dataset());
        assert!(repository.company_by_slug("acme").expect("lookup").is_some());
        assert!(repository.company_by_slug("globex").expect("lookup").is_none());
        assert_eq!(repository.responses_for_company("acme").expect("rows").len(), 1);
        assert!(repository.responses_for_company("globex").expect("rows").is_empty());
    }

    #[test]
    fn parse_date_reports_the_bad_value() {
        let err = parse_date("30/06/2024").expect_err("wrong format");
        assert!(err.contains("30/06/2024"));
        assert_eq!(
            parse_date(" 2024-06-30 ").expect("valid"),
            NaiveDate::from_ymd_opt(2024, 6, 30).expect("valid date")
        );
    }

    #[test]
    fn percent_base_parser_explains_choices() {
        assert_eq!(parse_percent_base("Parsed"), Ok(PercentBase::Parsed));
        let err = parse_percent_base("everyone").expect_err("unknown base");
        assert!(err.contains("submitted"));
    }

    #[test]
    fn load_dataset_requires_both_paths() {
        let result = load_dataset(Some(PathBuf::from("companies.csv")), None, None);
        assert!(matches!(result, Err(AppError::Config(_))));
        assert!(load_dataset(None, None, None).expect("nothing configured").is_none());
    }

    #[test]
    fn load_dataset_reads_csv_exports() {
        let dir = std::env::temp_dir().join(format!("healthrisk-infra-{}", std::process::id()));
        std::fs::create_dir_all(&dir).expect("temp dir");
        let companies = dir.join("companies.csv");
        let responses = dir.join("responses.csv");
        std::fs::File::create(&companies)
            .and_then(|mut file| file.write_all(b"id,name,url\n1,Acme,acme\n"))
            .expect("write companies");
        std::fs::File::create(&responses)
            .and_then(|mut file| {
                file.write_all(
                    b"id,company_slug,employee_info,health_assessment,created_at\n4,acme,{},[],\n",
                )
            })
            .expect("write responses");

        let dataset = load_dataset(Some(companies), Some(responses), None)
            .expect("loads")
            .expect("dataset present");
        assert_eq!(dataset.companies.len(), 1);
        assert_eq!(dataset.responses_for("acme").len(), 1);
        std::fs::remove_dir_all(&dir).ok();
    }
}
