//! Loads company and assessment-response exports so reports can run without a database.

mod parser;

use crate::workflows::assessment::{Company, RawAssessmentRow};
use std::fs::File;
use std::io::Read;
use std::path::Path;

#[derive(Debug)]
pub enum ImportError {
    Io(std::io::Error),
    Csv(csv::Error),
}

impl std::fmt::Display for ImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ImportError::Io(err) => write!(f, "failed to read dataset export: {}", err),
            ImportError::Csv(err) => write!(f, "invalid dataset CSV data: {}", err),
        }
    }
}

impl std::error::Error for ImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ImportError::Io(err) => Some(err),
            ImportError::Csv(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for ImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for ImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

/// Companies and their raw submissions, as exported from the relational store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssessmentDataset {
    pub companies: Vec<Company>,
    pub responses: Vec<RawAssessmentRow>,
}

impl AssessmentDataset {
    pub fn company(&self, slug: &str) -> Option<&Company> {
        self.companies.iter().find(|company| company.url == slug)
    }

    /// Rows for `slug`, in export order.
    pub fn responses_for(&self, slug: &str) -> Vec<RawAssessmentRow> {
        self.responses
            .iter()
            .filter(|row| row.company_slug == slug)
            .cloned()
            .collect()
    }
}

pub struct CsvDatasetImporter;

impl CsvDatasetImporter {
    pub fn from_paths<C: AsRef<Path>, A: AsRef<Path>>(
        companies: C,
        responses: A,
    ) -> Result<AssessmentDataset, ImportError> {
        let companies = File::open(companies)?;
        let responses = File::open(responses)?;
        Self::from_readers(companies, responses)
    }

    pub fn from_readers<C: Read, A: Read>(
        companies: C,
        responses: A,
    ) -> Result<AssessmentDataset, ImportError> {
        Ok(AssessmentDataset {
            companies: parser::parse_companies(companies)?,
            responses: parser::parse_responses(responses)?,
        })
    }
}
