//! Company-wide rollups. Every aggregator reads a parsed [`Cohort`] and is independently
//! callable; none depends on another's output.

mod benefits;
mod conditions;
mod demographics;
mod needs;
mod risk;
mod women;

pub use benefits::{
    expenses_chart, satisfaction_levels, services_benefit, ExpensesChart, SatisfactionLevels,
    ServiceUsage,
};
pub use conditions::{condition_prevalence, health_metrics, HealthData};
pub use demographics::{age_distribution, bmi_distribution, gender_counts, GenderCounts};
pub use needs::{employee_needs, EmployeeNeeds, NeedEntry};
pub use risk::{risk_levels, section_wise_risk_distribution, SectionAverage, SectionWiseRisk};
pub use women::{woman_health_chart, WomanHealthChart};

use super::domain::{AssessmentRecord, RawAssessmentRow};
use super::metrics::{compute_metrics, EmployeeMetrics};
use super::parser::parse_row;
use chrono::NaiveDate;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use tracing::warn;

/// Which row count percentages divide by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PercentBase {
    /// Every fetched row, including rows that failed to parse.
    #[default]
    Submitted,
    /// Only rows that parsed.
    Parsed,
}

impl PercentBase {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Submitted => "submitted",
            Self::Parsed => "parsed",
        }
    }
}

impl fmt::Display for PercentBase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PercentBase {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "submitted" => Ok(Self::Submitted),
            "parsed" => Ok(Self::Parsed),
            other => Err(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CohortMember {
    pub record: AssessmentRecord,
    pub metrics: EmployeeMetrics,
}

/// A stored row that could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRow {
    pub index: usize,
    pub assessment_id: Option<u64>,
    pub reason: String,
}

/// One company's rows, parsed once and evaluated once.
#[derive(Debug, Clone)]
pub struct Cohort {
    today: NaiveDate,
    submitted: usize,
    percent_base: PercentBase,
    members: Vec<CohortMember>,
    skipped: Vec<SkippedRow>,
}

impl Cohort {
    pub fn from_rows(rows: &[RawAssessmentRow], today: NaiveDate) -> Self {
        let mut members = Vec::with_capacity(rows.len());
        let mut skipped = Vec::new();

        for (index, row) in rows.iter().enumerate() {
            match parse_row(row) {
                Ok(record) => {
                    let metrics = compute_metrics(&record, today);
                    members.push(CohortMember { record, metrics });
                }
                Err(err) => {
                    warn!(
                        row = index,
                        assessment_id = ?row.assessment_id,
                        error = %err,
                        "skipping unparseable assessment row"
                    );
                    skipped.push(SkippedRow {
                        index,
                        assessment_id: row.assessment_id,
                        reason: err.to_string(),
                    });
                }
            }
        }

        Self {
            today,
            submitted: rows.len(),
            percent_base: PercentBase::default(),
            members,
            skipped,
        }
    }

    pub fn with_percent_base(mut self, percent_base: PercentBase) -> Self {
        self.percent_base = percent_base;
        self
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub fn percent_base(&self) -> PercentBase {
        self.percent_base
    }

    pub fn submitted(&self) -> usize {
        self.submitted
    }

    pub fn parsed(&self) -> usize {
        self.members.len()
    }

    pub fn members(&self) -> &[CohortMember] {
        &self.members
    }

    pub fn skipped(&self) -> &[SkippedRow] {
        &self.skipped
    }

    /// Row count every population percentage divides by.
    pub fn denominator(&self) -> usize {
        match self.percent_base {
            PercentBase::Submitted => self.submitted,
            PercentBase::Parsed => self.members.len(),
        }
    }

    pub fn percent_of(&self, count: usize) -> String {
        percent(count as f64, self.denominator() as f64)
    }
}

/// `part / whole * 100` with two decimals and no sign; an empty whole yields `0.00`.
pub fn percent(part: f64, whole: f64) -> String {
    if whole <= 0.0 || !part.is_finite() {
        return "0.00".to_string();
    }
    format!("{:.2}", part / whole * 100.0)
}

pub(crate) fn clamp_percent(part: f64, whole: f64) -> String {
    if whole <= 0.0 {
        return "0.00".to_string();
    }
    percent(part.min(whole), whole)
}

/// Label-keyed values that serialize as a JSON object in insertion order.
#[derive(Debug, Clone, PartialEq)]
pub struct Distribution<V>(Vec<(&'static str, V)>);

impl<V> Distribution<V> {
    pub fn from_entries(entries: impl IntoIterator<Item = (&'static str, V)>) -> Self {
        Self(entries.into_iter().collect())
    }

    pub fn get(&self, label: &str) -> Option<&V> {
        self.0
            .iter()
            .find(|(key, _)| *key == label)
            .map(|(_, value)| value)
    }

    pub fn iter(&self) -> impl Iterator<Item = &(&'static str, V)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn map<U>(&self, mut f: impl FnMut(&V) -> U) -> Distribution<U> {
        Distribution(self.0.iter().map(|(key, value)| (*key, f(value))).collect())
    }
}

impl<V: Serialize> Serialize for Distribution<V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (key, value) in &self.0 {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// Count plus its share of the cohort.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryShare {
    pub count: usize,
    pub percentage: String,
}

/// Counts members per label, keeping every label in `labels` even when empty.
pub(crate) fn tally<C>(
    labels: impl IntoIterator<Item = C>,
    label: impl Fn(C) -> &'static str,
    observed: impl IntoIterator<Item = C>,
) -> Distribution<usize>
where
    C: PartialEq + Copy,
{
    let mut counts: Vec<(C, usize)> = labels.into_iter().map(|category| (category, 0)).collect();
    for category in observed {
        if let Some((_, count)) = counts.iter_mut().find(|(known, _)| *known == category) {
            *count += 1;
        }
    }
    Distribution::from_entries(
        counts
            .into_iter()
            .map(|(category, count)| (label(category), count)),
    )
}
