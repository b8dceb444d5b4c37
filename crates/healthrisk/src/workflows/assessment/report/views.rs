use super::super::domain::Gender;
use super::super::population::{
    Distribution, ExpensesChart, HealthData, PercentBase, SatisfactionLevels, SectionWiseRisk,
    ServiceUsage, WomanHealthChart,
};
use super::super::scoring::SectionScore;
use chrono::NaiveDate;
use serde::Serialize;

/// Company rollup in the key layout existing report renderers consume.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyReportView {
    pub id: Option<u64>,
    pub name: String,
    pub company_type: Option<String>,
    pub phone_number: Option<String>,
    pub email: Option<String>,
    pub city: Option<String>,
    pub url: String,
    pub total_employees: usize,
    #[serde(rename = "MaleEmployees")]
    pub male_employees: usize,
    #[serde(rename = "FemaleEmployees")]
    pub female_employees: usize,
    pub condition_prevalence: Distribution<String>,
    pub age_distribution: Distribution<usize>,
    pub bmi_data: Distribution<usize>,
    #[serde(rename = "HealthData")]
    pub health_data: HealthData,
    #[serde(rename = "WomanHealthChart")]
    pub woman_health_chart: WomanHealthChart,
    #[serde(rename = "ExpensesChart")]
    pub expenses_chart: ExpensesChart,
    pub satisfaction_levels: SatisfactionLevels,
    #[serde(rename = "SectionWiseRiskDistribution")]
    pub section_wise_risk_distribution: SectionWiseRisk,
    #[serde(rename = "ServiceBenefit")]
    pub service_benefit: Distribution<ServiceUsage>,
    pub risk_levels: Distribution<String>,
}

/// How the percentages were computed.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportMeta {
    pub percent_base: PercentBase,
    pub submitted_rows: usize,
    pub parsed_rows: usize,
    pub skipped_rows: usize,
    pub generated_on: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompanyReport {
    pub company: CompanyReportView,
    pub meta: ReportMeta,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReadingView {
    pub category: &'static str,
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interpretation: Option<&'static str>,
}

/// Individual report for one employee.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeReport {
    pub assessment_id: Option<u64>,
    pub full_name: String,
    pub email: Option<String>,
    pub gender: Option<Gender>,
    pub occupation: Option<String>,
    pub company: String,
    pub age: Option<u32>,
    pub height: Option<String>,
    pub weight: Option<f64>,
    pub bmi: Option<String>,
    pub bmi_category: Option<&'static str>,
    pub blood_pressure: ReadingView,
    pub glucose: ReadingView,
    pub cholesterol: ReadingView,
    pub section_scores: Vec<SectionScore>,
    pub total_score: f64,
    pub risk_band: &'static str,
    pub risk_message: &'static str,
    pub created_at: Option<String>,
}
