use super::super::domain::{Company, RawAssessmentRow};
use super::super::population::{
    age_distribution, bmi_distribution, condition_prevalence, expenses_chart, gender_counts,
    health_metrics, risk_levels, satisfaction_levels, section_wise_risk_distribution,
    services_benefit, woman_health_chart, Cohort, PercentBase,
};
use super::views::{CompanyReport, CompanyReportView, ReportMeta};
use chrono::NaiveDate;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportOptions {
    pub today: NaiveDate,
    pub percent_base: PercentBase,
}

impl ReportOptions {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            today,
            percent_base: PercentBase::default(),
        }
    }

    pub fn with_percent_base(mut self, percent_base: PercentBase) -> Self {
        self.percent_base = percent_base;
        self
    }
}

/// Builds the company report from raw stored rows. Pure apart from logging.
pub fn compute_report(
    company: &Company,
    rows: &[RawAssessmentRow],
    options: ReportOptions,
) -> CompanyReport {
    let cohort = Cohort::from_rows(rows, options.today).with_percent_base(options.percent_base);
    let report = assemble_report(company, &cohort);
    info!(
        company = %company.url,
        submitted = cohort.submitted(),
        parsed = cohort.parsed(),
        skipped = cohort.skipped().len(),
        percent_base = %cohort.percent_base(),
        "company report generated"
    );
    report
}

pub fn assemble_report(company: &Company, cohort: &Cohort) -> CompanyReport {
    let genders = gender_counts(cohort);

    CompanyReport {
        company: CompanyReportView {
            id: company.id,
            name: company.name.clone(),
            company_type: company.company_type.clone(),
            phone_number: company.phone_number.clone(),
            email: company.email.clone(),
            city: company.city.clone(),
            url: company.url.clone(),
            total_employees: cohort.submitted(),
            male_employees: genders.male,
            female_employees: genders.female,
            condition_prevalence: condition_prevalence(cohort),
            age_distribution: age_distribution(cohort),
            bmi_data: bmi_distribution(cohort),
            health_data: health_metrics(cohort),
            woman_health_chart: woman_health_chart(cohort),
            expenses_chart: expenses_chart(cohort),
            satisfaction_levels: satisfaction_levels(cohort),
            section_wise_risk_distribution: section_wise_risk_distribution(cohort),
            service_benefit: services_benefit(cohort),
            risk_levels: risk_levels(cohort),
        },
        meta: ReportMeta {
            percent_base: cohort.percent_base(),
            submitted_rows: cohort.submitted(),
            parsed_rows: cohort.parsed(),
            skipped_rows: cohort.skipped().len(),
            generated_on: cohort.today(),
        },
    }
}
