use super::super::classification::Reading;
use super::super::domain::{AssessmentRecord, Company};
use super::super::metrics::{compute_metrics, EmployeeMetrics};
use super::views::{EmployeeReport, ReadingView};
use chrono::NaiveDate;

fn reading<C: Copy>(
    reading: &Reading<C>,
    label: impl Fn(C) -> &'static str,
    interpretation: Option<&'static str>,
) -> ReadingView {
    ReadingView {
        category: label(reading.category),
        value: reading.value.clone(),
        interpretation,
    }
}

pub fn employee_report(
    company: &Company,
    record: &AssessmentRecord,
    today: NaiveDate,
) -> EmployeeReport {
    let metrics = compute_metrics(record, today);
    render(company, record, &metrics)
}

fn render(
    company: &Company,
    record: &AssessmentRecord,
    metrics: &EmployeeMetrics,
) -> EmployeeReport {
    let employee = &record.employee;
    let pressure = &metrics.blood_pressure;

    EmployeeReport {
        assessment_id: record.assessment_id,
        full_name: employee.full_name(),
        email: employee.email.clone(),
        gender: employee.gender,
        occupation: employee.occupation.clone(),
        company: company.name.clone(),
        age: metrics.age,
        height: employee.height.map(|height| height.to_string()),
        weight: employee.weight_kg,
        bmi: metrics.bmi.map(|bmi| format!("{bmi:.2}")),
        bmi_category: metrics.bmi_category.map(|category| category.label()),
        blood_pressure: reading(
            pressure,
            |category| category.label(),
            Some(pressure.category.interpretation()),
        ),
        glucose: reading(&metrics.glucose, |category| category.label(), None),
        cholesterol: reading(&metrics.cholesterol, |category| category.label(), None),
        section_scores: metrics.section_scores.clone(),
        total_score: metrics.total_score,
        risk_band: metrics.risk_band.label(),
        risk_message: metrics.risk_message(),
        created_at: record.created_at.clone(),
    }
}
