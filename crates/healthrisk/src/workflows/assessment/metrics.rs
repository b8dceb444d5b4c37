use super::classification::{
    body_mass_index, classify_blood_pressure, classify_cholesterol, classify_glucose,
    BloodPressureCategory, BmiCategory, CholesterolCategory, GlucoseCategory, Reading,
};
use super::domain::{AssessmentRecord, QuestionCode, RawAssessmentRow, RecordParseError, SectionKind};
use super::parser::parse_row;
use super::scoring::{score_sections, RiskBand, SectionScore};
use chrono::{Datelike, NaiveDate};

/// Exact calendar age on `today`; `None` for birth dates in the future.
pub fn age_on(dob: NaiveDate, today: NaiveDate) -> Option<u32> {
    let mut age = today.year() - dob.year();
    if (today.month(), today.day()) < (dob.month(), dob.day()) {
        age -= 1;
    }
    u32::try_from(age).ok()
}

/// Everything derived from one employee's submission.
#[derive(Debug, Clone, PartialEq)]
pub struct EmployeeMetrics {
    pub age: Option<u32>,
    pub bmi: Option<f64>,
    pub bmi_category: Option<BmiCategory>,
    pub blood_pressure: Reading<BloodPressureCategory>,
    pub glucose: Reading<GlucoseCategory>,
    pub cholesterol: Reading<CholesterolCategory>,
    pub section_scores: Vec<SectionScore>,
    pub total_score: f64,
    pub risk_band: RiskBand,
}

impl EmployeeMetrics {
    pub fn risk_message(&self) -> &'static str {
        self.risk_band.message()
    }
}

pub fn compute_metrics(record: &AssessmentRecord, today: NaiveDate) -> EmployeeMetrics {
    let employee = &record.employee;
    let assessment = &record.assessment;

    let age = employee.dob.and_then(|dob| age_on(dob, today));
    let bmi = match (employee.weight_kg, employee.height) {
        (Some(weight), Some(height)) => body_mass_index(weight, height),
        _ => None,
    };

    let history = |code| {
        assessment
            .response(SectionKind::PersonalMedicalHistory, code)
            .first()
            .unwrap_or_default()
    };

    let (section_scores, total_score) = score_sections(assessment);

    EmployeeMetrics {
        age,
        bmi,
        bmi_category: bmi.map(BmiCategory::from_bmi),
        blood_pressure: classify_blood_pressure(history(QuestionCode::Pmh14)),
        glucose: classify_glucose(history(QuestionCode::Pmh15)),
        cholesterol: classify_cholesterol(history(QuestionCode::Pmh16)),
        section_scores,
        total_score,
        risk_band: RiskBand::from_total(total_score),
    }
}

/// Parses and evaluates one stored row. An `Err` is the signal to skip the row.
pub fn compute_employee_metrics(
    row: &RawAssessmentRow,
    today: NaiveDate,
) -> Result<EmployeeMetrics, RecordParseError> {
    let record = parse_row(row)?;
    Ok(compute_metrics(&record, today))
}
