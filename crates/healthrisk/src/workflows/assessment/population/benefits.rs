use super::{clamp_percent, percent, Cohort, Distribution};
use crate::workflows::assessment::classification::{classify_satisfaction, Satisfaction};
use crate::workflows::assessment::domain::{HealthAssessment, QuestionCode, SectionKind};
use crate::workflows::assessment::normalizer::normalize_amount;
use crate::workflows::assessment::tables::{spend_points, BENEFIT_SERVICES};
use serde::Serialize;
use tracing::debug;

const BENEFITS: SectionKind = SectionKind::HealthBenefitsAndExpenditure;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SatisfactionLevels {
    pub satisfied: String,
    pub not_satisfied: String,
}

pub fn satisfaction_levels(cohort: &Cohort) -> SatisfactionLevels {
    let (mut satisfied, mut not_satisfied) = (0, 0);
    for member in cohort.members() {
        let answer = member.record.assessment.response(BENEFITS, QuestionCode::Hbe1).first();
        match answer.map(classify_satisfaction) {
            Some(Satisfaction::Satisfied) => satisfied += 1,
            Some(Satisfaction::NotSatisfied) => not_satisfied += 1,
            Some(Satisfaction::Unknown) | None => {}
        }
    }

    SatisfactionLevels {
        satisfied: cohort.percent_of(satisfied),
        not_satisfied: cohort.percent_of(not_satisfied),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceUsage {
    pub using: String,
    pub covered: String,
}

fn selects(assessment: &HealthAssessment, code: QuestionCode, service: &str) -> bool {
    assessment
        .response(BENEFITS, code)
        .values()
        .any(|value| value.trim() == service)
}

/// Per-service share of employees using it (`HBE2`) and covered for it (`HBE3`),
/// clamped at 100.
pub fn services_benefit(cohort: &Cohort) -> Distribution<ServiceUsage> {
    let whole = cohort.denominator() as f64;
    Distribution::from_entries(BENEFIT_SERVICES.iter().map(|service| {
        let count = |code| {
            cohort
                .members()
                .iter()
                .filter(|member| selects(&member.record.assessment, code, service))
                .count() as f64
        };
        (
            *service,
            ServiceUsage {
                using: clamp_percent(count(QuestionCode::Hbe2), whole),
                covered: clamp_percent(count(QuestionCode::Hbe3), whole),
            },
        )
    }))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExpensesChart {
    pub opd: String,
    pub lab: String,
    pub pharmacy: String,
    pub total: String,
}

fn spend(assessment: &HealthAssessment, code: QuestionCode) -> u32 {
    let Some(answer) = assessment.response(BENEFITS, code).first() else {
        return 0;
    };
    let normalized = normalize_amount(answer);
    spend_points(&normalized).unwrap_or_else(|| {
        debug!(answer = %normalized, "spend band unmatched");
        0
    })
}

/// Out-of-pocket spend split across OPD, lab and pharmacy as shares of the summed points.
/// With no points at all every share is zero and `total` still reads `100.00`.
pub fn expenses_chart(cohort: &Cohort) -> ExpensesChart {
    let (mut opd, mut lab, mut pharmacy) = (0u64, 0u64, 0u64);
    for member in cohort.members() {
        let assessment = &member.record.assessment;
        opd += u64::from(spend(assessment, QuestionCode::Hbe4));
        lab += u64::from(spend(assessment, QuestionCode::Hbe5));
        pharmacy += u64::from(spend(assessment, QuestionCode::Hbe6));
    }

    let sum = (opd + lab + pharmacy) as f64;
    ExpensesChart {
        opd: percent(opd as f64, sum),
        lab: percent(lab as f64, sum),
        pharmacy: percent(pharmacy as f64, sum),
        total: "100.00".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::super::fixtures::*;
    use super::*;
    use serde_json::json;

    fn benefits(questions: serde_json::Value) -> serde_json::Value {
        json!([section("Health Benefits and Expenditure", questions)])
    }

    #[test]
    fn satisfaction_divides_by_all_rows() {
        let rows = vec![
            row(1, json!({}), benefits(json!([answer("HBE1", json!("Yes"))]))),
            row(2, json!({}), benefits(json!([answer("HBE1", json!("No"))]))),
            row(3, json!({}), benefits(json!([answer("HBE1", json!(" yes "))]))),
            broken(4),
        ];
        let levels = satisfaction_levels(&Cohort::from_rows(&rows, today()));
        assert_eq!(levels.satisfied, "50.00");
        assert_eq!(levels.not_satisfied, "25.00");
    }

    #[test]
    fn services_report_usage_and_coverage() {
        let rows = vec![
            row(
                1,
                json!({}),
                benefits(json!([
                    answer("HBE2", json!(["Pharmacy", "Dental Care", "Pharmacy"])),
                    answer("HBE3", json!(["Pharmacy"])),
                ])),
            ),
            row(2, json!({}), benefits(json!([answer("HBE2", json!(["Pharmacy"]))]))),
        ];
        let services = services_benefit(&Cohort::from_rows(&rows, today()));
        assert_eq!(services.len(), 10);
        let pharmacy = services.get("Pharmacy").expect("pharmacy");
        assert_eq!(pharmacy.using, "100.00");
        assert_eq!(pharmacy.covered, "50.00");
        assert_eq!(services.get("Dental Care").map(|usage| usage.using.as_str()), Some("50.00"));
        assert_eq!(services.get("Hospitalization").map(|usage| usage.covered.as_str()), Some("0.00"));
    }

    #[test]
    fn expenses_split_by_points() {
        let rows = vec![
            row(
                1,
                json!({}),
                benefits(json!([
                    answer("HBE4", json!("Above 20,000")),
                    answer("HBE5", json!("Below ₹5,000")),
                    answer("HBE6", json!("Rs. 5,000 - 10,000")),
                ])),
            ),
            row(2, json!({}), benefits(json!([answer("HBE4", json!("Nil"))]))),
        ];
        let chart = expenses_chart(&Cohort::from_rows(&rows, today()));
        assert_eq!(chart.opd, "57.14");
        assert_eq!(chart.lab, "14.29");
        assert_eq!(chart.pharmacy, "28.57");
        assert_eq!(chart.total, "100.00");
    }

    #[test]
    fn expenses_without_points_keep_total_sentinel() {
        let rows = vec![row(1, json!({}), benefits(json!([answer("HBE4", json!("Nil"))])))];
        let chart = expenses_chart(&Cohort::from_rows(&rows, today()));
        assert_eq!(
            chart,
            ExpensesChart {
                opd: "0.00".to_string(),
                lab: "0.00".to_string(),
                pharmacy: "0.00".to_string(),
                total: "100.00".to_string(),
            }
        );
    }
}
