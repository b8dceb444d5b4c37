use super::{percent, Cohort, Distribution};
use crate::workflows::assessment::domain::{QuestionCode, SectionKind};
use crate::workflows::assessment::normalizer::normalize_response;
use crate::workflows::assessment::tables::WOMEN_HEALTH_CONDITIONS;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WomanHealthChart {
    /// Share of all condition mentions, so the five values sum to 100 when any are reported.
    pub conditions: Distribution<String>,
    pub employees_with_gynecological_issues: String,
    pub employees_planning_pregnancy: String,
}

fn is_reported(answer: &str) -> bool {
    !matches!(normalize_response(answer).as_str(), "" | "none" | "no")
}

/// Women's-health rollup. Issue and pregnancy shares divide by the whole cohort, not by
/// female employees only.
pub fn woman_health_chart(cohort: &Cohort) -> WomanHealthChart {
    let mut mentions = [0usize; 5];
    let mut with_issues = 0;
    let mut planning_pregnancy = 0;

    for member in cohort.members() {
        let Some(section) = member.record.assessment.section(SectionKind::WomenHealth) else {
            continue;
        };

        let reported: Vec<&str> = section
            .answer(QuestionCode::Wh2)
            .map(|question| question.response.values().filter(|value| is_reported(value)).collect())
            .unwrap_or_default();
        if !reported.is_empty() {
            with_issues += 1;
        }
        for value in reported {
            if let Some(index) = WOMEN_HEALTH_CONDITIONS
                .iter()
                .position(|condition| *condition == value.trim())
            {
                mentions[index] += 1;
            }
        }

        let planning = section
            .answer(QuestionCode::Wh4)
            .and_then(|question| question.response.first())
            .is_some_and(|answer| normalize_response(answer) == "yes");
        if planning {
            planning_pregnancy += 1;
        }
    }

    let total_mentions: usize = mentions.iter().sum();
    WomanHealthChart {
        conditions: Distribution::from_entries(
            WOMEN_HEALTH_CONDITIONS
                .iter()
                .zip(mentions)
                .map(|(condition, count)| (*condition, percent(count as f64, total_mentions as f64))),
        ),
        employees_with_gynecological_issues: cohort.percent_of(with_issues),
        employees_planning_pregnancy: cohort.percent_of(planning_pregnancy),
    }
}

#[cfg(test)]
mod tests {
    use super::super::fixtures::*;
    use super::*;
    use serde_json::json;

    fn women(questions: serde_json::Value) -> serde_json::Value {
        json!([section("Women Health", questions)])
    }

    #[test]
    fn conditions_are_shares_of_all_mentions() {
        let rows = vec![
            row(
                1,
                json!({"gender": "Female"}),
                women(json!([
                    answer("WH2", json!(["Endometriosis", "Uterine Fibroids"])),
                    answer("WH4", json!("Yes")),
                ])),
            ),
            row(
                2,
                json!({"gender": "Female"}),
                women(json!([answer("WH2", json!(["Endometriosis"])), answer("WH4", json!("no"))])),
            ),
            row(3, json!({"gender": "Female"}), women(json!([answer("WH2", json!(["None"]))]))),
            row(4, json!({"gender": "Male"}), json!([])),
        ];
        let chart = woman_health_chart(&Cohort::from_rows(&rows, today()));

        assert_eq!(chart.conditions.get("Endometriosis").map(String::as_str), Some("66.67"));
        assert_eq!(chart.conditions.get("Uterine Fibroids").map(String::as_str), Some("33.33"));
        assert_eq!(chart.conditions.get("Menopausal Symptoms").map(String::as_str), Some("0.00"));
        assert_eq!(chart.employees_with_gynecological_issues, "50.00");
        assert_eq!(chart.employees_planning_pregnancy, "25.00");
    }

    #[test]
    fn no_mentions_yield_zero_shares() {
        let rows = vec![row(1, json!({}), json!([]))];
        let chart = woman_health_chart(&Cohort::from_rows(&rows, today()));
        assert!(chart.conditions.iter().all(|(_, share)| share == "0.00"));
        assert_eq!(chart.employees_with_gynecological_issues, "0.00");
    }
}
