use super::{tally, Cohort, Distribution};
use crate::workflows::assessment::domain::SectionKind;
use crate::workflows::assessment::scoring::{section_category, RiskBand, UNKNOWN_CATEGORY};
use serde::Serialize;

/// Share of employees in each total-score band.
pub fn risk_levels(cohort: &Cohort) -> Distribution<String> {
    tally(
        RiskBand::ordered(),
        RiskBand::label,
        cohort.members().iter().map(|member| member.metrics.risk_band),
    )
    .map(|count| cohort.percent_of(*count))
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionAverage {
    pub respondents: usize,
    pub average_score: String,
    pub category: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionWiseRisk {
    pub sections: Distribution<SectionAverage>,
    pub risk_categories: Distribution<String>,
}

/// Average score per scored section over the employees whose submission contains it.
pub fn section_wise_risk_distribution(cohort: &Cohort) -> SectionWiseRisk {
    let sections = SectionKind::scored().into_iter().map(|kind| {
        let scores: Vec<f64> = cohort
            .members()
            .iter()
            .flat_map(|member| member.metrics.section_scores.iter())
            .filter(|entry| entry.section == kind)
            .map(|entry| entry.score)
            .collect();

        let average = if scores.is_empty() {
            SectionAverage {
                respondents: 0,
                average_score: "0.00".to_string(),
                category: UNKNOWN_CATEGORY,
            }
        } else {
            let mean = scores.iter().sum::<f64>() / scores.len() as f64;
            SectionAverage {
                respondents: scores.len(),
                average_score: format!("{mean:.2}"),
                category: section_category(kind, mean),
            }
        };
        (kind.label(), average)
    });

    SectionWiseRisk {
        sections: Distribution::from_entries(sections),
        risk_categories: risk_levels(cohort),
    }
}

#[cfg(test)]
mod tests {
    use super::super::fixtures::*;
    use super::*;
    use serde_json::json;

    fn scored(sections: &[(&str, f64)]) -> serde_json::Value {
        serde_json::Value::Array(
            sections
                .iter()
                .map(|(heading, score)| json!({"subHeading": heading, "sectionScore": score}))
                .collect(),
        )
    }

    fn cohort() -> Cohort {
        let rows = vec![
            row(1, json!({}), scored(&[("Burnout at Work", 30.0), ("Lifestyle and Diet", 25.0)])),
            row(2, json!({}), scored(&[("Burnout at Work", 50.0), ("Personal Medical History", 140.0)])),
            row(3, json!({}), scored(&[("Occupational Health Risk", 100.0), ("Personal Medical History", 156.0), ("Mental and Emotional Health Risk", 40.0), ("Burnout at Work", 100.0)])),
            broken(4),
        ];
        Cohort::from_rows(&rows, today())
    }

    #[test]
    fn risk_levels_cover_every_band() {
        let levels = risk_levels(&cohort());
        assert_eq!(levels.len(), 5);
        assert_eq!(levels.get("Low").map(String::as_str), Some("25.00"));
        assert_eq!(levels.get("High").map(String::as_str), Some("25.00"));
        assert_eq!(levels.get("Very High").map(String::as_str), Some("0.00"));
        assert_eq!(levels.get("Severe").map(String::as_str), Some("25.00"));
    }

    #[test]
    fn averages_ignore_employees_without_the_section() {
        let distribution = section_wise_risk_distribution(&cohort());
        let burnout = distribution.sections.get("Burnout at Work").expect("burnout");
        assert_eq!(burnout.respondents, 3);
        assert_eq!(burnout.average_score, "60.00");
        assert_eq!(burnout.category, "Noticeable Risk of Burnout");

        let history = distribution.sections.get("Personal Medical History").expect("history");
        assert_eq!(history.respondents, 2);
        assert_eq!(history.average_score, "148.00");
        assert_eq!(history.category, "High Risk");

        let women = distribution.sections.get("Women Health").expect("women");
        assert_eq!(women.respondents, 0);
        assert_eq!(women.category, UNKNOWN_CATEGORY);
        assert_eq!(distribution.risk_categories, risk_levels(&cohort()));
    }
}
