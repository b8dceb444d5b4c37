use super::{tally, CategoryShare, Cohort, Distribution};
use crate::workflows::assessment::classification::{
    BloodPressureCategory, CholesterolCategory, GlucoseCategory,
};
use crate::workflows::assessment::domain::SectionKind;
use crate::workflows::assessment::tables::{CONDITIONS, CONDITION_QUESTIONS};
use serde::Serialize;

/// Share of employees reporting each named condition in their medical history.
///
/// Every exact match counts, so a condition listed under two history questions is
/// counted twice for that employee.
pub fn condition_prevalence(cohort: &Cohort) -> Distribution<String> {
    let mut counts = vec![0usize; CONDITIONS.len()];

    for member in cohort.members() {
        let Some(history) = member
            .record
            .assessment
            .section(SectionKind::PersonalMedicalHistory)
        else {
            continue;
        };

        let matches = history
            .questions
            .iter()
            .filter(|question| CONDITION_QUESTIONS.contains(&question.code))
            .flat_map(|question| question.response.values())
            .filter_map(|value| {
                CONDITIONS
                    .iter()
                    .position(|condition| *condition == value.trim())
            });

        for index in matches {
            counts[index] += 1;
        }
    }

    Distribution::from_entries(
        CONDITIONS
            .iter()
            .zip(counts)
            .map(|(condition, count)| (*condition, cohort.percent_of(count))),
    )
}

/// Blood pressure, glucose and cholesterol histograms, `Unknown` included.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthData {
    pub blood_pressure: Distribution<CategoryShare>,
    pub glucose: Distribution<CategoryShare>,
    pub cholesterol: Distribution<CategoryShare>,
    pub total_employees: usize,
}

pub fn health_metrics(cohort: &Cohort) -> HealthData {
    let members = cohort.members();
    let share = |counts: Distribution<usize>| {
        counts.map(|count| CategoryShare {
            count: *count,
            percentage: cohort.percent_of(*count),
        })
    };

    HealthData {
        blood_pressure: share(tally(
            BloodPressureCategory::ordered(),
            BloodPressureCategory::label,
            members.iter().map(|member| member.metrics.blood_pressure.category),
        )),
        glucose: share(tally(
            GlucoseCategory::ordered(),
            GlucoseCategory::label,
            members.iter().map(|member| member.metrics.glucose.category),
        )),
        cholesterol: share(tally(
            CholesterolCategory::ordered(),
            CholesterolCategory::label,
            members.iter().map(|member| member.metrics.cholesterol.category),
        )),
        total_employees: cohort.submitted(),
    }
}
