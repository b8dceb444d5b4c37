use super::{tally, Cohort, Distribution};
use crate::workflows::assessment::classification::BmiCategory;
use crate::workflows::assessment::domain::Gender;
use serde::Serialize;

pub const AGE_BUCKETS: [&str; 5] = ["<25", "25-34", "35-44", "45-54", "55+"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct GenderCounts {
    pub male: usize,
    pub female: usize,
}

/// Exact `Male`/`Female` answers only; other values still count toward the total.
pub fn gender_counts(cohort: &Cohort) -> GenderCounts {
    cohort
        .members()
        .iter()
        .filter_map(|member| member.record.employee.gender)
        .fold(GenderCounts::default(), |mut counts, gender| {
            match gender {
                Gender::Male => counts.male += 1,
                Gender::Female => counts.female += 1,
                Gender::Other => {}
            }
            counts
        })
}

fn age_bucket(age: u32) -> &'static str {
    match age {
        0..=24 => AGE_BUCKETS[0],
        25..=34 => AGE_BUCKETS[1],
        35..=44 => AGE_BUCKETS[2],
        45..=54 => AGE_BUCKETS[3],
        _ => AGE_BUCKETS[4],
    }
}

/// Head counts per age bucket for every member whose date of birth parsed.
pub fn age_distribution(cohort: &Cohort) -> Distribution<usize> {
    tally(
        AGE_BUCKETS,
        |bucket| bucket,
        cohort
            .members()
            .iter()
            .filter_map(|member| member.metrics.age)
            .map(age_bucket),
    )
}

/// Head counts per BMI class; members without a usable weight or height are left out.
pub fn bmi_distribution(cohort: &Cohort) -> Distribution<usize> {
    tally(
        BmiCategory::ordered(),
        BmiCategory::label,
        cohort
            .members()
            .iter()
            .filter_map(|member| member.metrics.bmi_category),
    )
}

#[cfg(test)]
mod tests {
    use super::super::fixtures::*;
    use super::*;
    use serde_json::json;

    fn cohort() -> Cohort {
        let rows = vec![
            row(1, json!({"gender": "Male", "dob": "2001-07-01", "weight": 50, "height": "5.10"}), json!([])),
            row(2, json!({"gender": "Female", "dob": "1999-06-30", "weight": 70, "height": 5.4}), json!([])),
            row(3, json!({"gender": "female", "dob": "1965-01-01", "weight": 120, "height": 5.6}), json!([])),
            row(4, json!({"gender": "Male"}), json!([])),
            broken(5),
        ];
        Cohort::from_rows(&rows, today())
    }

    #[test]
    fn genders_are_read_verbatim() {
        assert_eq!(cohort().members().len(), 4);
        assert_eq!(gender_counts(&cohort()), GenderCounts { male: 2, female: 1 });
    }

    #[test]
    fn ages_land_in_exactly_one_bucket() {
        let distribution = age_distribution(&cohort());
        assert_eq!(distribution.get("<25"), Some(&1));
        assert_eq!(distribution.get("25-34"), Some(&1));
        assert_eq!(distribution.get("55+"), Some(&1));
        let total: usize = distribution.iter().map(|(_, count)| count).sum();
        assert_eq!(total, 3);
    }

    #[test]
    fn bmi_excludes_missing_measurements() {
        let distribution = bmi_distribution(&cohort());
        assert_eq!(distribution.len(), 6);
        assert_eq!(distribution.get("Below-Normal-Weight"), Some(&1));
        assert_eq!(distribution.get("Overweight"), Some(&1));
        assert_eq!(distribution.get("Class-III-Obesity"), Some(&1));
        let total: usize = distribution.iter().map(|(_, count)| count).sum();
        assert_eq!(total, 3);
    }
}
