//! Fixed lookup data shared by the scorer and the population aggregators.

use super::domain::{QuestionCode, SectionKind};

/// Conditions counted from the medical-history multi-selects, in report order.
pub static CONDITIONS: [&str; 21] = [
    "Rheumatoid Arthritis",
    "Diabetes",
    "Hypertension",
    "Osteoarthritis",
    "Gout",
    "Anemia",
    "High Cholesterol",
    "Fibromyalgia",
    "Thyroid Disease",
    "Cardiovascular Disease",
    "Asthma",
    "Osteoporosis",
    "Chronic Kidney Disease",
    "COPD",
    "Urogenital Disease",
    "Metabolic Disorder",
    "Cancer",
    "Myocardial Infarction",
    "Hepatitis B/C",
    "Tuberculosis",
    "Heart failure",
];

pub static CONDITION_QUESTIONS: [QuestionCode; 3] =
    [QuestionCode::Pmh3, QuestionCode::Pmh5, QuestionCode::Pmh7];

pub static WOMEN_HEALTH_CONDITIONS: [&str; 5] = [
    "Polycystic Ovary Syndrome (PCOS)",
    "Endometriosis",
    "Uterine Fibroids",
    "Menstrual Irregularities",
    "Menopausal Symptoms",
];

pub static BENEFIT_SERVICES: [&str; 10] = [
    "OPD Consultation",
    "Diagnostic Tests",
    "Pharmacy",
    "Dental Care",
    "Vision Care",
    "Mental Health Counselling",
    "Maternity Care",
    "Annual Health Check-up",
    "Physiotherapy",
    "Hospitalization",
];

/// Points per annual out-of-pocket spend band, keyed by the normalized answer.
pub static SPEND_POINTS: [(&str, u32); 5] = [
    ("nil", 0),
    ("below 5000", 1),
    ("5000-10000", 2),
    ("10000-20000", 3),
    ("above 20000", 4),
];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreBand {
    /// Inclusive upper bound; a band starts where the previous one ends.
    pub upper: f64,
    pub label: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SectionTable {
    pub section: SectionKind,
    pub bands: &'static [ScoreBand],
}

impl SectionTable {
    pub fn max_score(&self) -> f64 {
        self.bands.last().map(|band| band.upper).unwrap_or(0.0)
    }
}

const fn band(upper: f64, label: &'static str) -> ScoreBand {
    ScoreBand { upper, label }
}

pub static SECTION_TABLES: [SectionTable; 7] = [
    SectionTable {
        section: SectionKind::PersonalHealthHabits,
        bands: &[
            band(10.0, "Healthy Habits"),
            band(20.0, "Good Habits"),
            band(30.0, "Moderately Healthy Habits"),
            band(40.0, "Risky Habits (High Risk)"),
            band(50.0, "Unhealthy Habits"),
        ],
    },
    SectionTable {
        section: SectionKind::PersonalMedicalHistory,
        bands: &[
            band(30.0, "Healthy Records"),
            band(60.0, "Mild Risk"),
            band(90.0, "Moderate Risk"),
            band(120.0, "Elevated Risk"),
            band(156.0, "High Risk"),
        ],
    },
    SectionTable {
        section: SectionKind::WomenHealth,
        bands: &[
            band(10.0, "Optimal Health"),
            band(20.0, "Moderate Risk"),
            band(23.0, "High Risk"),
        ],
    },
    SectionTable {
        section: SectionKind::LifestyleAndDiet,
        bands: &[
            band(10.0, "Healthy Lifestyle and Diet"),
            band(20.0, "Balanced Lifestyle and Diet Risk"),
            band(31.0, "Unhealthy Lifestyle and Diet"),
        ],
    },
    SectionTable {
        section: SectionKind::MentalAndEmotionalHealth,
        bands: &[
            band(8.0, "Mental Fortitude"),
            band(16.0, "Stable but Sensitive"),
            band(24.0, "Vulnerable to Stress"),
            band(32.0, "Mental Health at Risk"),
            band(40.0, "Critical Mental Health Concern"),
        ],
    },
    SectionTable {
        section: SectionKind::OccupationalHealth,
        bands: &[
            band(20.0, "Optimal Work Life Balance"),
            band(40.0, "Generally Good Health"),
            band(60.0, "Moderate Risk"),
            band(80.0, "High Risk of Occupational Strain"),
            band(100.0, "Critical Occupational Health Concern"),
        ],
    },
    SectionTable {
        section: SectionKind::BurnoutAtWork,
        bands: &[
            band(20.0, "Low Risk of Burnout"),
            band(40.0, "Moderate Risk of Burnout"),
            band(60.0, "Noticeable Risk of Burnout"),
            band(80.0, "High Risk of Burnout"),
            band(100.0, "Severe Burnout"),
        ],
    },
];

pub fn section_table(section: SectionKind) -> Option<&'static SectionTable> {
    SECTION_TABLES.iter().find(|table| table.section == section)
}

pub fn spend_points(normalized: &str) -> Option<u32> {
    SPEND_POINTS
        .iter()
        .find(|(answer, _)| *answer == normalized)
        .map(|(_, points)| *points)
}
