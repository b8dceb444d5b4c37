use super::domain::{HealthAssessment, Section, SectionKind};
use super::tables::section_table;
use serde::Serialize;

pub const UNKNOWN_CATEGORY: &str = "Unknown";

/// A section total as persisted, or the sum of its question scores with missing ones as 0.
pub fn section_total(section: &Section) -> f64 {
    section.section_score.unwrap_or_else(|| {
        section
            .questions
            .iter()
            .map(|question| question.score.unwrap_or(0.0))
            .sum()
    })
}

/// Named category for a section score. Out-of-range scores and unscored sections are `Unknown`.
pub fn section_category(section: SectionKind, score: f64) -> &'static str {
    let Some(table) = section_table(section) else {
        return UNKNOWN_CATEGORY;
    };
    if !score.is_finite() || score < 0.0 {
        return UNKNOWN_CATEGORY;
    }
    table
        .bands
        .iter()
        .find(|band| score <= band.upper)
        .map(|band| band.label)
        .unwrap_or(UNKNOWN_CATEGORY)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionScore {
    #[serde(skip)]
    pub section: SectionKind,
    pub section_name: &'static str,
    pub score: f64,
    pub category: &'static str,
}

/// Scores every scored section present in the assessment, in questionnaire order, and
/// returns them together with the total.
pub fn score_sections(assessment: &HealthAssessment) -> (Vec<SectionScore>, f64) {
    let scores: Vec<SectionScore> = assessment
        .sections
        .iter()
        .filter(|section| section.kind.is_scored())
        .map(|section| {
            let score = section_total(section);
            SectionScore {
                section: section.kind,
                section_name: section.kind.label(),
                score,
                category: section_category(section.kind, score),
            }
        })
        .collect();
    let total = scores.iter().map(|entry| entry.score).sum();
    (scores, total)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum RiskBand {
    Low,
    Moderate,
    High,
    VeryHigh,
    Severe,
}

impl RiskBand {
    pub const fn ordered() -> [Self; 5] {
        [
            Self::Low,
            Self::Moderate,
            Self::High,
            Self::VeryHigh,
            Self::Severe,
        ]
    }

    pub fn from_total(total: f64) -> Self {
        if total <= 80.0 {
            Self::Low
        } else if total <= 160.0 {
            Self::Moderate
        } else if total <= 240.0 {
            Self::High
        } else if total <= 320.0 {
            Self::VeryHigh
        } else {
            Self::Severe
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Moderate => "Moderate",
            Self::High => "High",
            Self::VeryHigh => "Very High",
            Self::Severe => "Severe",
        }
    }

    pub const fn range(self) -> &'static str {
        match self {
            Self::Low => "0-80",
            Self::Moderate => "81-160",
            Self::High => "161-240",
            Self::VeryHigh => "241-320",
            Self::Severe => "321-400",
        }
    }

    pub const fn message(self) -> &'static str {
        match self {
            Self::Low => "Low Risk! You're in good health!",
            Self::Moderate => "Moderate Risk! There are some areas where you could improve.",
            Self::High => "High Risk! This indicates potential health risks.",
            Self::VeryHigh => "Very High Risk! Your health may be at serious risk.",
            Self::Severe => "Urgent attention is needed.",
        }
    }
}
