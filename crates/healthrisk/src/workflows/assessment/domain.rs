use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Tenant identity as stored in the `companies` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    #[serde(default)]
    pub id: Option<u64>,
    pub name: String,
    #[serde(default)]
    pub company_type: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    /// Unique slug the questionnaire link is published under.
    pub url: String,
}

/// One stored `assessment_response` row. Both payloads stay serialized until the
/// engine parses them, so a malformed row can be skipped without failing the batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawAssessmentRow {
    #[serde(default)]
    pub assessment_id: Option<u64>,
    pub company_slug: String,
    pub employee_info: String,
    pub health_assessment: String,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    /// Reads the stored value verbatim; only the exact `Male`/`Female` spellings count.
    pub fn from_raw(raw: &str) -> Self {
        match raw {
            "Male" => Self::Male,
            "Female" => Self::Female,
            _ => Self::Other,
        }
    }
}

/// Height recorded as `feet.inches`, so `5.10` is five feet ten inches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Height {
    pub feet: u8,
    pub inches: u8,
}

impl Height {
    pub fn parse(raw: &str) -> Result<Self, HeightError> {
        let text = raw.trim().trim_matches('"').trim();
        let malformed = || HeightError::Malformed(raw.trim().to_string());

        let (feet_text, inch_text) = match text.split_once('.') {
            Some((feet, inches)) => (feet, inches),
            None => (text, ""),
        };

        if feet_text.is_empty() || !feet_text.bytes().all(|b| b.is_ascii_digit()) {
            return Err(malformed());
        }
        if inch_text.len() > 2 || !inch_text.bytes().all(|b| b.is_ascii_digit()) {
            return Err(malformed());
        }

        let feet: u32 = feet_text.parse().map_err(|_| malformed())?;
        let inches: u32 = if inch_text.is_empty() {
            0
        } else {
            inch_text.parse().map_err(|_| malformed())?
        };

        if !(1..=8).contains(&feet) {
            return Err(HeightError::FeetOutOfRange {
                raw: text.to_string(),
            });
        }
        if inches > 11 {
            return Err(HeightError::InchesOutOfRange {
                raw: text.to_string(),
                inches,
            });
        }

        Ok(Self {
            feet: feet as u8,
            inches: inches as u8,
        })
    }

    pub fn meters(self) -> f64 {
        f64::from(self.feet) * 0.3048 + f64::from(self.inches) * 0.0254
    }
}

impl fmt::Display for Height {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} feet {} inches", self.feet, self.inches)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HeightError {
    #[error("height '{0}' is not a feet.inches value")]
    Malformed(String),
    #[error("height '{raw}' is outside the 1-8 ft range")]
    FeetOutOfRange { raw: String },
    #[error("height '{raw}' encodes {inches} inches; at most 11 are allowed")]
    InchesOutOfRange { raw: String, inches: u32 },
}

/// Parsed `employee_info` payload.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EmployeeInfo {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub company_name: Option<String>,
    pub occupation: Option<String>,
    pub dob: Option<NaiveDate>,
    /// Raw `dob` text, kept for reports that echo it back.
    pub dob_text: Option<String>,
    pub gender: Option<Gender>,
    pub weight_kg: Option<f64>,
    pub height: Option<Height>,
}

impl EmployeeInfo {
    pub fn full_name(&self) -> String {
        let first = self.first_name.as_deref().unwrap_or_default();
        let last = self.last_name.as_deref().unwrap_or_default();
        format!("{first} {last}").trim().to_string()
    }
}

/// Questionnaire subheadings the engine understands. Matching is exact on the stored text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum SectionKind {
    PersonalInformation,
    PersonalHealthHabits,
    PersonalMedicalHistory,
    WomenHealth,
    LifestyleAndDiet,
    MentalAndEmotionalHealth,
    OccupationalHealth,
    BurnoutAtWork,
    HealthBenefitsAndExpenditure,
    Other,
}

impl SectionKind {
    pub fn from_sub_heading(raw: &str) -> Self {
        match raw {
            "Personal Information" => Self::PersonalInformation,
            "Personal Health Habits" => Self::PersonalHealthHabits,
            "Personal Medical History" => Self::PersonalMedicalHistory,
            "Women Health" => Self::WomenHealth,
            "Lifestyle and Diet" => Self::LifestyleAndDiet,
            "Mental and Emotional Health Risk" => Self::MentalAndEmotionalHealth,
            "Occupational Health Risk" => Self::OccupationalHealth,
            "Burnout at Work" => Self::BurnoutAtWork,
            "Health Benefits and Expenditure" => Self::HealthBenefitsAndExpenditure,
            _ => Self::Other,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::PersonalInformation => "Personal Information",
            Self::PersonalHealthHabits => "Personal Health Habits",
            Self::PersonalMedicalHistory => "Personal Medical History",
            Self::WomenHealth => "Women Health",
            Self::LifestyleAndDiet => "Lifestyle and Diet",
            Self::MentalAndEmotionalHealth => "Mental and Emotional Health Risk",
            Self::OccupationalHealth => "Occupational Health Risk",
            Self::BurnoutAtWork => "Burnout at Work",
            Self::HealthBenefitsAndExpenditure => "Health Benefits and Expenditure",
            Self::Other => "Other",
        }
    }

    /// The seven sections that carry a risk table and count toward the total score.
    pub const fn scored() -> [Self; 7] {
        [
            Self::PersonalHealthHabits,
            Self::PersonalMedicalHistory,
            Self::WomenHealth,
            Self::LifestyleAndDiet,
            Self::MentalAndEmotionalHealth,
            Self::OccupationalHealth,
            Self::BurnoutAtWork,
        ]
    }

    pub fn is_scored(self) -> bool {
        Self::scored().contains(&self)
    }
}

/// Question codes the classification and aggregation rules dispatch on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum QuestionCode {
    Pmh3,
    Pmh5,
    Pmh7,
    Pmh14,
    Pmh15,
    Pmh16,
    Wh2,
    Wh4,
    Hbe1,
    Hbe2,
    Hbe3,
    Hbe4,
    Hbe5,
    Hbe6,
    Hbe7,
    Hbe8,
    Hbe9,
    Other,
}

impl QuestionCode {
    pub fn from_id(raw: &str) -> Self {
        match raw.trim() {
            "PMH3" => Self::Pmh3,
            "PMH5" => Self::Pmh5,
            "PMH7" => Self::Pmh7,
            "PMH14" => Self::Pmh14,
            "PMH15" => Self::Pmh15,
            "PMH16" => Self::Pmh16,
            "WH2" => Self::Wh2,
            "WH4" => Self::Wh4,
            "HBE1" => Self::Hbe1,
            "HBE2" => Self::Hbe2,
            "HBE3" => Self::Hbe3,
            "HBE4" => Self::Hbe4,
            "HBE5" => Self::Hbe5,
            "HBE6" => Self::Hbe6,
            "HBE7" => Self::Hbe7,
            "HBE8" => Self::Hbe8,
            "HBE9" => Self::Hbe9,
            _ => Self::Other,
        }
    }
}

/// An answer: a single label, a multi-select list, or nothing.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Response {
    #[default]
    Missing,
    Single(String),
    Multiple(Vec<String>),
}

impl Response {
    pub fn values(&self) -> impl Iterator<Item = &str> {
        let values: &[String] = match self {
            Response::Missing => &[],
            Response::Single(value) => std::slice::from_ref(value),
            Response::Multiple(values) => values,
        };
        values.iter().map(String::as_str)
    }

    /// First non-blank value, used where a single-select answer is expected.
    pub fn first(&self) -> Option<&str> {
        self.values().find(|value| !value.trim().is_empty())
    }

    pub fn is_present(&self) -> bool {
        self.first().is_some()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Question {
    pub code: QuestionCode,
    pub question_id: String,
    pub response: Response,
    pub score: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    pub kind: SectionKind,
    pub sub_heading: String,
    pub questions: Vec<Question>,
    /// Total persisted by some producers; recomputed from the questions when absent.
    pub section_score: Option<f64>,
}

impl Section {
    /// First question with `code` that carries an answer.
    pub fn answer(&self, code: QuestionCode) -> Option<&Question> {
        self.questions
            .iter()
            .find(|question| question.code == code && question.response.is_present())
    }
}

/// Parsed `health_assessment` payload, in questionnaire order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct HealthAssessment {
    pub sections: Vec<Section>,
}

impl HealthAssessment {
    pub fn section(&self, kind: SectionKind) -> Option<&Section> {
        self.sections.iter().find(|section| section.kind == kind)
    }

    pub fn answer(&self, kind: SectionKind, code: QuestionCode) -> Option<&Question> {
        self.section(kind).and_then(|section| section.answer(code))
    }

    pub fn response(&self, kind: SectionKind, code: QuestionCode) -> &Response {
        static MISSING: Response = Response::Missing;
        self.answer(kind, code)
            .map(|question| &question.response)
            .unwrap_or(&MISSING)
    }
}

/// A row whose payloads parsed successfully.
#[derive(Debug, Clone, PartialEq)]
pub struct AssessmentRecord {
    pub assessment_id: Option<u64>,
    pub created_at: Option<String>,
    pub employee: EmployeeInfo,
    pub assessment: HealthAssessment,
}

/// Raised when a stored row cannot be parsed; the row is skipped, never the batch.
#[derive(Debug, thiserror::Error)]
pub enum RecordParseError {
    #[error("employee_info is not valid JSON: {0}")]
    EmployeeInfo(#[source] serde_json::Error),
    #[error("health_assessment is not valid JSON: {0}")]
    HealthAssessment(#[source] serde_json::Error),
}
