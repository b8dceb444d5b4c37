//! Maps a single questionnaire answer onto a clinical category. Every function is total:
//! text that matches no bucket degrades to the `Unknown` category.

use super::domain::Height;
use super::normalizer::normalize_response;
use serde::Serialize;
use tracing::debug;

/// A classified answer plus the value shown next to it in individual reports.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Reading<C> {
    pub category: C,
    pub value: String,
}

impl<C> Reading<C> {
    fn new(category: C, value: impl Into<String>) -> Self {
        Self {
            category,
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum BloodPressureCategory {
    HypertensionStage2,
    HypertensionStage1,
    Elevated,
    Normal,
    Low,
    Unknown,
}

impl BloodPressureCategory {
    pub const fn ordered() -> [Self; 6] {
        [
            Self::HypertensionStage2,
            Self::HypertensionStage1,
            Self::Elevated,
            Self::Normal,
            Self::Low,
            Self::Unknown,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::HypertensionStage2 => "Hypertension stage 2",
            Self::HypertensionStage1 => "Hypertension stage 1",
            Self::Elevated => "Elevated blood pressure",
            Self::Normal => "Normal blood pressure",
            Self::Low => "Low blood pressure",
            Self::Unknown => "Unknown",
        }
    }

    pub const fn interpretation(self) -> &'static str {
        match self {
            Self::HypertensionStage2 => "High Blood Pressure (Hypertension Stage 2)",
            Self::HypertensionStage1 => "High Blood Pressure (Hypertension Stage 1)",
            Self::Elevated => "Elevated Blood Pressure",
            Self::Normal => "Normal Blood Pressure",
            Self::Low => "Low Blood Pressure",
            Self::Unknown => "Blood Pressure Unknown",
        }
    }
}

static BLOOD_PRESSURE_ANSWERS: [(&str, BloodPressureCategory, &str); 5] = [
    (
        "140 mmhg or higher / 90 mmhg or higher",
        BloodPressureCategory::HypertensionStage2,
        "140+/90+",
    ),
    (
        "130-139 mmhg / 85-89 mmhg",
        BloodPressureCategory::HypertensionStage1,
        "130-139/85-89",
    ),
    (
        "120-129 mmhg / 80-84 mmhg",
        BloodPressureCategory::Elevated,
        "120-129/80-84",
    ),
    (
        "80-119 mmhg / 60-79 mmhg",
        BloodPressureCategory::Normal,
        "80-119/60-79",
    ),
    (
        "less than 80 mmhg / less than 60 mmhg",
        BloodPressureCategory::Low,
        "<80/<60",
    ),
];

pub fn classify_blood_pressure(raw: &str) -> Reading<BloodPressureCategory> {
    let normalized = normalize_response(raw);
    if let Some((_, category, value)) = BLOOD_PRESSURE_ANSWERS
        .iter()
        .find(|(answer, _, _)| *answer == normalized)
    {
        return Reading::new(*category, *value);
    }

    if let Some((systolic, diastolic)) = parse_pressure(&normalized) {
        let category = if systolic >= 140 || diastolic >= 90 {
            BloodPressureCategory::HypertensionStage2
        } else if systolic >= 130 || diastolic >= 85 {
            BloodPressureCategory::HypertensionStage1
        } else if systolic >= 120 || diastolic >= 80 {
            BloodPressureCategory::Elevated
        } else if systolic >= 80 && diastolic >= 60 {
            BloodPressureCategory::Normal
        } else {
            BloodPressureCategory::Low
        };
        return Reading::new(category, format!("{systolic}/{diastolic}"));
    }

    debug!(answer = %normalized, "blood pressure answer unmatched");
    Reading::new(BloodPressureCategory::Unknown, "Unknown")
}

fn parse_pressure(normalized: &str) -> Option<(u16, u16)> {
    let compact: String = normalized
        .replace("mmhg", "")
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();
    let (systolic, diastolic) = compact.split_once('/')?;
    Some((systolic.parse().ok()?, diastolic.parse().ok()?))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum GlucoseCategory {
    UncontrolledDiabetes,
    Diabetes,
    Prediabetes,
    Normal,
    Unknown,
}

impl GlucoseCategory {
    pub const fn ordered() -> [Self; 5] {
        [
            Self::UncontrolledDiabetes,
            Self::Diabetes,
            Self::Prediabetes,
            Self::Normal,
            Self::Unknown,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::UncontrolledDiabetes => "Uncontrolled Diabetes",
            Self::Diabetes => "Diabetes",
            Self::Prediabetes => "Prediabetes",
            Self::Normal => "Normal",
            Self::Unknown => "Unknown",
        }
    }

    fn from_level(mg_per_dl: f64) -> Self {
        if mg_per_dl >= 150.0 {
            Self::UncontrolledDiabetes
        } else if mg_per_dl >= 126.0 {
            Self::Diabetes
        } else if mg_per_dl >= 100.0 {
            Self::Prediabetes
        } else if mg_per_dl >= 70.0 {
            Self::Normal
        } else {
            Self::Unknown
        }
    }
}

static GLUCOSE_ANSWERS: [(&str, GlucoseCategory, &str); 4] = [
    (
        "150 mg/dl or higher",
        GlucoseCategory::UncontrolledDiabetes,
        "150+",
    ),
    ("126-149 mg/dl", GlucoseCategory::Diabetes, "126-149"),
    ("100-125 mg/dl", GlucoseCategory::Prediabetes, "100-125"),
    ("70-99 mg/dl", GlucoseCategory::Normal, "70-99"),
];

pub fn classify_glucose(raw: &str) -> Reading<GlucoseCategory> {
    let normalized = normalize_response(raw);
    if let Some((_, category, value)) = GLUCOSE_ANSWERS
        .iter()
        .find(|(answer, _, _)| *answer == normalized)
    {
        return Reading::new(*category, *value);
    }

    if let Some(level) = parse_level(&normalized, "mg/dl") {
        let category = GlucoseCategory::from_level(level);
        if category != GlucoseCategory::Unknown {
            return Reading::new(category, format!("{level}"));
        }
    }

    debug!(answer = %normalized, "glucose answer unmatched");
    Reading::new(GlucoseCategory::Unknown, "Unknown")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum CholesterolCategory {
    HighRisk,
    Borderline,
    Normal,
    Optimal,
    Unknown,
}

impl CholesterolCategory {
    pub const fn ordered() -> [Self; 5] {
        [
            Self::HighRisk,
            Self::Borderline,
            Self::Normal,
            Self::Optimal,
            Self::Unknown,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::HighRisk => "High Risk",
            Self::Borderline => "Borderline",
            Self::Normal => "Normal",
            Self::Optimal => "Optimal",
            Self::Unknown => "Unknown",
        }
    }

    fn from_ratio(ratio: f64) -> Self {
        if ratio > 3.0 {
            Self::HighRisk
        } else if ratio >= 2.5 {
            Self::Borderline
        } else if ratio >= 1.5 {
            Self::Normal
        } else if ratio >= 0.0 {
            Self::Optimal
        } else {
            Self::Unknown
        }
    }
}

// Reported levels are the bucket midpoints used on individual reports.
static CHOLESTEROL_ANSWERS: [(&str, CholesterolCategory, &str); 5] = [
    ("greater than 3", CholesterolCategory::HighRisk, "3.1"),
    ("2.5-3", CholesterolCategory::Borderline, "2.75"),
    ("2-2.5", CholesterolCategory::Normal, "2.25"),
    ("1.5-2", CholesterolCategory::Normal, "1.75"),
    ("less than 1.5", CholesterolCategory::Optimal, "1.4"),
];

pub fn classify_cholesterol(raw: &str) -> Reading<CholesterolCategory> {
    let normalized = normalize_response(raw);
    if let Some((_, category, value)) = CHOLESTEROL_ANSWERS
        .iter()
        .find(|(answer, _, _)| *answer == normalized)
    {
        return Reading::new(*category, *value);
    }

    if let Some(ratio) = parse_level(&normalized, "mmol/l") {
        let category = CholesterolCategory::from_ratio(ratio);
        if category != CholesterolCategory::Unknown {
            return Reading::new(category, format!("{ratio}"));
        }
    }

    debug!(answer = %normalized, "cholesterol answer unmatched");
    Reading::new(CholesterolCategory::Unknown, "Unknown")
}

fn parse_level(normalized: &str, unit: &str) -> Option<f64> {
    normalized
        .trim_end_matches(unit)
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum BmiCategory {
    BelowNormal,
    Normal,
    Overweight,
    ClassIObesity,
    ClassIIObesity,
    ClassIIIObesity,
}

impl BmiCategory {
    pub const fn ordered() -> [Self; 6] {
        [
            Self::BelowNormal,
            Self::Normal,
            Self::Overweight,
            Self::ClassIObesity,
            Self::ClassIIObesity,
            Self::ClassIIIObesity,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::BelowNormal => "Below-Normal-Weight",
            Self::Normal => "Normal-Weight",
            Self::Overweight => "Overweight",
            Self::ClassIObesity => "Class-I-Obesity",
            Self::ClassIIObesity => "Class-II-Obesity",
            Self::ClassIIIObesity => "Class-III-Obesity",
        }
    }

    pub fn from_bmi(bmi: f64) -> Self {
        if bmi < 18.5 {
            Self::BelowNormal
        } else if bmi < 25.0 {
            Self::Normal
        } else if bmi < 30.0 {
            Self::Overweight
        } else if bmi < 35.0 {
            Self::ClassIObesity
        } else if bmi < 40.0 {
            Self::ClassIIObesity
        } else {
            Self::ClassIIIObesity
        }
    }
}

/// Body-mass index in kg/m², or `None` when either measurement is unusable.
pub fn body_mass_index(weight_kg: f64, height: Height) -> Option<f64> {
    let meters = height.meters();
    if !(weight_kg > 0.0) || meters <= 0.0 {
        return None;
    }
    let bmi = weight_kg / (meters * meters);
    bmi.is_finite().then_some(bmi)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Satisfaction {
    Satisfied,
    NotSatisfied,
    Unknown,
}

pub fn classify_satisfaction(raw: &str) -> Satisfaction {
    match normalize_response(raw).as_str() {
        "yes" | "satisfied" => Satisfaction::Satisfied,
        "no" | "not satisfied" | "unsatisfied" => Satisfaction::NotSatisfied,
        _ => Satisfaction::Unknown,
    }
}
