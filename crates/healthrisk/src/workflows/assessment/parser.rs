use super::domain::{
    AssessmentRecord, EmployeeInfo, Gender, HealthAssessment, Height, Question, QuestionCode,
    RawAssessmentRow, RecordParseError, Response, Section, SectionKind,
};
use chrono::{DateTime, NaiveDate};
use serde::Deserialize;
use serde_json::value::RawValue;
use serde_json::Value;
use tracing::debug;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EmployeeInfoPayload {
    #[serde(default)]
    first_name: Option<Value>,
    #[serde(default)]
    last_name: Option<Value>,
    #[serde(default)]
    email: Option<Value>,
    #[serde(default)]
    company_name: Option<Value>,
    #[serde(default)]
    occupation: Option<Value>,
    #[serde(default)]
    dob: Option<Value>,
    #[serde(default)]
    gender: Option<Value>,
    #[serde(default)]
    weight: Option<Value>,
    // Kept as raw JSON text so `5.10` is not collapsed to `5.1` by float parsing.
    #[serde(default)]
    height: Option<Box<RawValue>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SectionPayload {
    #[serde(default)]
    sub_heading: Option<String>,
    #[serde(default)]
    questions: Option<Vec<QuestionPayload>>,
    #[serde(default)]
    section_score: Option<Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct QuestionPayload {
    #[serde(default)]
    question_id: Option<Value>,
    #[serde(default)]
    response: Option<Value>,
    #[serde(default)]
    score: Option<Value>,
}

pub fn parse_row(row: &RawAssessmentRow) -> Result<AssessmentRecord, RecordParseError> {
    let employee = parse_employee_info(&row.employee_info)?;
    let assessment = parse_health_assessment(&row.health_assessment)?;

    Ok(AssessmentRecord {
        assessment_id: row.assessment_id,
        created_at: row.created_at.clone(),
        employee,
        assessment,
    })
}

pub fn parse_employee_info(raw: &str) -> Result<EmployeeInfo, RecordParseError> {
    let payload: EmployeeInfoPayload =
        serde_json::from_str(raw).map_err(RecordParseError::EmployeeInfo)?;

    let dob_text = text(payload.dob);
    let dob = dob_text.as_deref().and_then(parse_dob);

    let height = payload
        .height
        .as_deref()
        .map(RawValue::get)
        .filter(|raw| *raw != "null" && *raw != "\"\"")
        .and_then(|raw| match Height::parse(raw) {
            Ok(height) => Some(height),
            Err(err) => {
                debug!(error = %err, "height rejected");
                None
            }
        });

    Ok(EmployeeInfo {
        first_name: text(payload.first_name),
        last_name: text(payload.last_name),
        email: text(payload.email),
        company_name: text(payload.company_name),
        occupation: text(payload.occupation),
        dob,
        dob_text,
        gender: text(payload.gender).map(|raw| Gender::from_raw(&raw)),
        weight_kg: payload
            .weight
            .as_ref()
            .and_then(number)
            .filter(|weight| *weight > 0.0),
        height,
    })
}

pub fn parse_health_assessment(raw: &str) -> Result<HealthAssessment, RecordParseError> {
    let payload: Vec<SectionPayload> =
        serde_json::from_str(raw).map_err(RecordParseError::HealthAssessment)?;

    let sections = payload
        .into_iter()
        .map(|section| {
            let sub_heading = section.sub_heading.unwrap_or_default();
            Section {
                kind: SectionKind::from_sub_heading(&sub_heading),
                sub_heading,
                questions: section
                    .questions
                    .unwrap_or_default()
                    .into_iter()
                    .map(question)
                    .collect(),
                section_score: section.section_score.as_ref().and_then(number),
            }
        })
        .collect();

    Ok(HealthAssessment { sections })
}

fn question(payload: QuestionPayload) -> Question {
    let question_id = text(payload.question_id).unwrap_or_default();
    Question {
        code: QuestionCode::from_id(&question_id),
        question_id,
        response: payload.response.map(response).unwrap_or_default(),
        score: payload.score.as_ref().and_then(number),
    }
}

fn response(value: Value) -> Response {
    match value {
        Value::Array(items) => Response::Multiple(items.into_iter().filter_map(scalar).collect()),
        other => scalar(other).map(Response::Single).unwrap_or_default(),
    }
}

fn scalar(value: Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(true) => Some("Yes".to_string()),
        Value::Bool(false) => Some("No".to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

fn text(value: Option<Value>) -> Option<String> {
    value
        .and_then(scalar)
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
}

fn number(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|value| value.is_finite())
}

/// Accepts `YYYY-MM-DD` or a full RFC 3339 timestamp.
pub(crate) fn parse_dob(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Some(date);
    }

    if let Ok(timestamp) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(timestamp.date_naive());
    }

    trimmed
        .get(..10)
        .and_then(|prefix| NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn employee_info_reads_height_from_raw_text() {
        let info = parse_employee_info(
            r#"{"firstName":"Asha","lastName":"Rao","dob":"1990-04-12","gender":"Female","weight":"62.5","height":5.10}"#,
        )
        .expect("valid payload");

        assert_eq!(info.height.expect("height").inches, 10);
        assert_eq!(info.weight_kg, Some(62.5));
        assert_eq!(info.gender, Some(Gender::Female));
        assert_eq!(info.full_name(), "Asha Rao");
        assert_eq!(info.dob, NaiveDate::from_ymd_opt(1990, 4, 12));
    }

    #[test]
    fn employee_info_tolerates_missing_and_invalid_measurements() {
        let info = parse_employee_info(r#"{"height":"5.99","weight":0,"gender":"male"}"#)
            .expect("valid payload");
        assert!(info.height.is_none());
        assert!(info.weight_kg.is_none());
        assert_eq!(info.gender, Some(Gender::Other));
        assert!(info.dob.is_none());
    }

    #[test]
    fn employee_info_rejects_malformed_json() {
        let error = parse_employee_info("{not json").expect_err("malformed");
        assert!(matches!(error, RecordParseError::EmployeeInfo(_)));
    }

    #[test]
    fn health_assessment_maps_sections_questions_and_responses() {
        let assessment = parse_health_assessment(
            r#"[{"subHeading":"Personal Medical History","questions":[
                {"questionId":"PMH14","response":"80-119 mmHg / 60-79 mmHg","score":2},
                {"questionId":"PMH3","response":["Asthma","Gout"],"score":"4"},
                {"questionId":"PMH99","response":null}
            ]},{"subHeading":"Something New","questions":null,"sectionScore":"7"}]"#,
        )
        .expect("valid payload");

        let history = &assessment.sections[0];
        assert_eq!(history.kind, SectionKind::PersonalMedicalHistory);
        assert_eq!(history.questions[0].code, QuestionCode::Pmh14);
        assert_eq!(history.questions[1].score, Some(4.0));
        assert_eq!(
            history.questions[1].response,
            Response::Multiple(vec!["Asthma".to_string(), "Gout".to_string()])
        );
        assert_eq!(history.questions[2].code, QuestionCode::Other);
        assert_eq!(history.questions[2].response, Response::Missing);

        let other = &assessment.sections[1];
        assert_eq!(other.kind, SectionKind::Other);
        assert!(other.questions.is_empty());
        assert_eq!(other.section_score, Some(7.0));
    }

    #[test]
    fn health_assessment_requires_a_section_array() {
        let error = parse_health_assessment(r#"{"subHeading":"Women Health"}"#)
            .expect_err("object is not a section list");
        assert!(matches!(error, RecordParseError::HealthAssessment(_)));
    }

    #[test]
    fn dob_accepts_timestamps() {
        assert_eq!(
            parse_dob("1988-11-03T00:00:00.000Z"),
            NaiveDate::from_ymd_opt(1988, 11, 3)
        );
        assert_eq!(parse_dob("03/11/1988"), None);
    }
}
