#![allow(dead_code)]

use chrono::NaiveDate;
use healthrisk::workflows::assessment::{Company, RawAssessmentRow};
use serde_json::{json, Value};

pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 30).expect("valid date")
}

pub fn company() -> Company {
    Company {
        id: Some(7),
        name: "Acme Industries".to_string(),
        company_type: Some("Manufacturing".to_string()),
        phone_number: Some("020-5550100".to_string()),
        email: Some("hr@acme.test".to_string()),
        city: Some("Pune".to_string()),
        url: "acme".to_string(),
    }
}

pub fn row(id: u64, employee: Value, sections: Value) -> RawAssessmentRow {
    RawAssessmentRow {
        assessment_id: Some(id),
        company_slug: "acme".to_string(),
        employee_info: employee.to_string(),
        health_assessment: sections.to_string(),
        created_at: Some("2024-06-01T09:00:00Z".to_string()),
    }
}

pub fn malformed(id: u64) -> RawAssessmentRow {
    RawAssessmentRow {
        assessment_id: Some(id),
        company_slug: "acme".to_string(),
        employee_info: json!({"firstName": "Unreadable", "gender": "Male"}).to_string(),
        health_assessment: "[{\"subHeading\": \"Personal Medical History\", ".to_string(),
        created_at: None,
    }
}

pub fn pressure_row(id: u64, pressure: Option<&str>) -> RawAssessmentRow {
    let questions = match pressure {
        Some(pressure) => json!([{"questionId": "PMH14", "response": pressure}]),
        None => json!([]),
    };
    row(
        id,
        json!({"firstName": format!("E{id}"), "gender": "Male", "dob": "1990-01-01"}),
        json!([{"subHeading": "Personal Medical History", "questions": questions}]),
    )
}

/// Three submissions with hand-computed expectations; the third does not parse.
pub fn fixture_rows() -> Vec<RawAssessmentRow> {
    vec![
        row(
            101,
            json!({
                "firstName": "Arjun", "lastName": "Mehta", "email": "arjun@acme.test",
                "gender": "Male", "dob": "1980-03-10", "weight": 90, "height": "5.10"
            }),
            json!([
                {"subHeading": "Personal Medical History", "sectionScore": 70, "questions": [
                    {"questionId": "PMH3", "response": ["Hypertension", "Diabetes"]},
                    {"questionId": "PMH14", "response": "140 mmHg or higher / 90 mmHg or higher"},
                    {"questionId": "PMH15", "response": "126-149 mg/dL"},
                    {"questionId": "PMH16", "response": "2.5-3"}
                ]},
                {"subHeading": "Burnout at Work", "sectionScore": 45, "questions": []},
                {"subHeading": "Health Benefits and Expenditure", "questions": [
                    {"questionId": "HBE1", "response": "Yes"},
                    {"questionId": "HBE2", "response": ["OPD Consultation", "Pharmacy"]},
                    {"questionId": "HBE3", "response": ["OPD Consultation"]},
                    {"questionId": "HBE4", "response": "5,000 - 10,000"},
                    {"questionId": "HBE5", "response": "Below 5,000"},
                    {"questionId": "HBE6", "response": "Nil"},
                    {"questionId": "HBE7", "response": "Yes"}
                ]}
            ]),
        ),
        row(
            102,
            json!({
                "firstName": "Priya", "lastName": "Nair", "email": "priya@acme.test",
                "gender": "Female", "dob": "1996-11-02", "weight": "55", "height": 5.4
            }),
            json!([
                {"subHeading": "Personal Medical History", "sectionScore": 12, "questions": [
                    {"questionId": "PMH5", "response": ["Anemia"]},
                    {"questionId": "PMH14", "response": "80-119 mmHg / 60-79 mmHg"},
                    {"questionId": "PMH15", "response": "70-99 mg/dL"},
                    {"questionId": "PMH16", "response": "Less than 1.5"}
                ]},
                {"subHeading": "Women Health", "sectionScore": 8, "questions": [
                    {"questionId": "WH2", "response": ["Polycystic Ovary Syndrome (PCOS)"]},
                    {"questionId": "WH4", "response": "Yes"}
                ]},
                {"subHeading": "Burnout at Work", "sectionScore": 15, "questions": []},
                {"subHeading": "Health Benefits and Expenditure", "questions": [
                    {"questionId": "HBE1", "response": "No"},
                    {"questionId": "HBE2", "response": ["Pharmacy"]},
                    {"questionId": "HBE4", "response": "Below 5,000"},
                    {"questionId": "HBE5", "response": "Nil"},
                    {"questionId": "HBE6", "response": "Above 20,000"},
                    {"questionId": "HBE8", "response": "Yes"},
                    {"questionId": "HBE9", "response": ["Spouse"]}
                ]}
            ]),
        ),
        malformed(103),
    ]
}
