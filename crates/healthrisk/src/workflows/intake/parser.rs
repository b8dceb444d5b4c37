use crate::workflows::assessment::{Company, RawAssessmentRow};
use serde::{Deserialize, Deserializer};
use std::io::Read;

fn reader<R: Read>(source: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .trim(csv::Trim::Headers)
        .flexible(true)
        .from_reader(source)
}

pub(crate) fn parse_companies<R: Read>(source: R) -> Result<Vec<Company>, csv::Error> {
    let mut companies = Vec::new();
    for record in reader(source).deserialize::<CompanyRow>() {
        companies.push(record?.into_company());
    }
    Ok(companies)
}

pub(crate) fn parse_responses<R: Read>(source: R) -> Result<Vec<RawAssessmentRow>, csv::Error> {
    let mut rows = Vec::new();
    for record in reader(source).deserialize::<ResponseRow>() {
        rows.push(record?.into_row());
    }
    Ok(rows)
}

#[derive(Debug, Deserialize)]
struct CompanyRow {
    #[serde(default, deserialize_with = "optional_id")]
    id: Option<u64>,
    name: String,
    #[serde(rename = "companyType", default, deserialize_with = "empty_string_as_none")]
    company_type: Option<String>,
    #[serde(rename = "phoneNumber", default, deserialize_with = "empty_string_as_none")]
    phone_number: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    email: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    city: Option<String>,
    url: String,
}

impl CompanyRow {
    fn into_company(self) -> Company {
        Company {
            id: self.id,
            name: self.name.trim().to_string(),
            company_type: self.company_type,
            phone_number: self.phone_number,
            email: self.email,
            city: self.city,
            url: self.url.trim().to_string(),
        }
    }
}

/// One `assessment_response` export row; the JSON payload columns are kept verbatim.
#[derive(Debug, Deserialize)]
struct ResponseRow {
    #[serde(rename = "id", alias = "assessment_id", default, deserialize_with = "optional_id")]
    id: Option<u64>,
    company_slug: String,
    #[serde(default)]
    employee_info: String,
    #[serde(default)]
    health_assessment: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    created_at: Option<String>,
}

impl ResponseRow {
    fn into_row(self) -> RawAssessmentRow {
        RawAssessmentRow {
            assessment_id: self.id,
            company_slug: self.company_slug.trim().to_string(),
            employee_info: self.employee_info,
            health_assessment: self.health_assessment,
            created_at: self.created_at,
        }
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty()))
}

fn optional_id<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    match empty_string_as_none(deserializer)? {
        Some(text) => text
            .parse::<u64>()
            .map(Some)
            .map_err(|_| serde::de::Error::custom(format!("invalid id '{text}'"))),
        None => Ok(None),
    }
}
