use super::demographics::gender_counts;
use super::{Cohort, CohortMember};
use crate::workflows::assessment::domain::{Company, QuestionCode, Response, SectionKind};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NeedEntry {
    pub full_name: String,
    pub email: Option<String>,
    pub dob: Option<String>,
    pub company: String,
    pub answer: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub family_members: Option<String>,
    pub created_at: Option<String>,
}

/// Employees who asked for pharmacy (`HBE7`) or insurance (`HBE8`) support.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeNeeds {
    pub company: String,
    pub total_employees: usize,
    pub male_count: usize,
    pub female_count: usize,
    pub employees_with_pharmacy_need: Vec<NeedEntry>,
    pub employees_with_insurance_need: Vec<NeedEntry>,
}

fn answered_yes(response: &Response) -> bool {
    response
        .values()
        .any(|value| value.trim().eq_ignore_ascii_case("yes"))
}

fn joined(response: &Response) -> String {
    response.values().collect::<Vec<_>>().join(", ")
}

fn entry(company: &Company, member: &CohortMember, response: &Response) -> NeedEntry {
    let employee = &member.record.employee;
    NeedEntry {
        full_name: employee.full_name(),
        email: employee.email.clone(),
        dob: employee.dob_text.clone(),
        company: company.name.clone(),
        answer: joined(response),
        family_members: None,
        created_at: member.record.created_at.clone(),
    }
}

pub fn employee_needs(company: &Company, cohort: &Cohort) -> EmployeeNeeds {
    let mut pharmacy = Vec::new();
    let mut insurance = Vec::new();

    for member in cohort.members() {
        let Some(benefits) = member
            .record
            .assessment
            .section(SectionKind::HealthBenefitsAndExpenditure)
        else {
            continue;
        };

        if let Some(question) = benefits.answer(QuestionCode::Hbe7) {
            if answered_yes(&question.response) {
                pharmacy.push(entry(company, member, &question.response));
            }
        }

        if let Some(question) = benefits.answer(QuestionCode::Hbe8) {
            if answered_yes(&question.response) {
                let mut need = entry(company, member, &question.response);
                need.family_members = benefits
                    .answer(QuestionCode::Hbe9)
                    .map(|family| joined(&family.response));
                insurance.push(need);
            }
        }
    }

    let genders = gender_counts(cohort);
    EmployeeNeeds {
        company: company.name.clone(),
        total_employees: cohort.submitted(),
        male_count: genders.male,
        female_count: genders.female,
        employees_with_pharmacy_need: pharmacy,
        employees_with_insurance_need: insurance,
    }
}

#[cfg(test)]
mod tests {
    use super::super::fixtures::*;
    use super::*;
    use serde_json::json;

    fn company() -> Company {
        Company {
            id: Some(1),
            name: "Acme Corp".to_string(),
            company_type: None,
            phone_number: None,
            email: None,
            city: None,
            url: "acme".to_string(),
        }
    }

    fn benefits(questions: serde_json::Value) -> serde_json::Value {
        json!([section("Health Benefits and Expenditure", questions)])
    }

    #[test]
    fn collects_pharmacy_and_insurance_needs() {
        let rows = vec![
            row(
                1,
                json!({"firstName": "Ravi", "lastName": "Kumar", "email": "ravi@acme.test", "dob": "1988-03-02", "gender": "Male"}),
                benefits(json!([
                    answer("HBE7", json!("Yes")),
                    answer("HBE8", json!(["Yes"])),
                    answer("HBE9", json!(["Spouse", "Child"])),
                ])),
            ),
            row(
                2,
                json!({"firstName": "Meera", "gender": "Female"}),
                benefits(json!([answer("HBE7", json!("No")), answer("HBE8", json!("Yes"))])),
            ),
            broken(3),
        ];
        let needs = employee_needs(&company(), &Cohort::from_rows(&rows, today()));

        assert_eq!(needs.total_employees, 3);
        assert_eq!((needs.male_count, needs.female_count), (1, 1));
        assert_eq!(needs.employees_with_pharmacy_need.len(), 1);
        let ravi = &needs.employees_with_pharmacy_need[0];
        assert_eq!(ravi.full_name, "Ravi Kumar");
        assert_eq!(ravi.company, "Acme Corp");
        assert_eq!(ravi.dob.as_deref(), Some("1988-03-02"));

        assert_eq!(needs.employees_with_insurance_need.len(), 2);
        assert_eq!(
            needs.employees_with_insurance_need[0].family_members.as_deref(),
            Some("Spouse, Child")
        );
        assert_eq!(needs.employees_with_insurance_need[1].full_name, "Meera");
        assert_eq!(needs.employees_with_insurance_need[1].family_members, None);
    }
}
