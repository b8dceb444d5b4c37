use crate::infra::{load_dataset, parse_date, parse_percent_base, DatasetRepository};
use chrono::{Local, NaiveDate};
use clap::Args;
use healthrisk::config::{AppConfig, ConfigError};
use healthrisk::error::AppError;
use healthrisk::workflows::assessment::population::CategoryShare;
use healthrisk::workflows::assessment::report::views::ReadingView;
use healthrisk::workflows::assessment::{
    Company, CompanyReport, EmployeeReport, PercentBase, RawAssessmentRow, ReportService,
};
use healthrisk::workflows::intake::AssessmentDataset;
use serde::Serialize;
use serde_json::json;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct ReportArgs {
    /// Company slug (the `url` column of the companies export)
    pub(crate) slug: String,
    #[command(flatten)]
    pub(crate) source: SourceArgs,
}

#[derive(Args, Debug)]
pub(crate) struct EmployeeArgs {
    /// Company slug (the `url` column of the companies export)
    pub(crate) slug: String,
    /// Assessment response id
    pub(crate) assessment_id: u64,
    #[command(flatten)]
    pub(crate) source: SourceArgs,
}

#[derive(Args, Debug, Default)]
pub(crate) struct SourceArgs {
    /// Companies CSV export. Defaults to HRA_COMPANIES_CSV.
    #[arg(long)]
    pub(crate) companies: Option<PathBuf>,
    /// Assessment responses CSV export. Defaults to HRA_RESPONSES_CSV.
    #[arg(long)]
    pub(crate) responses: Option<PathBuf>,
    /// Reference date for ages (YYYY-MM-DD). Defaults to today.
    #[arg(long, value_parser = parse_date)]
    pub(crate) today: Option<NaiveDate>,
    /// Row count percentages divide by: submitted or parsed.
    #[arg(long, value_parser = parse_percent_base)]
    pub(crate) percent_base: Option<PercentBase>,
    /// Print the JSON payload instead of the text summary.
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Reference date for ages (YYYY-MM-DD). Defaults to today.
    #[arg(long, value_parser = parse_date)]
    pub(crate) today: Option<NaiveDate>,
    /// Row count percentages divide by: submitted or parsed.
    #[arg(long, value_parser = parse_percent_base)]
    pub(crate) percent_base: Option<PercentBase>,
    /// Print the JSON payload instead of the text summary.
    #[arg(long)]
    pub(crate) json: bool,
}

fn service_for(
    source: &SourceArgs,
) -> Result<(ReportService<DatasetRepository>, NaiveDate), AppError> {
    let config = AppConfig::load()?;
    let dataset = load_dataset(
        source.companies.clone(),
        source.responses.clone(),
        Some(&config.reporting),
    )?
    .ok_or(AppError::Config(ConfigError::IncompleteDataset))?;

    let percent_base = source.percent_base.unwrap_or(config.reporting.percent_base);
    let today = source.today.unwrap_or_else(|| Local::now().date_naive());
    let service = ReportService::new(Arc::new(DatasetRepository::new(dataset)), percent_base);
    Ok((service, today))
}

pub(crate) fn run_report(args: ReportArgs) -> Result<(), AppError> {
    let (service, today) = service_for(&args.source)?;
    let report = service.company_report(&args.slug, today)?;
    if args.source.json {
        print_json(&report);
    } else {
        render_company_report(&report);
    }
    Ok(())
}

pub(crate) fn run_employee_report(args: EmployeeArgs) -> Result<(), AppError> {
    let (service, today) = service_for(&args.source)?;
    let report = service.employee_report(&args.slug, args.assessment_id, today)?;
    if args.source.json {
        print_json(&report);
    } else {
        render_employee_report(&report);
    }
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        today,
        percent_base,
        json,
    } = args;

    let today = today.unwrap_or_else(|| Local::now().date_naive());
    let repository = Arc::new(DatasetRepository::new(synthetic_dataset()));
    let service = ReportService::new(repository, percent_base.unwrap_or_default());

    let report = service.company_report(DEMO_SLUG, today)?;
    if json {
        print_json(&report);
        return Ok(());
    }

    println!("Health risk assessment demo");
    render_company_report(&report);

    println!("\nSample individual report");
    let employee = service.employee_report(DEMO_SLUG, 1, today)?;
    render_employee_report(&employee);
    Ok(())
}

fn print_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(err) => println!("report payload unavailable: {}", err),
    }
}

fn render_shares<'a>(
    title: &str,
    shares: impl Iterator<Item = &'a (&'static str, CategoryShare)>,
) {
    println!("{title}:");
    for (label, share) in shares {
        println!("  - {}: {} ({}%)", label, share.count, share.percentage);
    }
}

pub(crate) fn render_company_report(report: &CompanyReport) {
    let company = &report.company;
    let meta = &report.meta;

    println!("\n{} ({})", company.name, company.url);
    println!(
        "- {} submissions | {} parsed | {} skipped | percentages over {} rows",
        meta.submitted_rows, meta.parsed_rows, meta.skipped_rows, meta.percent_base
    );
    println!(
        "- {} male | {} female | generated for {}",
        company.male_employees, company.female_employees, meta.generated_on
    );

    println!("Age distribution:");
    for (bucket, count) in company.age_distribution.iter() {
        println!("  - {}: {}", bucket, count);
    }
    println!("BMI distribution:");
    for (category, count) in company.bmi_data.iter() {
        println!("  - {}: {}", category, count);
    }

    let reported: Vec<_> = company
        .condition_prevalence
        .iter()
        .filter(|(_, share)| share.as_str() != "0.00")
        .collect();
    if reported.is_empty() {
        println!("Condition prevalence: none reported");
    } else {
        println!("Condition prevalence:");
        for (condition, share) in reported {
            println!("  - {}: {}%", condition, share);
        }
    }

    render_shares("Blood pressure", company.health_data.blood_pressure.iter());
    render_shares("Glucose", company.health_data.glucose.iter());
    render_shares("Cholesterol", company.health_data.cholesterol.iter());

    println!("Overall risk levels:");
    for (band, share) in company.risk_levels.iter() {
        println!("  - {}: {}%", band, share);
    }

    println!("Section averages:");
    for (section, average) in company.section_wise_risk_distribution.sections.iter() {
        if average.respondents == 0 {
            continue;
        }
        println!(
            "  - {}: {} over {} respondents ({})",
            section, average.average_score, average.respondents, average.category
        );
    }

    let women = &company.woman_health_chart;
    println!(
        "Women health: {}% report gynecological issues | {}% planning pregnancy",
        women.employees_with_gynecological_issues, women.employees_planning_pregnancy
    );

    let expenses = &company.expenses_chart;
    println!(
        "Out-of-pocket spend split: OPD {}% | lab {}% | pharmacy {}%",
        expenses.opd, expenses.lab, expenses.pharmacy
    );
    println!(
        "Benefit satisfaction: {}% satisfied | {}% not satisfied",
        company.satisfaction_levels.satisfied, company.satisfaction_levels.not_satisfied
    );
    println!("Benefit services (using / covered):");
    for (service, usage) in company.service_benefit.iter() {
        println!("  - {}: {}% / {}%", service, usage.using, usage.covered);
    }
}

fn render_reading(title: &str, reading: &ReadingView) {
    match reading.interpretation {
        Some(interpretation) => println!(
            "- {}: {} [{}] {}",
            title, reading.value, reading.category, interpretation
        ),
        None => println!("- {}: {} [{}]", title, reading.value, reading.category),
    }
}

pub(crate) fn render_employee_report(report: &EmployeeReport) {
    println!("\n{} ({})", report.full_name, report.company);
    if let Some(age) = report.age {
        println!("- Age {}", age);
    }
    match (&report.bmi, report.bmi_category) {
        (Some(bmi), Some(category)) => println!("- BMI {} ({})", bmi, category),
        _ => println!("- BMI unavailable"),
    }
    render_reading("Blood pressure", &report.blood_pressure);
    render_reading("Glucose", &report.glucose);
    render_reading("Cholesterol ratio", &report.cholesterol);

    println!("Section scores:");
    for section in &report.section_scores {
        println!(
            "  - {}: {} ({})",
            section.section_name, section.score, section.category
        );
    }
    println!(
        "Total score {} -> {}: {}",
        report.total_score, report.risk_band, report.risk_message
    );
}

const DEMO_SLUG: &str = "northwind";

type DemoEmployee = (&'static str, &'static str, &'static str, &'static str, u32);

const DEMO_EMPLOYEES: [DemoEmployee; 8] = [
    ("Kavya", "Female", "1991-02-14", "5.3", 58),
    ("Rohan", "Male", "1984-07-09", "5.9", 82),
    ("Meera", "Female", "1999-12-01", "5.1", 49),
    ("Vikram", "Male", "1972-03-22", "5.7", 96),
    ("Anita", "Female", "1966-10-30", "5.2", 71),
    ("Sahil", "Male", "2001-05-18", "6.0", 68),
    ("Farah", "Female", "1988-08-08", "5.5", 63),
    ("Dev", "Male", "1979-01-27", "5.11", 104),
];

const DEMO_PRESSURES: [&str; 4] = [
    "80-119 mmHg / 60-79 mmHg",
    "120-129 mmHg / 80-84 mmHg",
    "130-139 mmHg / 85-89 mmHg",
    "140 mmHg or higher / 90 mmHg or higher",
];

const DEMO_GLUCOSE: [&str; 3] = ["70-99 mg/dL", "100-125 mg/dL", "126-149 mg/dL"];

const DEMO_CHOLESTEROL: [&str; 3] = ["Less than 1.5", "2-2.5", "Greater than 3"];

const DEMO_SPEND: [&str; 4] = ["Nil", "Below 5,000", "5,000 - 10,000", "10,000 - 20,000"];

const DEMO_CONDITIONS: [&[&str]; 4] = [
    &[],
    &["Hypertension"],
    &["Diabetes", "Thyroid Disease"],
    &["Asthma"],
];

fn demo_row(index: usize, (name, gender, dob, height, weight): DemoEmployee) -> RawAssessmentRow {
    let employee = json!({
        "firstName": name,
        "lastName": "Demo",
        "email": format!("{}@northwind.test", name.to_lowercase()),
        "companyName": "Northwind Logistics",
        "occupation": if index % 2 == 0 { "Operations" } else { "Finance" },
        "dob": dob,
        "gender": gender,
        "height": height,
        "weight": weight
    });

    let mut sections = vec![
        json!({"subHeading": "Personal Health Habits", "sectionScore": 8 + index * 4, "questions": []}),
        json!({"subHeading": "Personal Medical History", "sectionScore": 20 + index * 9, "questions": [
            {"questionId": "PMH3", "response": DEMO_CONDITIONS[index % DEMO_CONDITIONS.len()]},
            {"questionId": "PMH14", "response": DEMO_PRESSURES[index % DEMO_PRESSURES.len()]},
            {"questionId": "PMH15", "response": DEMO_GLUCOSE[index % DEMO_GLUCOSE.len()]},
            {"questionId": "PMH16", "response": DEMO_CHOLESTEROL[index % DEMO_CHOLESTEROL.len()]}
        ]}),
    ];
    if gender == "Female" {
        sections.push(json!({"subHeading": "Women Health", "sectionScore": 4 + index * 2, "questions": [
            {"questionId": "WH2", "response": if index % 4 == 0 { json!(["Menstrual Irregularities"]) } else { json!(["None"]) }},
            {"questionId": "WH4", "response": if index == 2 { "Yes" } else { "No" }}
        ]}));
    }
    sections.push(json!({"subHeading": "Burnout at Work", "sectionScore": 10 + index * 7, "questions": []}));
    sections.push(json!({"subHeading": "Health Benefits and Expenditure", "questions": [
        {"questionId": "HBE1", "response": if index % 3 == 0 { "No" } else { "Yes" }},
        {"questionId": "HBE2", "response": ["OPD Consultation", "Pharmacy"]},
        {"questionId": "HBE3", "response": ["OPD Consultation"]},
        {"questionId": "HBE4", "response": DEMO_SPEND[index % DEMO_SPEND.len()]},
        {"questionId": "HBE5", "response": DEMO_SPEND[(index + 1) % DEMO_SPEND.len()]},
        {"questionId": "HBE6", "response": DEMO_SPEND[(index + 2) % DEMO_SPEND.len()]},
        {"questionId": "HBE7", "response": if index % 2 == 0 { "Yes" } else { "No" }},
        {"questionId": "HBE8", "response": if index % 3 == 1 { "Yes" } else { "No" }},
        {"questionId": "HBE9", "response": ["Spouse", "Children"]}
    ]}));

    RawAssessmentRow {
        assessment_id: Some(index as u64 + 1),
        company_slug: DEMO_SLUG.to_string(),
        employee_info: employee.to_string(),
        health_assessment: serde_json::Value::Array(sections).to_string(),
        created_at: Some(format!("2024-05-{:02}T10:00:00Z", index + 1)),
    }
}

/// A small company with varied answers, plus one unreadable submission.
pub(crate) fn synthetic_dataset() -> AssessmentDataset {
    let mut responses: Vec<RawAssessmentRow> = DEMO_EMPLOYEES
        .iter()
        .enumerate()
        .map(|(index, employee)| demo_row(index, *employee))
        .collect();
    responses.push(RawAssessmentRow {
        assessment_id: Some(DEMO_EMPLOYEES.len() as u64 + 1),
        company_slug: DEMO_SLUG.to_string(),
        employee_info: json!({"firstName": "Partial", "gender": "Male"}).to_string(),
        health_assessment: "[{\"subHeading\": \"Personal Medical History\"".to_string(),
        created_at: None,
    });

    AssessmentDataset {
        companies: vec![Company {
            id: Some(1),
            name: "Northwind Logistics".to_string(),
            company_type: Some("Logistics".to_string()),
            phone_number: None,
            email: Some("people@northwind.test".to_string()),
            city: Some("Bengaluru".to_string()),
            url: DEMO_SLUG.to_string(),
        }],
        responses,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 30).expect("valid date")
    }

    fn service() -> ReportService<DatasetRepository> {
        ReportService::new(
            Arc::new(DatasetRepository::new(synthetic_dataset())),
            PercentBase::Submitted,
        )
    }

    #[test]
    fn synthetic_company_reports_every_submission() {
        let report = service().company_report(DEMO_SLUG, today()).expect("report builds");
        assert_eq!(report.company.total_employees, DEMO_EMPLOYEES.len() + 1);
        assert_eq!(report.meta.skipped_rows, 1);
        assert_eq!(report.company.male_employees, 4);
        assert_eq!(report.company.female_employees, 4);
        assert_eq!(report.company.expenses_chart.total, "100.00");

        let aged: usize = report.company.age_distribution.iter().map(|(_, count)| count).sum();
        assert_eq!(aged, DEMO_EMPLOYEES.len());
    }

    #[test]
    fn synthetic_employee_report_resolves() {
        let report = service().employee_report(DEMO_SLUG, 1, today()).expect("employee report");
        assert_eq!(report.full_name, "Kavya Demo");
        assert_eq!(report.age, Some(33));
        assert_eq!(report.blood_pressure.category, "Normal blood pressure");
        assert!(report.section_scores.iter().any(|section| section.section_name == "Women Health"));
    }

    #[test]
    fn unreadable_synthetic_submission_is_reported() {
        let err = service()
            .employee_report(DEMO_SLUG, DEMO_EMPLOYEES.len() as u64 + 1, today())
            .expect_err("broken row");
        assert!(err.to_string().contains(&(DEMO_EMPLOYEES.len() + 1).to_string()));
    }

    #[test]
    fn demo_renders_without_a_dataset() {
        let args = DemoArgs {
            today: Some(today()),
            percent_base: Some(PercentBase::Parsed),
            json: false,
        };
        run_demo(args).expect("demo runs");
    }

    fn write_exports(name: &str) -> (PathBuf, PathBuf) {
        let dir = std::env::temp_dir().join(format!("healthrisk-demo-{name}-{}", std::process::id()));
        std::fs::create_dir_all(&dir).expect("temp dir");
        let companies = dir.join("companies.csv");
        let responses = dir.join("responses.csv");
        std::fs::write(&companies, "id,name,url\n1,Acme,acme\n").expect("write companies");
        std::fs::write(
            &responses,
            "id,company_slug,employee_info,health_assessment,created_at\n1,acme,{},[],\n",
        )
        .expect("write responses");
        (companies, responses)
    }

    #[test]
    fn report_command_prints_from_csv_exports() {
        for json in [true, false] {
            let (companies, responses) = write_exports(if json { "json" } else { "text" });
            let args = ReportArgs {
                slug: "acme".to_string(),
                source: SourceArgs {
                    companies: Some(companies.clone()),
                    responses: Some(responses),
                    today: Some(today()),
                    percent_base: Some(PercentBase::Parsed),
                    json,
                },
            };
            run_report(args).expect("report prints");
            if let Some(dir) = companies.parent() {
                std::fs::remove_dir_all(dir).ok();
            }
        }
    }
}
