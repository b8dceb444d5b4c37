mod employee;
mod summary;
pub mod views;

pub use employee::employee_report;
pub use summary::{assemble_report, compute_report, ReportOptions};
pub use views::{CompanyReport, EmployeeReport};
