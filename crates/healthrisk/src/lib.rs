//! Employee health-risk assessment reporting.
//!
//! Stored questionnaire rows are parsed at the [`workflows::assessment::parser`] boundary,
//! classified and scored per employee, then rolled up into the company report served by
//! [`workflows::assessment::report_router`].

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;
