use crate::demo::{run_demo, run_employee_report, run_report, DemoArgs, EmployeeArgs, ReportArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use healthrisk::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Health Risk Assessment Reporter",
    about = "Serve and print employee health-risk reports from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Print the population report for one company
    Report(ReportArgs),
    /// Print the individual report for one stored assessment
    Employee(EmployeeArgs),
    /// Print a report built from a synthetic company
    Demo(DemoArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Report(args) => run_report(args),
        Command::Employee(args) => run_employee_report(args),
        Command::Demo(args) => run_demo(args),
    }
}
