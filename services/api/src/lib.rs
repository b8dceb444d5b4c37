mod cli;
mod demo;
mod infra;
mod routes;
mod server;

use healthrisk::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
