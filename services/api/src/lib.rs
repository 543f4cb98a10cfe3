mod cli;
mod form;
mod infra;
mod routes;
mod server;

use fraud_check::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
