mod cli;
mod demo;
mod infra;
mod routes;
mod server;
mod token;

use internboard::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
