mod cli;
mod demo;
mod explore;
mod infra;
mod routes;
mod server;

use sodapop::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
