mod cli;
mod demo;
mod infra;
mod review;
mod routes;
mod server;

use moderation_review::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
