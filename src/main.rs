/*
 * Responsibility
 * - Start the tokio runtime
 * - Call app::run() (no logic here)
 */
use anyhow::Result;

mod api;
mod app;
mod config;
mod error;
mod middleware;
mod repos;
mod response;
mod services;
mod state;

#[tokio::main]
async fn main() -> Result<()> {
    app::run().await
}
