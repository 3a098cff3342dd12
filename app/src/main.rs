use anyhow::Context;
use settings::Settings;

use crate::chat::QueryService;
use crate::user::UserDirectory;

mod adapter;
mod chat;
mod core;
mod leaderboard;
mod schedule;
mod settings;
mod user;

#[tokio::main(flavor = "multi_thread")]
pub async fn main() -> anyhow::Result<()> {
    let settings = Settings::new().context("Error reading configuration")?;

    settings
        .monitoring
        .init()
        .context("Error initializing monitoring")?;

    let users = UserDirectory::new(settings.users);
    tracing::info!("Loaded {} user profiles", users.len());

    let availability = settings
        .calendar
        .new_availability_service()
        .context("Error initializing calendar client")?;
    let model = settings.model.new_client().context("Error initializing model client")?;

    let query_service = QueryService::new(users, availability, model);

    tracing::info!("Starting HTTP server");

    settings
        .http_server
        .run_server(move || vec![adapter::api::new_routes(query_service.clone())])
        .await
}
