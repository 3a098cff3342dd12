use actix_web::{HttpResponse, web};
use serde::Serialize;

use crate::chat::{ModelBackend, QueryService};
use crate::leaderboard::{LeaderboardEntry, rank};
use crate::schedule::BusyBlockSource;

use super::ApiResponse;

#[derive(Serialize)]
struct LeaderboardDTO {
    success: bool,
    models: Vec<LeaderboardEntry>,
}

pub async fn handle_leaderboard<S, M>(service: web::Data<QueryService<S, M>>) -> ApiResponse
where
    S: BusyBlockSource + 'static,
    M: ModelBackend + 'static,
{
    let models = rank(service.users());
    tracing::debug!("Ranked {} models", models.len());

    Ok(HttpResponse::Ok().json(LeaderboardDTO { success: true, models }))
}
