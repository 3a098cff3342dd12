use actix_web::{HttpResponse, web};
use serde::Deserialize;

use crate::chat::{ModelBackend, QueryService};
use crate::core::time::{Date, Time};
use crate::schedule::BusyBlockSource;

use super::{ApiError, ApiResponse};

#[derive(Debug, Deserialize)]
pub struct CheckAvailabilityQuery {
    date: Option<String>,
    time: Option<String>,
}

pub async fn handle_check_availability<S, M>(
    service: web::Data<QueryService<S, M>>,
    username: web::Path<String>,
    query: web::Query<CheckAvailabilityQuery>,
) -> ApiResponse
where
    S: BusyBlockSource + 'static,
    M: ModelBackend + 'static,
{
    let (date, time) = match (query.date.as_deref(), query.time.as_deref()) {
        (Some(date), Some(time)) if !date.is_empty() && !time.is_empty() => (date, time),
        _ => return Err(ApiError::BadRequest("Date and time are required".to_owned())),
    };

    let date: Date = date
        .parse()
        .map_err(|_| ApiError::BadRequest(format!("Invalid date {}", date)))?;
    let time = Time::parse(time).map_err(|_| ApiError::BadRequest(format!("Invalid time {}", time)))?;

    if service.users().find(&username).is_none() {
        return Err(ApiError::NotFound("User not found".to_owned()));
    }

    let check = service
        .availability()
        .check_availability(&username, &date, time)
        .await
        .map_err(ApiError::Internal)?;

    Ok(HttpResponse::Ok().json(check))
}
