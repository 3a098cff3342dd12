use actix_web::{
    HttpResponse,
    web::{self, Json},
};

use crate::chat::{ModelBackend, QueryRequest, QueryService};
use crate::schedule::BusyBlockSource;

use super::ApiResponse;

pub async fn handle_query<S, M>(
    service: web::Data<QueryService<S, M>>,
    username: web::Path<String>,
    Json(request): Json<QueryRequest>,
) -> ApiResponse
where
    S: BusyBlockSource + 'static,
    M: ModelBackend + 'static,
{
    let reply = service.ask(&username, request).await?;
    Ok(HttpResponse::Ok().json(reply))
}
