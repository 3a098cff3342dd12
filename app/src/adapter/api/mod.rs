mod calendar;
mod leaderboard;
mod query;

use actix_web::{HttpResponse, ResponseError, http::StatusCode, web};
use derive_more::derive::{Display, Error};

use crate::chat::{ModelBackend, QueryError, QueryService};
use crate::schedule::BusyBlockSource;

pub fn new_routes<S, M>(service: QueryService<S, M>) -> actix_web::Scope
where
    S: BusyBlockSource + 'static,
    M: ModelBackend + 'static,
{
    let json_config = web::JsonConfig::default().error_handler(|e, _| {
        tracing::debug!("Rejecting request body: {}", e);
        ApiError::BadRequest("Invalid request body".to_owned()).into()
    });

    web::scope("/api")
        .app_data(web::Data::new(service))
        .app_data(json_config)
        .route("/query/{username}", web::post().to(query::handle_query::<S, M>))
        .route("/leaderboard", web::get().to(leaderboard::handle_leaderboard::<S, M>))
        .route(
            "/calendar/check-availability/{username}",
            web::get().to(calendar::handle_check_availability::<S, M>),
        )
}

type ApiResponse = Result<HttpResponse, ApiError>;

#[derive(Debug, Error, Display)]
enum ApiError {
    #[display("{_0}")]
    BadRequest(#[error(not(source))] String),

    #[display("{_0}")]
    NotFound(#[error(not(source))] String),

    #[display("Error in model processing")]
    ModelError(#[error(not(source))] anyhow::Error),

    #[display("Invalid response from model")]
    InvalidModelResponse,

    #[display("Internal error")]
    Internal(#[error(not(source))] anyhow::Error),
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!("ApiError: {:?}", self);
        } else {
            tracing::debug!("ApiError: {:?}", self);
        }

        HttpResponse::build(status).json(serde_json::json!({
            "success": false,
            "message": self.to_string(),
        }))
    }
}

impl From<QueryError> for ApiError {
    fn from(value: QueryError) -> Self {
        match value {
            QueryError::EmptyQuery => ApiError::BadRequest(value.to_string()),
            QueryError::UserNotFound | QueryError::MissingSelfAssessment => ApiError::NotFound(value.to_string()),
            QueryError::ModelUnavailable(e) => ApiError::ModelError(e),
            QueryError::InvalidModelResponse => ApiError::InvalidModelResponse,
        }
    }
}
