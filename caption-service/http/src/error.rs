use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use caption_application::ApplicationError;
use caption_domain::DomainError;
use serde_json::json;

pub const TRANSCRIPT_NOT_FOUND: &str = "transcript not found for this video";
pub const VIDEO_UNAVAILABLE: &str = "video unavailable";

#[derive(Debug)]
pub enum HttpError {
    BadRequest { message: String },
    Validation { message: String },
    NotFound { message: String },
    Internal { message: String },
}

impl HttpError {
    pub fn status(&self) -> StatusCode {
        match self {
            HttpError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            HttpError::Validation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            HttpError::NotFound { .. } => StatusCode::NOT_FOUND,
            HttpError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self {
            HttpError::BadRequest { message }
            | HttpError::Validation { message }
            | HttpError::NotFound { message }
            | HttpError::Internal { message } => message,
        };

        (
            status,
            Json(json!({
                "detail": message,
            })),
        )
            .into_response()
    }
}

pub fn error_mapper(error: ApplicationError) -> HttpError {
    match error {
        ApplicationError::Domain(DomainError::InvalidUrl(message)) => {
            HttpError::BadRequest { message }
        }
        ApplicationError::Domain(DomainError::TranscriptNotFound { .. }) => HttpError::NotFound {
            message: TRANSCRIPT_NOT_FOUND.to_string(),
        },
        ApplicationError::Domain(DomainError::VideoUnavailable { .. }) => HttpError::NotFound {
            message: VIDEO_UNAVAILABLE.to_string(),
        },
        ApplicationError::Domain(error) => HttpError::Internal {
            message: format!("an error occurred: {error}"),
        },
    }
}
