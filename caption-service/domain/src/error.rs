use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("{0}")]
    InvalidUrl(String),

    #[error("no transcript found for video {video_id}")]
    TranscriptNotFound { video_id: String },

    #[error("video {video_id} is unavailable")]
    VideoUnavailable { video_id: String },

    #[error("{service} request failed: {message}")]
    ExternalService { service: String, message: String },

    #[error("internal error: {0}")]
    Internal(String),
}

impl DomainError {
    pub fn invalid_url(message: &str) -> Self {
        Self::InvalidUrl(message.to_string())
    }

    pub fn transcript_not_found(video_id: &str) -> Self {
        Self::TranscriptNotFound {
            video_id: video_id.to_string(),
        }
    }

    pub fn video_unavailable(video_id: &str) -> Self {
        Self::VideoUnavailable {
            video_id: video_id.to_string(),
        }
    }

    pub fn external_service_error(service: &str, message: &str) -> Self {
        Self::ExternalService {
            service: service.to_string(),
            message: message.to_string(),
        }
    }

    pub fn internal_error(message: &str) -> Self {
        Self::Internal(message.to_string())
    }
}
