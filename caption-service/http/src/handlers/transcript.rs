use axum::{extract::State, http::StatusCode, response::Json};
use caption_application::{FetchTranscriptCommand, TranscriptRequest, TranscriptResponse};

use crate::error::{error_mapper, HttpError};
use crate::{AppState, JsonBody};

pub async fn fetch_transcript(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<TranscriptRequest>,
) -> Result<(StatusCode, Json<TranscriptResponse>), HttpError> {
    tracing::info!(
        video_url = %request.video_url,
        language = request.language.as_deref().unwrap_or("default"),
        "received transcript request"
    );

    let command = FetchTranscriptCommand::new(request);
    match state.command_handler.handle(command).await {
        Ok(response) => {
            tracing::info!(
                video_id = %response.video_id,
                language = %response.language,
                segment_count = response.transcript.len(),
                "transcript request completed"
            );
            Ok((StatusCode::OK, Json(response)))
        }
        Err(error) => {
            let http_error = error_mapper(error);
            if http_error.status().is_server_error() {
                tracing::error!(error = ?http_error, "transcript request failed");
            } else {
                tracing::warn!(error = ?http_error, "transcript request rejected");
            }
            Err(http_error)
        }
    }
}
