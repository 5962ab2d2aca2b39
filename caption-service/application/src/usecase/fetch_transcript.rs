use std::sync::Arc;

use async_trait::async_trait;

use caption_domain::{extract_video_id, select_track, Transcript, TranscriptProviderPort};

use crate::{ApplicationError, TranscriptRequest, TranscriptResponse};

#[async_trait]
pub trait FetchTranscriptUseCase: Send + Sync {
    async fn fetch_transcript(
        &self,
        request: TranscriptRequest,
    ) -> Result<TranscriptResponse, ApplicationError>;
}

pub struct FetchTranscriptUseCaseImpl {
    provider: Arc<dyn TranscriptProviderPort>,
    default_language: String,
}

impl FetchTranscriptUseCaseImpl {
    pub fn new(provider: Arc<dyn TranscriptProviderPort>, default_language: String) -> Self {
        Self {
            provider,
            default_language,
        }
    }
}

#[async_trait]
impl FetchTranscriptUseCase for FetchTranscriptUseCaseImpl {
    async fn fetch_transcript(
        &self,
        request: TranscriptRequest,
    ) -> Result<TranscriptResponse, ApplicationError> {
        let language = request
            .language
            .unwrap_or_else(|| self.default_language.clone());
        let video_id = extract_video_id(&request.video_url)?;

        tracing::debug!(
            video_id = %video_id,
            preferred_language = %language,
            "listing transcript tracks"
        );

        let tracks = self.provider.list_tracks(&video_id).await?;
        let selection = select_track(&tracks, &language)?;

        tracing::debug!(
            video_id = %video_id,
            available_tracks = tracks.tracks.len(),
            selected_language = %selection.track.language_code,
            tier = ?selection.tier,
            "transcript track selected"
        );

        let segments = self.provider.fetch_segments(selection.track).await?;
        let transcript = Transcript {
            video_id,
            track: selection.track.clone(),
            segments,
        };

        tracing::debug!(
            video_id = %transcript.video_id,
            segment_count = transcript.segments.len(),
            "transcript fetched"
        );

        Ok(TranscriptResponse::from(transcript))
    }
}
