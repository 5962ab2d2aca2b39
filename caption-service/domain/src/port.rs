use async_trait::async_trait;

use crate::{DomainError, TrackList, TranscriptSegment, TranscriptTrack, VideoId};

/// External source of caption tracks.
#[async_trait]
pub trait TranscriptProviderPort: Send + Sync {
    /// Lists every track available for `video_id`. An empty list means the
    /// video exists but has no captions.
    async fn list_tracks(&self, video_id: &VideoId) -> Result<TrackList, DomainError>;

    async fn fetch_segments(
        &self,
        track: &TranscriptTrack,
    ) -> Result<Vec<TranscriptSegment>, DomainError>;
}
