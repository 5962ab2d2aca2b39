use serde::{Deserialize, Serialize};

use caption_domain::{Transcript, TranscriptSegment};

#[derive(Debug, Clone, Deserialize)]
pub struct TranscriptRequest {
    pub video_url: String,
    /// Falls back to the service's configured default language when absent.
    /// Codes with no matching track go through the usual fallback chain.
    pub language: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptSegmentDto {
    pub text: String,
    pub start: f64,
    pub duration: f64,
}

impl From<TranscriptSegment> for TranscriptSegmentDto {
    fn from(segment: TranscriptSegment) -> Self {
        Self {
            text: segment.text,
            start: segment.start,
            duration: segment.duration,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptResponse {
    pub success: bool,
    pub video_id: String,
    pub language: String,
    pub language_name: String,
    pub is_generated: bool,
    pub transcript: Vec<TranscriptSegmentDto>,
}

impl From<Transcript> for TranscriptResponse {
    fn from(transcript: Transcript) -> Self {
        Self {
            success: true,
            video_id: transcript.video_id.into_inner(),
            language: transcript.track.language_code,
            language_name: transcript.track.language_name,
            is_generated: transcript.track.is_generated,
            transcript: transcript
                .segments
                .into_iter()
                .map(TranscriptSegmentDto::from)
                .collect(),
        }
    }
}
