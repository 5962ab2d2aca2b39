mod transcript;

pub use transcript::{TranscriptRequest, TranscriptResponse, TranscriptSegmentDto};
