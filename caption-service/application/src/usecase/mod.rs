mod fetch_transcript;

pub use fetch_transcript::{FetchTranscriptUseCase, FetchTranscriptUseCaseImpl};
