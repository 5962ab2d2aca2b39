mod fetch_transcript;

pub use fetch_transcript::{FetchTranscriptCommand, FetchTranscriptCommandHandler};
