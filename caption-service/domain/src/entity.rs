use std::fmt;

/// Identifier of a YouTube video as extracted from a URL.
///
/// Only [`crate::extract_video_id`] constructs one from user input, which
/// guarantees it is never empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VideoId(String);

impl VideoId {
    pub(crate) fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for VideoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One caption track a provider offers for a video.
///
/// `source` belongs to the provider that listed the track (for YouTube it is
/// the timed-text URL); nothing outside that provider should interpret it.
#[derive(Debug, Clone, PartialEq)]
pub struct TranscriptTrack {
    pub language_code: String,
    pub language_name: String,
    pub is_generated: bool,
    pub source: String,
}

/// Tracks available for one video, in the order the provider listed them.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackList {
    pub video_id: VideoId,
    pub tracks: Vec<TranscriptTrack>,
}

impl TrackList {
    pub fn new(video_id: VideoId, tracks: Vec<TranscriptTrack>) -> Self {
        Self { video_id, tracks }
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Returns the first track matching one of `language_codes`, trying the
    /// codes in order. For a given code a manually created track wins over
    /// an auto-generated one.
    pub fn find(&self, language_codes: &[&str]) -> Option<&TranscriptTrack> {
        language_codes.iter().find_map(|code| {
            let mut matching = self
                .tracks
                .iter()
                .filter(|track| track.language_code == *code);
            let first = matching.next()?;
            if !first.is_generated {
                return Some(first);
            }
            matching.find(|track| !track.is_generated).or(Some(first))
        })
    }

    pub fn first(&self) -> Option<&TranscriptTrack> {
        self.tracks.first()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TranscriptSegment {
    pub text: String,
    pub start: f64,
    pub duration: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Transcript {
    pub video_id: VideoId,
    pub track: TranscriptTrack,
    pub segments: Vec<TranscriptSegment>,
}
