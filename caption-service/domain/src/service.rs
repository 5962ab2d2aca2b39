use crate::{DomainError, TrackList, TranscriptTrack};

pub const FALLBACK_LANGUAGE: &str = "en";

/// Which step of the language fallback chain produced the track.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackTier {
    Preferred,
    English,
    FirstAvailable,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackSelection<'a> {
    pub track: &'a TranscriptTrack,
    pub tier: FallbackTier,
}

/// Picks exactly one track: the preferred language, then English, then
/// whatever the provider listed first.
pub fn select_track<'a>(
    tracks: &'a TrackList,
    preferred_language: &str,
) -> Result<TrackSelection<'a>, DomainError> {
    if let Some(track) = tracks.find(&[preferred_language]) {
        return Ok(TrackSelection {
            track,
            tier: FallbackTier::Preferred,
        });
    }

    if preferred_language != FALLBACK_LANGUAGE {
        if let Some(track) = tracks.find(&[FALLBACK_LANGUAGE]) {
            return Ok(TrackSelection {
                track,
                tier: FallbackTier::English,
            });
        }
    }

    tracks
        .first()
        .map(|track| TrackSelection {
            track,
            tier: FallbackTier::FirstAvailable,
        })
        .ok_or_else(|| DomainError::transcript_not_found(tracks.video_id.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::VideoId;

    fn list(codes: &[&str]) -> TrackList {
        TrackList::new(
            VideoId::new("dQw4w9WgXcQ"),
            codes
                .iter()
                .map(|code| TranscriptTrack {
                    language_code: code.to_string(),
                    language_name: code.to_string(),
                    is_generated: false,
                    source: format!("https://captions.test/{code}"),
                })
                .collect(),
        )
    }

    #[test]
    fn preferred_language_wins() {
        let tracks = list(&["en", "pl"]);
        let selection = select_track(&tracks, "pl").unwrap();
        assert_eq!(selection.track.language_code, "pl");
        assert_eq!(selection.tier, FallbackTier::Preferred);
    }

    #[test]
    fn falls_back_to_english() {
        let tracks = list(&["de", "en"]);
        let selection = select_track(&tracks, "pl").unwrap();
        assert_eq!(selection.track.language_code, "en");
        assert_eq!(selection.tier, FallbackTier::English);
    }

    #[test]
    fn falls_back_to_first_listed_track() {
        let tracks = list(&["de", "fr"]);
        let selection = select_track(&tracks, "pl").unwrap();
        assert_eq!(selection.track.language_code, "de");
        assert_eq!(selection.tier, FallbackTier::FirstAvailable);

        let selection = select_track(&tracks, "en").unwrap();
        assert_eq!(selection.tier, FallbackTier::FirstAvailable);
    }

    #[test]
    fn empty_track_list_is_not_found() {
        let tracks = list(&[]);
        assert_eq!(
            select_track(&tracks, "pl").unwrap_err(),
            DomainError::transcript_not_found("dQw4w9WgXcQ")
        );
    }
}
