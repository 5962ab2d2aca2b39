use std::sync::LazyLock;

use regex::Regex;

use crate::{DomainError, VideoId};

pub const INVALID_URL_MESSAGE: &str = "invalid YouTube video URL";

// Order matters: the first rule already covers almost everything the other
// two accept. Rules two and three only fire for tokens that are not exactly
// 11 characters long (e.g. `youtu.be/short`), and those ids are passed on
// to the provider unchanged.
static VIDEO_ID_RULES: LazyLock<[Regex; 3]> = LazyLock::new(|| {
    [
        Regex::new(r"(?:v=|/)([0-9A-Za-z_-]{11}).*").expect("valid video id rule"),
        Regex::new(r"(?:embed/|v/|youtu.be/|/v/|/e/|watch\?v=|&v=)([^#&?]*).*")
            .expect("valid video id rule"),
        Regex::new(r"(?:watch\?v=|&v=)([^#&?]*).?").expect("valid video id rule"),
    ]
});

/// Pulls the video identifier out of a YouTube watch, short, embed or
/// path-style URL.
pub fn extract_video_id(url: &str) -> Result<VideoId, DomainError> {
    VIDEO_ID_RULES
        .iter()
        .find_map(|rule| {
            rule.captures_iter(url)
                .filter_map(|captures| captures.get(1))
                .map(|group| group.as_str())
                .find(|id| !id.is_empty())
        })
        .map(VideoId::new)
        .ok_or_else(|| DomainError::invalid_url(INVALID_URL_MESSAGE))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(url: &str) -> String {
        extract_video_id(url).expect("video id").into_inner()
    }

    #[test]
    fn canonical_watch_url() {
        assert_eq!(id("https://www.youtube.com/watch?v=dQw4w9WgXcQ"), "dQw4w9WgXcQ");
        assert_eq!(
            id("https://www.youtube.com/watch?v=dQw4w9WgXcQ&t=42s"),
            "dQw4w9WgXcQ"
        );
        assert_eq!(
            id("https://www.youtube.com/watch?feature=share&v=_NuH3D4SN-c"),
            "_NuH3D4SN-c"
        );
    }

    #[test]
    fn short_embed_and_path_urls() {
        assert_eq!(id("https://youtu.be/dQw4w9WgXcQ"), "dQw4w9WgXcQ");
        assert_eq!(
            id("https://youtu.be/_NuH3D4SN-c?si=VSFea_rMwtaiR8Q7"),
            "_NuH3D4SN-c"
        );
        assert_eq!(id("https://www.youtube.com/embed/dQw4w9WgXcQ"), "dQw4w9WgXcQ");
        assert_eq!(id("https://www.youtube.com/v/dQw4w9WgXcQ"), "dQw4w9WgXcQ");
        assert_eq!(id("https://www.youtube.com/e/dQw4w9WgXcQ"), "dQw4w9WgXcQ");
        assert_eq!(id("https://www.youtube.com/shorts/dQw4w9WgXcQ"), "dQw4w9WgXcQ");
    }

    #[test]
    fn any_slash_followed_by_eleven_chars_matches() {
        assert_eq!(id("https://example.com/abcdefghijklmnop"), "abcdefghijk");
    }

    #[test]
    fn later_rules_accept_tokens_of_other_lengths() {
        assert_eq!(id("https://youtu.be/short"), "short");
        assert_eq!(id("https://www.youtube.com/watch?v=abc&t=1"), "abc");
    }

    #[test]
    fn unrecognised_input_is_invalid_url() {
        for input in ["not a url", "", "https://example.com", "youtube.com/watch?v="] {
            let error = extract_video_id(input).expect_err(input);
            assert_eq!(error, DomainError::invalid_url(INVALID_URL_MESSAGE));
        }
    }
}
