use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use caption_application::{
    ApplicationError, FetchTranscriptCommand, FetchTranscriptCommandHandler,
    FetchTranscriptUseCase, FetchTranscriptUseCaseImpl, TranscriptRequest,
};
use caption_domain::{
    DomainError, TrackList, TranscriptProviderPort, TranscriptSegment, TranscriptTrack, VideoId,
};

enum Catalogue {
    Tracks(Vec<&'static str>),
    Unavailable,
}

struct StubProvider {
    catalogue: Catalogue,
    fetched: Mutex<Vec<String>>,
}

impl StubProvider {
    fn with_tracks(codes: Vec<&'static str>) -> Arc<Self> {
        Arc::new(Self {
            catalogue: Catalogue::Tracks(codes),
            fetched: Mutex::new(Vec::new()),
        })
    }

    fn unavailable() -> Arc<Self> {
        Arc::new(Self {
            catalogue: Catalogue::Unavailable,
            fetched: Mutex::new(Vec::new()),
        })
    }
}

#[async_trait]
impl TranscriptProviderPort for StubProvider {
    async fn list_tracks(&self, video_id: &VideoId) -> Result<TrackList, DomainError> {
        match &self.catalogue {
            Catalogue::Unavailable => Err(DomainError::video_unavailable(video_id.as_str())),
            Catalogue::Tracks(codes) => Ok(TrackList::new(
                video_id.clone(),
                codes
                    .iter()
                    .map(|code| TranscriptTrack {
                        language_code: code.to_string(),
                        language_name: format!("lang-{code}"),
                        is_generated: false,
                        source: format!("stub://{code}"),
                    })
                    .collect(),
            )),
        }
    }

    async fn fetch_segments(
        &self,
        track: &TranscriptTrack,
    ) -> Result<Vec<TranscriptSegment>, DomainError> {
        self.fetched
            .lock()
            .expect("lock")
            .push(track.source.clone());
        Ok(vec![TranscriptSegment {
            text: format!("hello from {}", track.language_code),
            start: 0.0,
            duration: 1.25,
        }])
    }
}

fn handler(provider: Arc<StubProvider>) -> FetchTranscriptCommandHandler {
    let usecase: Arc<dyn FetchTranscriptUseCase> =
        Arc::new(FetchTranscriptUseCaseImpl::new(provider, "pl".to_string()));
    FetchTranscriptCommandHandler::new(usecase)
}

fn request(url: &str, language: Option<&str>) -> FetchTranscriptCommand {
    FetchTranscriptCommand::new(TranscriptRequest {
        video_url: url.to_string(),
        language: language.map(str::to_string),
    })
}

#[tokio::test]
async fn english_only_video_falls_back_from_default_language() {
    let provider = StubProvider::with_tracks(vec!["en"]);
    let handler = handler(provider.clone());

    let response = handler
        .handle(request("https://www.youtube.com/watch?v=dQw4w9WgXcQ", None))
        .await
        .expect("command succeeds");

    assert!(response.success);
    assert_eq!(response.video_id, "dQw4w9WgXcQ");
    assert_eq!(response.language, "en");
    assert_eq!(response.language_name, "lang-en");
    assert_eq!(response.transcript.len(), 1);
    assert_eq!(response.transcript[0].text, "hello from en");
    assert_eq!(*provider.fetched.lock().unwrap(), vec!["stub://en".to_string()]);
}

#[tokio::test]
async fn requested_language_is_used_when_present() {
    let handler = handler(StubProvider::with_tracks(vec!["en", "de"]));

    let response = handler
        .handle(request("https://youtu.be/dQw4w9WgXcQ", Some("de")))
        .await
        .expect("command succeeds");

    assert_eq!(response.language, "de");
}

#[tokio::test]
async fn first_listed_track_is_last_resort() {
    let handler = handler(StubProvider::with_tracks(vec!["fr", "de"]));

    let response = handler
        .handle(request("https://youtu.be/dQw4w9WgXcQ", Some("pl")))
        .await
        .expect("command succeeds");

    assert_eq!(response.language, "fr");
}

#[tokio::test]
async fn no_tracks_is_transcript_not_found() {
    let handler = handler(StubProvider::with_tracks(vec![]));

    let error = handler
        .handle(request("https://youtu.be/dQw4w9WgXcQ", None))
        .await
        .expect_err("no tracks");

    assert!(matches!(
        error,
        ApplicationError::Domain(DomainError::TranscriptNotFound { .. })
    ));
}

#[tokio::test]
async fn unavailable_video_is_reported() {
    let handler = handler(StubProvider::unavailable());

    let error = handler
        .handle(request("https://youtu.be/dQw4w9WgXcQ", None))
        .await
        .expect_err("unavailable");

    assert!(matches!(
        error,
        ApplicationError::Domain(DomainError::VideoUnavailable { .. })
    ));
}

#[tokio::test]
async fn invalid_url_never_reaches_the_provider() {
    let provider = StubProvider::with_tracks(vec!["en"]);
    let handler = handler(provider.clone());

    let error = handler
        .handle(request("not a url", None))
        .await
        .expect_err("invalid url");

    assert!(matches!(
        error,
        ApplicationError::Domain(DomainError::InvalidUrl(_))
    ));
    assert!(provider.fetched.lock().unwrap().is_empty());
}

#[tokio::test]
async fn repeated_requests_select_the_same_track() {
    let handler = handler(StubProvider::with_tracks(vec!["de", "en"]));
    let mut seen = HashMap::new();

    for _ in 0..3 {
        let response = handler
            .handle(request("https://youtu.be/dQw4w9WgXcQ", Some("pl")))
            .await
            .expect("command succeeds");
        *seen
            .entry((response.video_id, response.language))
            .or_insert(0) += 1;
    }

    assert_eq!(seen.len(), 1);
    assert_eq!(
        seen.get(&("dQw4w9WgXcQ".to_string(), "en".to_string())),
        Some(&3)
    );
}
