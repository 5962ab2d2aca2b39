//! YouTube-backed [`TranscriptProviderPort`].
//!
//! Track discovery goes through the watch page (for the innertube API key)
//! and the innertube `player` endpoint; segments come from the timed-text
//! URL attached to each caption track.

mod parse;

use std::sync::LazyLock;
use std::time::Duration;

use async_trait::async_trait;
use caption_domain::{
    DomainError, TrackList, TranscriptProviderPort, TranscriptSegment, TranscriptTrack, VideoId,
};
use regex::Regex;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT_LANGUAGE};
use reqwest::{Client, Response, StatusCode, Url};
use serde_json::{json, Value};

pub use parse::{parse_player_response, parse_timed_text};

const SERVICE: &str = "youtube";
const INNERTUBE_CLIENT_NAME: &str = "ANDROID";
const INNERTUBE_CLIENT_VERSION: &str = "20.10.38";

static INNERTUBE_API_KEY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#""INNERTUBE_API_KEY":\s*"([a-zA-Z0-9_-]+)""#).expect("valid api key pattern")
});

#[derive(Debug, Clone)]
pub struct YouTubeAdapterConfig {
    pub base_url: String,
    pub accept_language: String,
    pub request_timeout: Option<Duration>,
}

impl Default for YouTubeAdapterConfig {
    fn default() -> Self {
        Self {
            base_url: "https://www.youtube.com".to_string(),
            accept_language: "en-US".to_string(),
            request_timeout: None,
        }
    }
}

pub struct YouTubeTranscriptAdapter {
    client: Client,
    base_url: String,
}

impl YouTubeTranscriptAdapter {
    pub fn new(config: YouTubeAdapterConfig) -> Result<Self, DomainError> {
        let mut headers = HeaderMap::new();
        let accept_language = HeaderValue::from_str(&config.accept_language).map_err(|err| {
            DomainError::internal_error(&format!("invalid accept-language header: {err}"))
        })?;
        headers.insert(ACCEPT_LANGUAGE, accept_language);

        let mut builder = Client::builder().default_headers(headers);
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(|err| {
            DomainError::internal_error(&format!("failed to build http client: {err}"))
        })?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    async fn fetch_watch_page(&self, video_id: &VideoId) -> Result<String, DomainError> {
        let url = Url::parse_with_params(
            &format!("{}/watch", self.base_url),
            &[("v", video_id.as_str())],
        )
        .map_err(|err| DomainError::internal_error(&format!("invalid watch url: {err}")))?;

        let response = self.client.get(url).send().await.map_err(request_error)?;
        let response = check_status(response)?;
        response.text().await.map_err(request_error)
    }

    async fn fetch_player_response(
        &self,
        video_id: &VideoId,
        api_key: &str,
    ) -> Result<Value, DomainError> {
        let url = format!("{}/youtubei/v1/player?key={api_key}", self.base_url);
        let body = json!({
            "context": {
                "client": {
                    "clientName": INNERTUBE_CLIENT_NAME,
                    "clientVersion": INNERTUBE_CLIENT_VERSION,
                }
            },
            "videoId": video_id.as_str(),
        });

        let response = self
            .client
            .post(url)
            .json(&body)
            .send()
            .await
            .map_err(request_error)?;
        let response = check_status(response)?;
        response.json::<Value>().await.map_err(|err| {
            DomainError::external_service_error(
                SERVICE,
                &format!("unparsable player response: {err}"),
            )
        })
    }
}

#[async_trait]
impl TranscriptProviderPort for YouTubeTranscriptAdapter {
    async fn list_tracks(&self, video_id: &VideoId) -> Result<TrackList, DomainError> {
        let html = self.fetch_watch_page(video_id).await?;
        let api_key = extract_api_key(&html)?;
        let player = self.fetch_player_response(video_id, &api_key).await?;
        let tracks = parse_player_response(video_id, &player)?;

        tracing::debug!(
            video_id = %video_id,
            track_count = tracks.tracks.len(),
            "listed youtube caption tracks"
        );

        Ok(tracks)
    }

    async fn fetch_segments(
        &self,
        track: &TranscriptTrack,
    ) -> Result<Vec<TranscriptSegment>, DomainError> {
        if track.source.contains("&exp=xpe") {
            return Err(DomainError::external_service_error(
                SERVICE,
                "caption track requires a proof-of-origin token",
            ));
        }

        let response = self
            .client
            .get(track.source.as_str())
            .send()
            .await
            .map_err(request_error)?;
        let response = check_status(response)?;
        let body = response.text().await.map_err(request_error)?;
        let segments = parse_timed_text(&body)?;

        tracing::debug!(
            language = %track.language_code,
            segment_count = segments.len(),
            "fetched youtube timed text"
        );

        Ok(segments)
    }
}

fn extract_api_key(html: &str) -> Result<String, DomainError> {
    if html.contains("class=\"g-recaptcha\"") {
        return Err(DomainError::external_service_error(
            SERVICE,
            "request blocked by a captcha challenge",
        ));
    }

    INNERTUBE_API_KEY
        .captures(html)
        .and_then(|captures| captures.get(1))
        .map(|key| key.as_str().to_string())
        .ok_or_else(|| {
            DomainError::external_service_error(SERVICE, "innertube api key not found on watch page")
        })
}

fn check_status(response: Response) -> Result<Response, DomainError> {
    let status = response.status();
    if status == StatusCode::TOO_MANY_REQUESTS {
        return Err(DomainError::external_service_error(
            SERVICE,
            "too many requests, the client IP is being rate limited",
        ));
    }
    if !status.is_success() {
        return Err(DomainError::external_service_error(
            SERVICE,
            &format!("unexpected HTTP status {status}"),
        ));
    }
    Ok(response)
}

fn request_error(err: reqwest::Error) -> DomainError {
    if err.is_timeout() {
        return DomainError::external_service_error(SERVICE, "request timed out");
    }
    DomainError::external_service_error(SERVICE, &err.to_string())
}
