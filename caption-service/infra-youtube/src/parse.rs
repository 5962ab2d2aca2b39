use caption_domain::{DomainError, TrackList, TranscriptSegment, TranscriptTrack, VideoId};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use serde_json::Value;

use crate::SERVICE;

/// Turns an innertube `player` response into the list of caption tracks.
///
/// A playable video without a captions section yields an empty list.
pub fn parse_player_response(video_id: &VideoId, data: &Value) -> Result<TrackList, DomainError> {
    assert_playable(video_id, data)?;

    let tracks: Vec<TranscriptTrack> = data
        .pointer("/captions/playerCaptionsTracklistRenderer/captionTracks")
        .and_then(Value::as_array)
        .map(|tracks| tracks.iter().filter_map(parse_caption_track).collect())
        .unwrap_or_default();

    Ok(TrackList::new(video_id.clone(), tracks))
}

fn parse_caption_track(caption: &Value) -> Option<TranscriptTrack> {
    let language_code = caption.get("languageCode")?.as_str()?.to_string();
    let source = caption.get("baseUrl")?.as_str()?.replace("&fmt=srv3", "");
    let language_name = caption
        .pointer("/name/runs/0/text")
        .or_else(|| caption.pointer("/name/simpleText"))
        .and_then(Value::as_str)
        .unwrap_or(&language_code)
        .to_string();
    let is_generated = caption.get("kind").and_then(Value::as_str) == Some("asr");

    Some(TranscriptTrack {
        language_code,
        language_name,
        is_generated,
        source,
    })
}

fn assert_playable(video_id: &VideoId, data: &Value) -> Result<(), DomainError> {
    let Some(playability) = data.get("playabilityStatus") else {
        return Ok(());
    };
    let status = playability
        .get("status")
        .and_then(Value::as_str)
        .unwrap_or("OK");
    let reason = playability
        .get("reason")
        .and_then(Value::as_str)
        .unwrap_or("");

    match status {
        "OK" => Ok(()),
        "ERROR" => Err(DomainError::video_unavailable(video_id.as_str())),
        "LOGIN_REQUIRED" if reason.contains("not a bot") => Err(
            DomainError::external_service_error(SERVICE, "request blocked by bot detection"),
        ),
        "LOGIN_REQUIRED" if reason.contains("inappropriate") => Err(
            DomainError::external_service_error(SERVICE, "video is age restricted"),
        ),
        _ => Err(DomainError::external_service_error(
            SERVICE,
            &format!("video is unplayable ({status}): {reason}"),
        )),
    }
}

/// Parses a timed-text XML document into caption segments. Elements with
/// no text are dropped.
pub fn parse_timed_text(xml: &str) -> Result<Vec<TranscriptSegment>, DomainError> {
    let mut reader = Reader::from_str(xml);
    let mut segments = Vec::new();
    let mut pending: Option<(f64, f64, String)> = None;

    loop {
        match reader.read_event().map_err(malformed)? {
            Event::Start(e) if e.name().as_ref() == b"text" => {
                let (start, duration) = timing(&e)?;
                pending = Some((start, duration, String::new()));
            }
            Event::Text(t) => {
                if let Some((_, _, raw)) = pending.as_mut() {
                    raw.push_str(&t.unescape().map_err(malformed)?);
                }
            }
            Event::CData(c) => {
                if let Some((_, _, raw)) = pending.as_mut() {
                    raw.push_str(&String::from_utf8_lossy(&c));
                }
            }
            Event::End(e) if e.name().as_ref() == b"text" => {
                if let Some((start, duration, raw)) = pending.take() {
                    if raw.is_empty() {
                        continue;
                    }
                    segments.push(TranscriptSegment {
                        text: strip_markup(&raw),
                        start,
                        duration,
                    });
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(segments)
}

fn timing(element: &BytesStart<'_>) -> Result<(f64, f64), DomainError> {
    let mut start = 0.0;
    let mut duration = 0.0;
    for attribute in element.attributes() {
        let attribute = attribute.map_err(malformed)?;
        let slot = match attribute.key.as_ref() {
            b"start" => &mut start,
            b"dur" => &mut duration,
            _ => continue,
        };
        let value = attribute.unescape_value().map_err(malformed)?;
        *slot = value.trim().parse::<f64>().map_err(|err| {
            malformed(format!(
                "bad {} value {value:?}: {err}",
                String::from_utf8_lossy(attribute.key.as_ref())
            ))
        })?;
    }
    Ok((start, duration))
}

/// Caption text is HTML escaped inside the XML, so once unescaped it is parsed
/// again as a fragment and only its character data is kept. Fragments that
/// are not well formed are returned unchanged.
fn strip_markup(fragment: &str) -> String {
    let mut reader = Reader::from_str(fragment);
    let mut text = String::new();
    loop {
        match reader.read_event() {
            Ok(Event::Text(t)) => match t.unescape() {
                Ok(unescaped) => text.push_str(&unescaped),
                Err(_) => text.push_str(&String::from_utf8_lossy(&t)),
            },
            Ok(Event::CData(c)) => text.push_str(&String::from_utf8_lossy(&c)),
            Ok(Event::Eof) => return text,
            Ok(_) => {}
            Err(_) => return fragment.to_string(),
        }
    }
}

fn malformed(err: impl std::fmt::Display) -> DomainError {
    DomainError::external_service_error(SERVICE, &format!("malformed timed text: {err}"))
}
