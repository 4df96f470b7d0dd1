//! YouTube transcript backend.
//!
//! Fetches the watch page, locates the caption track list embedded in the
//! player response, downloads the timedtext track, and strips it down to
//! plain text.

use super::TranscriptSource;
use crate::error::{Result, TubeqaError};
use async_trait::async_trait;
use regex::Regex;
use serde::Deserialize;
use std::sync::OnceLock;
use std::time::Duration;
use tracing::{debug, instrument};

const CAPTION_TRACKS_KEY: &str = r#""captionTracks":"#;

/// Transcript backend that scrapes YouTube caption tracks over HTTP.
pub struct YoutubeTranscriptSource {
    http: reqwest::Client,
    language: Option<String>,
}

impl YoutubeTranscriptSource {
    /// Create a backend with the given request timeout and preferred
    /// caption language (None picks the first manual track).
    pub fn new(timeout: Duration, language: Option<String>) -> Self {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self { http, language }
    }

    async fn get_text(&self, url: &str, what: &str) -> Result<String> {
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| TubeqaError::Fetch(format!("{} request failed: {}", what, e)))?
            .error_for_status()
            .map_err(|e| TubeqaError::Fetch(format!("{} request failed: {}", what, e)))?;

        response
            .text()
            .await
            .map_err(|e| TubeqaError::Fetch(format!("{} body read failed: {}", what, e)))
    }
}

#[async_trait]
impl TranscriptSource for YoutubeTranscriptSource {
    #[instrument(skip(self))]
    async fn fetch_text(&self, video_id: &str) -> Result<String> {
        let watch_url = format!("https://www.youtube.com/watch?v={}", video_id);
        let page = self.get_text(&watch_url, "watch page").await?;

        let tracks = extract_caption_tracks(&page)?;
        debug!("Found {} caption tracks", tracks.len());

        let track = pick_track(&tracks, self.language.as_deref()).ok_or_else(|| {
            TubeqaError::Fetch(format!("video {} has no caption tracks", video_id))
        })?;

        let timedtext = self.get_text(&track.base_url, "caption track").await?;
        let text = parse_timedtext(&timedtext);
        if text.is_empty() {
            return Err(TubeqaError::Fetch(format!(
                "caption track for {} was empty",
                video_id
            )));
        }

        Ok(text)
    }
}

/// One caption track from the player response.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CaptionTrack {
    base_url: String,
    #[serde(default)]
    language_code: Option<String>,
    /// "asr" for auto-generated tracks; absent for manual captions.
    #[serde(default)]
    kind: Option<String>,
}

/// Locate and parse the caption track list inside the watch page HTML.
fn extract_caption_tracks(page: &str) -> Result<Vec<CaptionTrack>> {
    let key_pos = page.find(CAPTION_TRACKS_KEY).ok_or_else(|| {
        TubeqaError::Fetch(
            "no caption data in watch page (video may be private or have no captions)"
                .to_string(),
        )
    })?;

    let array_start = key_pos + CAPTION_TRACKS_KEY.len();
    let array = json_array_slice(&page[array_start..])
        .ok_or_else(|| TubeqaError::Fetch("malformed caption track list".to_string()))?;

    serde_json::from_str(array)
        .map_err(|e| TubeqaError::Fetch(format!("failed to parse caption track list: {}", e)))
}

/// Slice a balanced JSON array off the front of `s`, respecting strings.
fn json_array_slice(s: &str) -> Option<&str> {
    let bytes = s.as_bytes();
    if bytes.first() != Some(&b'[') {
        return None;
    }

    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (i, &b) in bytes.iter().enumerate() {
        if in_string {
            if escaped {
                escaped = false;
            } else if b == b'\\' {
                escaped = true;
            } else if b == b'"' {
                in_string = false;
            }
            continue;
        }
        match b {
            b'"' => in_string = true,
            b'[' => depth += 1,
            b']' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&s[..=i]);
                }
            }
            _ => {}
        }
    }

    None
}

/// Pick the best caption track: requested language first (manual over
/// auto-generated), then any manual track, then whatever is left.
fn pick_track<'a>(tracks: &'a [CaptionTrack], language: Option<&str>) -> Option<&'a CaptionTrack> {
    if let Some(lang) = language {
        if let Some(track) = tracks
            .iter()
            .find(|t| t.language_code.as_deref() == Some(lang) && t.kind.is_none())
        {
            return Some(track);
        }
        if let Some(track) = tracks
            .iter()
            .find(|t| t.language_code.as_deref() == Some(lang))
        {
            return Some(track);
        }
    }

    tracks
        .iter()
        .find(|t| t.kind.is_none())
        .or_else(|| tracks.first())
}

/// Strip a timedtext XML document down to plain caption text.
fn parse_timedtext(xml: &str) -> String {
    static TEXT_TAG: OnceLock<Regex> = OnceLock::new();
    let re = TEXT_TAG
        .get_or_init(|| Regex::new(r"(?s)<text[^>]*>(.*?)</text>").expect("Invalid regex"));

    let mut lines = Vec::new();
    for caps in re.captures_iter(xml) {
        let line = decode_entities(&caps[1]);
        let line = line.trim();
        if !line.is_empty() {
            lines.push(line.to_string());
        }
    }

    lines.join(" ")
}

/// Decode the XML entities YouTube emits in caption text.
fn decode_entities(s: &str) -> String {
    s.replace("&#39;", "'")
        .replace("&quot;", "\"")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&nbsp;", " ")
        // Last, so "&amp;#39;" and friends don't get decoded twice.
        .replace("&amp;", "&")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_array_slice() {
        assert_eq!(json_array_slice(r#"[1,2,3]trailer"#), Some("[1,2,3]"));
        assert_eq!(
            json_array_slice(r#"[{"a":"][cursed]"}],"next":1"#),
            Some(r#"[{"a":"][cursed]"}]"#)
        );
        assert_eq!(json_array_slice("not an array"), None);
        assert_eq!(json_array_slice("[unterminated"), None);
    }

    #[test]
    fn test_extract_caption_tracks() {
        let page = r#"<html>..."captions":{"playerCaptionsTracklistRenderer":{"captionTracks":[{"baseUrl":"https://www.youtube.com/api/timedtext?v=abc&lang=en","languageCode":"en"},{"baseUrl":"https://www.youtube.com/api/timedtext?v=abc&lang=en&kind=asr","languageCode":"en","kind":"asr"}]}}...</html>"#;

        let tracks = extract_caption_tracks(page).unwrap();
        assert_eq!(tracks.len(), 2);
        assert_eq!(tracks[0].language_code.as_deref(), Some("en"));
        // serde resolves the & escape.
        assert!(tracks[0].base_url.contains("?v=abc&lang=en"));
        assert_eq!(tracks[1].kind.as_deref(), Some("asr"));
    }

    #[test]
    fn test_extract_caption_tracks_missing() {
        let err = extract_caption_tracks("<html>no captions here</html>").unwrap_err();
        assert!(matches!(err, TubeqaError::Fetch(_)));
    }

    #[test]
    fn test_pick_track_prefers_manual_in_language() {
        let tracks = vec![
            CaptionTrack {
                base_url: "de-asr".to_string(),
                language_code: Some("de".to_string()),
                kind: Some("asr".to_string()),
            },
            CaptionTrack {
                base_url: "en-asr".to_string(),
                language_code: Some("en".to_string()),
                kind: Some("asr".to_string()),
            },
            CaptionTrack {
                base_url: "en-manual".to_string(),
                language_code: Some("en".to_string()),
                kind: None,
            },
        ];

        assert_eq!(pick_track(&tracks, Some("en")).unwrap().base_url, "en-manual");
        assert_eq!(pick_track(&tracks, Some("de")).unwrap().base_url, "de-asr");
        // Unknown language falls back to any manual track.
        assert_eq!(pick_track(&tracks, Some("fr")).unwrap().base_url, "en-manual");
        assert!(pick_track(&[], Some("en")).is_none());
    }

    #[test]
    fn test_parse_timedtext() {
        let xml = r#"<?xml version="1.0"?><transcript><text start="0.0" dur="2.5">Hello &amp; welcome</text><text start="2.5" dur="3.1">to the
show &#39;today&#39;</text><text start="5.6" dur="1.0">   </text></transcript>"#;

        assert_eq!(
            parse_timedtext(xml),
            "Hello & welcome to the\nshow 'today'"
        );
    }

    #[test]
    fn test_decode_entities_no_double_decode() {
        assert_eq!(decode_entities("a &amp;#39; b"), "a &#39; b");
    }
}
