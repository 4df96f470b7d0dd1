//! Transcript fetching for tubeqa.
//!
//! Validates video URLs before any network call, delegates the actual fetch
//! to a pluggable backend, and caches transcripts per video for the process
//! lifetime.

mod youtube;

pub use youtube::YoutubeTranscriptSource;

use crate::error::{Result, TubeqaError};
use async_trait::async_trait;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, OnceLock, RwLock};

/// A fetched transcript: raw text plus its source. Immutable once fetched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transcript {
    /// Canonical 11-character video id.
    pub video_id: String,
    /// Canonical watch URL for the video.
    pub source_url: String,
    /// Plain transcript text.
    pub text: String,
}

impl Transcript {
    /// Number of characters in the transcript text.
    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }
}

/// Trait for transcript backends.
///
/// Receives an already-validated video id; URL validation happens in
/// [`TranscriptFetcher`] before the backend is ever called.
#[async_trait]
pub trait TranscriptSource: Send + Sync {
    /// Fetch the plain transcript text for a video.
    async fn fetch_text(&self, video_id: &str) -> Result<String>;
}

/// Extract the video id from a YouTube watch URL.
///
/// Accepts `youtube.com/watch?v=<11-char-id>` with optional scheme and
/// optional `www.`/`m.` subdomain, and the `youtu.be/<id>` short form.
pub fn parse_video_id(input: &str) -> Option<String> {
    static WATCH_URL: OnceLock<Regex> = OnceLock::new();
    let re = WATCH_URL.get_or_init(|| {
        Regex::new(
            r"(?x)
            ^
            (?:https?://)?
            (?:
                (?:www\.|m\.)?youtube\.com/watch\?v=([A-Za-z0-9_-]{11})
                |
                youtu\.be/([A-Za-z0-9_-]{11})
            )
            (?:[&?\#].*)?
            $
        ",
        )
        .expect("Invalid regex")
    });

    let caps = re.captures(input.trim())?;
    caps.get(1)
        .or_else(|| caps.get(2))
        .map(|m| m.as_str().to_string())
}

/// Fetches transcripts with URL validation and a process-lifetime cache.
///
/// The cache key is the canonical video id, so the same video reached
/// through different URL spellings hits the cache.
pub struct TranscriptFetcher {
    source: Arc<dyn TranscriptSource>,
    cache: RwLock<HashMap<String, Arc<Transcript>>>,
}

impl TranscriptFetcher {
    /// Create a fetcher over the given backend.
    pub fn new(source: Arc<dyn TranscriptSource>) -> Self {
        Self {
            source,
            cache: RwLock::new(HashMap::new()),
        }
    }

    /// Fetch the transcript for a video URL.
    ///
    /// Fails with `InvalidUrl` before any network call when the URL does
    /// not match an accepted pattern, and with `Fetch` when the transcript
    /// is unavailable. Failures are never retried here.
    pub async fn fetch(&self, url: &str) -> Result<Arc<Transcript>> {
        let video_id = parse_video_id(url).ok_or_else(|| {
            TubeqaError::InvalidUrl(format!("not a recognized YouTube watch URL: {}", url))
        })?;

        if let Some(hit) = self.cache.read().unwrap().get(&video_id) {
            return Ok(hit.clone());
        }

        let text = self.source.fetch_text(&video_id).await?;
        let transcript = Arc::new(Transcript {
            source_url: format!("https://www.youtube.com/watch?v={}", video_id),
            video_id: video_id.clone(),
            text,
        });

        self.cache
            .write()
            .unwrap()
            .insert(video_id, transcript.clone());
        Ok(transcript)
    }
}
