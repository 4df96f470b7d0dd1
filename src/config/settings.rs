//! Configuration settings for tubeqa.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Settings {
    pub general: GeneralSettings,
    pub fetch: FetchSettings,
    pub chunking: ChunkingSettings,
    pub embedding: EmbeddingSettings,
    pub rag: RagSettings,
    pub openai: OpenAISettings,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralSettings {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// Transcript fetch settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchSettings {
    /// HTTP request timeout in seconds.
    pub timeout_seconds: u64,
    /// Preferred caption language (ISO 639-1 code). None picks the first
    /// manually authored track.
    pub language: Option<String>,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            timeout_seconds: 30,
            language: Some("en".to_string()),
        }
    }
}

/// Allowed chunk sizes, in characters.
///
/// Larger chunks can produce better answers but eat more of the completion
/// model's context window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ChunkSize {
    /// 2000 characters.
    Small,
    /// 3000 characters.
    #[default]
    Medium,
    /// 4000 characters.
    Large,
}

impl ChunkSize {
    /// Window size in characters.
    pub fn chars(self) -> usize {
        match self {
            ChunkSize::Small => 2000,
            ChunkSize::Medium => 3000,
            ChunkSize::Large => 4000,
        }
    }

    /// Map a character count onto an allowed chunk size.
    pub fn from_chars(chars: usize) -> Option<Self> {
        match chars {
            2000 => Some(ChunkSize::Small),
            3000 => Some(ChunkSize::Medium),
            4000 => Some(ChunkSize::Large),
            _ => None,
        }
    }
}

impl std::fmt::Display for ChunkSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.chars())
    }
}

/// Transcript chunking settings.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ChunkingSettings {
    /// Chunk window size.
    pub chunk_size: ChunkSize,
    /// Overlap between adjacent chunks in characters. None derives
    /// chunk_size / 10.
    pub overlap: Option<usize>,
}

impl ChunkingSettings {
    /// Effective overlap in characters.
    pub fn overlap_chars(&self) -> usize {
        self.overlap.unwrap_or(self.chunk_size.chars() / 10)
    }
}

/// Embedding generation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddingSettings {
    /// Embedding model to use.
    pub model: String,
    /// Embedding dimensions.
    pub dimensions: u32,
}

impl Default for EmbeddingSettings {
    fn default() -> Self {
        Self {
            model: "text-embedding-3-small".to_string(),
            dimensions: 1536,
        }
    }
}

/// Question-answering settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RagSettings {
    /// Completion model for answer generation.
    pub model: String,
    /// Sampling temperature.
    pub temperature: f32,
    /// Number of chunks retrieved per question.
    pub top_k: usize,
    /// Character budget for the assembled context.
    pub max_context_chars: usize,
    /// Custom prompt template; must contain {{context}} and {{question}}
    /// exactly once each. None uses the built-in default.
    pub prompt_template: Option<String>,
}

impl Default for RagSettings {
    fn default() -> Self {
        Self {
            model: "gpt-4o-mini".to_string(),
            temperature: 0.7,
            top_k: 4,
            max_context_chars: 12_000,
            prompt_template: None,
        }
    }
}

/// OpenAI credential settings.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct OpenAISettings {
    /// Explicit API key; overrides the OPENAI_API_KEY environment default.
    pub api_key: Option<String>,
}

impl Settings {
    /// Load settings from the default configuration file.
    pub fn load() -> crate::error::Result<Self> {
        Self::load_from(None)
    }

    /// Load settings from a specific path, or the default location if None.
    pub fn load_from(path: Option<&PathBuf>) -> crate::error::Result<Self> {
        let config_path = match path {
            Some(p) => p.clone(),
            None => Self::default_config_path(),
        };

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let settings: Settings = toml::from_str(&content)?;
            Ok(settings)
        } else {
            Ok(Settings::default())
        }
    }

    /// Save settings to the default configuration file.
    pub fn save(&self) -> crate::error::Result<()> {
        self.save_to(&Self::default_config_path())
    }

    /// Save settings to a specific path.
    pub fn save_to(&self, path: &PathBuf) -> crate::error::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| crate::error::TubeqaError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get the default configuration file path.
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("tubeqa")
            .join("config.toml")
    }

    /// Expand shell variables in paths (e.g., ~).
    pub fn expand_path(path: &str) -> PathBuf {
        PathBuf::from(shellexpand::tilde(path).to_string())
    }
}
