//! Configuration for tubeqa.

mod prompts;
mod settings;

pub use prompts::{PromptTemplate, CONTEXT_VAR, DEFAULT_TEMPLATE, QUESTION_VAR};
pub use settings::{
    ChunkSize, ChunkingSettings, EmbeddingSettings, FetchSettings, GeneralSettings,
    OpenAISettings, RagSettings, Settings,
};
