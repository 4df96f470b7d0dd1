//! Command implementations for the tubeqa CLI.

mod ask;
mod chunks;
mod config;
mod fetch;

pub use ask::{run_ask, AskOptions};
pub use chunks::run_chunks;
pub use config::run_config;
pub use fetch::run_fetch;

use crate::config::{ChunkSize, Settings};
use crate::error::{Result, TubeqaError};

/// Apply a --chunk-size override, rejecting values outside the allowed set.
pub(crate) fn apply_chunk_size(settings: &mut Settings, chunk_size: Option<usize>) -> Result<()> {
    if let Some(chars) = chunk_size {
        settings.chunking.chunk_size = ChunkSize::from_chars(chars).ok_or_else(|| {
            TubeqaError::InvalidParameters(format!(
                "chunk size must be 2000, 3000 or 4000 characters, got {}",
                chars
            ))
        })?;
        // Derived overlap should track the new size.
        settings.chunking.overlap = None;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_chunk_size() {
        let mut settings = Settings::default();
        apply_chunk_size(&mut settings, Some(4000)).unwrap();
        assert_eq!(settings.chunking.chunk_size.chars(), 4000);
        assert_eq!(settings.chunking.overlap_chars(), 400);

        let err = apply_chunk_size(&mut settings, Some(1234)).unwrap_err();
        assert!(matches!(err, TubeqaError::InvalidParameters(_)));
    }
}
