//! Pre-flight checks before paid operations.
//!
//! Validates that the API credential is available before starting
//! operations that would otherwise fail midway through.

use crate::error::{Result, TubeqaError};
use crate::openai::resolve_api_key;

/// Requirements for different operations.
#[derive(Debug, Clone, Copy)]
pub enum Operation {
    /// Asking questions needs the OpenAI credential.
    Ask,
    /// Fetching or chunking a transcript needs no credential.
    Fetch,
}

/// Run pre-flight checks for the given operation.
///
/// `explicit_key` is the config-supplied credential, which overrides the
/// environment default.
pub fn check(operation: Operation, explicit_key: Option<&str>) -> Result<()> {
    match operation {
        Operation::Ask => check_api_key(explicit_key),
        Operation::Fetch => Ok(()),
    }
}

/// Check that an OpenAI API key is configured.
fn check_api_key(explicit_key: Option<&str>) -> Result<()> {
    match resolve_api_key(explicit_key) {
        Some(_) => Ok(()),
        None => Err(TubeqaError::Config(
            "No OpenAI API key found. Set it with: export OPENAI_API_KEY='sk-...' \
             or add api_key to the [openai] section of the config file."
                .to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_has_no_requirements() {
        assert!(check(Operation::Fetch, None).is_ok());
    }

    #[test]
    fn test_explicit_key_satisfies_ask() {
        assert!(check(Operation::Ask, Some("sk-test")).is_ok());
    }
}
