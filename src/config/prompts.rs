//! Prompt template for answer synthesis.

use crate::error::{Result, TubeqaError};

/// Substitution point for the assembled context.
pub const CONTEXT_VAR: &str = "{{context}}";

/// Substitution point for the user's question.
pub const QUESTION_VAR: &str = "{{question}}";

/// Default answer-synthesis template.
pub const DEFAULT_TEMPLATE: &str = r#"Use the following transcript excerpts to answer the question. If the excerpts do not contain the answer, say you don't know rather than guessing.

Transcript excerpts:
{{context}}

Question: {{question}}

Answer:"#;

/// A validated prompt template.
///
/// Must contain exactly one `{{context}}` and exactly one `{{question}}`
/// substitution point; anything else fails with `InvalidParameters` at
/// construction time, before any network call.
#[derive(Debug, Clone)]
pub struct PromptTemplate {
    template: String,
}

impl PromptTemplate {
    /// Validate and wrap a template string.
    pub fn new(template: &str) -> Result<Self> {
        for var in [CONTEXT_VAR, QUESTION_VAR] {
            let count = template.matches(var).count();
            if count != 1 {
                return Err(TubeqaError::InvalidParameters(format!(
                    "prompt template must contain {} exactly once, found {}",
                    var, count
                )));
            }
        }

        Ok(Self {
            template: template.to_string(),
        })
    }

    /// Substitute context and question into the template.
    pub fn render(&self, context: &str, question: &str) -> String {
        self.template
            .replace(CONTEXT_VAR, context)
            .replace(QUESTION_VAR, question)
    }
}

impl Default for PromptTemplate {
    fn default() -> Self {
        Self::new(DEFAULT_TEMPLATE).expect("default template is valid")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_template_is_valid() {
        let template = PromptTemplate::default();
        let rendered = template.render("CTX", "Q?");
        assert!(rendered.contains("CTX"));
        assert!(rendered.contains("Q?"));
        assert!(!rendered.contains("{{"));
    }

    #[test]
    fn test_render_substitutes_both_points() {
        let template =
            PromptTemplate::new("Context: {{context}}\nQuestion: {{question}}").unwrap();
        assert_eq!(
            template.render("the facts", "why?"),
            "Context: the facts\nQuestion: why?"
        );
    }

    #[test]
    fn test_missing_substitution_point_rejected() {
        let err = PromptTemplate::new("Question: {{question}}").unwrap_err();
        assert!(matches!(err, TubeqaError::InvalidParameters(_)));

        let err = PromptTemplate::new("Context: {{context}}").unwrap_err();
        assert!(matches!(err, TubeqaError::InvalidParameters(_)));
    }

    #[test]
    fn test_duplicate_substitution_point_rejected() {
        let err =
            PromptTemplate::new("{{context}} {{context}} {{question}}").unwrap_err();
        assert!(matches!(err, TubeqaError::InvalidParameters(_)));
    }
}
