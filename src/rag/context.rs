//! Context assembly with a character budget.

use crate::index::ScoredChunk;

/// Separator between chunks in the assembled context.
const CHUNK_SEPARATOR: &str = "\n\n";

/// Concatenate retrieved chunks (descending score order) into a context
/// string that never exceeds `max_context_chars`.
///
/// Whole chunks are dropped lowest-score-first when the budget runs out.
/// If even the best chunk is over budget, it is cut at a character boundary
/// so the highest-ranked evidence still survives.
///
/// Returns the context and the chunks that made it in.
pub fn assemble_context(
    hits: &[ScoredChunk],
    max_context_chars: usize,
) -> (String, Vec<ScoredChunk>) {
    let mut context = String::new();
    let mut used_chars = 0usize;
    let mut retained = Vec::new();

    for hit in hits {
        let chunk_chars = hit.chunk.text.chars().count();
        let sep_chars = if context.is_empty() {
            0
        } else {
            CHUNK_SEPARATOR.len()
        };

        if used_chars + sep_chars + chunk_chars > max_context_chars {
            if retained.is_empty() && max_context_chars > 0 {
                let head: String = hit.chunk.text.chars().take(max_context_chars).collect();
                context.push_str(&head);
                retained.push(hit.clone());
            }
            break;
        }

        if sep_chars > 0 {
            context.push_str(CHUNK_SEPARATOR);
        }
        context.push_str(&hit.chunk.text);
        used_chars += sep_chars + chunk_chars;
        retained.push(hit.clone());
    }

    (context, retained)
}
