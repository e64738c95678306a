use recap_core::{RecapError, TokenCounter};
use serde::Serialize;

use crate::prompt::summarization_prompt;

/// Token quantities governing one summarization configuration.
///
/// The serialized form is the canonical representation used inside
/// cache keys, so field order and names are part of the cache contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct SummarizationParameters {
    /// Desired upper bound on a produced summary, in tokens.
    pub target_summary_size: usize,
    /// Maximum input admissible for one direct summarization call.
    pub summary_input_size: usize,
}

/// Compute the per-call input budget for a target summary size within a
/// model context window.
///
/// The prompt is rendered with an empty body and counted; whatever the
/// context window has left after the prompt scaffolding and the target
/// output is the input budget.
pub fn compute_budget(
    target_summary_size: usize,
    model_context_size: usize,
    counter: &dyn TokenCounter,
) -> Result<SummarizationParameters, RecapError> {
    let base_prompt_size = counter.count_messages(&summarization_prompt("", target_summary_size));
    let reserved = base_prompt_size + target_summary_size;
    if reserved >= model_context_size {
        return Err(RecapError::InvalidBudget(format!(
            "prompt overhead {base_prompt_size} plus target size {target_summary_size} \
             leaves no room in a {model_context_size}-token context window"
        )));
    }
    Ok(SummarizationParameters {
        target_summary_size,
        summary_input_size: model_context_size - reserved,
    })
}
