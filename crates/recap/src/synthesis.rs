use std::sync::Arc;

use recap_cache::SummaryCache;
use recap_core::{ChatModel, ChatRequest, RecapError, TokenCounter};
use serde::Serialize;
use tracing::info;

use crate::key::cache_key;
use crate::prompt::synthesis_prompt;
use crate::usage::UsageTracker;

/// Upper bound on the rendered synthesis prompt, in tokens.
pub const SYNTHESIS_PROMPT_BUDGET: usize = 8192;

#[derive(Serialize)]
struct SynthesizeKey<'a> {
    summaries: &'a [String],
    model: &'a str,
}

/// Merges independently produced summaries into one with a single call,
/// intended for a higher-capability model than the recursive passes.
///
/// The call is not retried; the result is persisted under its own cache
/// key like every other completed call.
pub struct Synthesizer {
    model: Arc<dyn ChatModel>,
    model_name: String,
    counter: Arc<dyn TokenCounter>,
    cache: Arc<dyn SummaryCache>,
    usage: UsageTracker,
}

impl Synthesizer {
    pub fn new(
        model: Arc<dyn ChatModel>,
        model_name: impl Into<String>,
        counter: Arc<dyn TokenCounter>,
        cache: Arc<dyn SummaryCache>,
    ) -> Self {
        Self {
            model,
            model_name: model_name.into(),
            counter,
            cache,
            usage: UsageTracker::new(),
        }
    }

    pub fn usage(&self) -> &UsageTracker {
        &self.usage
    }

    /// Merge `summaries` into a single best summary.
    ///
    /// Fails with a precondition violation if the rendered prompt does
    /// not fit the synthesis budget; the caller must reduce its input
    /// before calling again.
    pub async fn synthesize(&self, summaries: &[String]) -> Result<String, RecapError> {
        let key = cache_key(
            "synthesize",
            &SynthesizeKey {
                summaries,
                model: &self.model_name,
            },
        )?;
        if let Some(hit) = self.cache.get(&key).await? {
            return Ok(hit);
        }

        info!("synthesizing {} summaries into one", summaries.len());

        let messages = synthesis_prompt(summaries);
        let prompt_tokens = self.counter.count_messages(&messages);
        if prompt_tokens > SYNTHESIS_PROMPT_BUDGET {
            return Err(RecapError::Precondition(format!(
                "synthesis prompt is {prompt_tokens} tokens, over the \
                 {SYNTHESIS_PROMPT_BUDGET}-token limit"
            )));
        }

        let response = self.model.chat(ChatRequest::new(messages)).await?;
        if let Some(usage) = &response.usage {
            self.usage.record(usage);
        }

        let result = response.message.content().to_string();
        self.cache.put(&key, &result).await?;
        Ok(result)
    }
}
