use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use recap_cache::SummaryCache;
use recap_core::{ChatModel, ChatRequest, RecapError, TokenCounter};
use recap_splitters::{SectionSplitter, TextSplitter};
use serde::Serialize;
use tracing::{error, info, warn};

use crate::key::cache_key;
use crate::params::SummarizationParameters;
use crate::prompt::summarization_prompt;
use crate::retry::RetryPolicy;
use crate::usage::UsageTracker;

/// Markers bracketing raw model output in the cache, so pass-through
/// text and provider output stay distinguishable.
const MARKER_OPEN: &str = "[[[";
const MARKER_CLOSE: &str = "]]]";

#[derive(Serialize)]
struct SummarizeKey<'a> {
    text: &'a str,
    params: &'a SummarizationParameters,
    boundary: &'a str,
    model: &'a str,
}

#[derive(Serialize)]
struct CallKey<'a> {
    text: &'a str,
    target_summary_size: usize,
    model: &'a str,
}

/// Recursive summarization engine.
///
/// Reduces arbitrarily long text to a target token budget by splitting
/// it into sections that fit one model call, summarizing each, and
/// re-summarizing the joined results until they collapse under the
/// target. Both the recursion and the underlying model call are
/// memoized through the injected cache, so a given (text, parameters,
/// boundary, model) tuple costs at most one network call across runs.
///
/// Execution is fully sequential: every call, including retries, runs
/// to completion before the next one starts.
pub struct Summarizer {
    model: Arc<dyn ChatModel>,
    model_name: String,
    counter: Arc<dyn TokenCounter>,
    cache: Arc<dyn SummaryCache>,
    retry: RetryPolicy,
    usage: UsageTracker,
}

impl Summarizer {
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
            retry: RetryPolicy::default(),
            usage: UsageTracker::new(),
        }
    }

    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Provider-reported token usage accumulated so far.
    pub fn usage(&self) -> &UsageTracker {
        &self.usage
    }

    /// Summarize `text` down to the configured target size, splitting at
    /// the boundary string where one call cannot take it whole.
    pub async fn summarize(
        &self,
        text: &str,
        params: &SummarizationParameters,
        boundary: &str,
    ) -> Result<String, RecapError> {
        self.summarize_inner(text.to_string(), params, boundary)
            .await
    }

    // Recursion through an async fn needs the boxed indirection.
    fn summarize_inner<'a>(
        &'a self,
        text: String,
        params: &'a SummarizationParameters,
        boundary: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<String, RecapError>> + Send + 'a>> {
        Box::pin(async move {
            let key = cache_key(
                "summarize",
                &SummarizeKey {
                    text: &text,
                    params,
                    boundary,
                    model: &self.model_name,
                },
            )?;
            if let Some(hit) = self.cache.get(&key).await? {
                return Ok(hit);
            }

            let tokens = self.counter.count_text(&text);
            info!(
                "summarizing {}-token text: {}",
                tokens,
                preview(&text, 60)
            );

            let result = if tokens <= params.target_summary_size {
                // Already within budget, no call needed
                text
            } else if tokens <= params.summary_input_size {
                let raw = self
                    .call_summarize(&text, params.target_summary_size)
                    .await?;
                let summary = strip_markers(&raw);
                info!(
                    "summarized {}-token text into {}-token summary: {}",
                    tokens,
                    self.counter.count_text(&summary),
                    preview(&summary, 250)
                );
                summary
            } else {
                let splitter =
                    SectionSplitter::new(params.summary_input_size, self.counter.clone())
                        .with_boundary(boundary);
                let sections = splitter.split_text(&text);
                info!(
                    "split {}-token text into {} sections",
                    tokens,
                    sections.len()
                );

                let mut summaries = Vec::with_capacity(sections.len());
                for section in sections {
                    summaries.push(self.summarize_inner(section, params, boundary).await?);
                }

                self.summarize_inner(summaries.join("\n\n"), params, boundary)
                    .await?
            };

            self.cache.put(&key, &result).await?;
            Ok(result)
        })
    }

    /// One direct summarization call under the retry policy, memoized.
    ///
    /// The cached value is bracketed in markers; callers strip them
    /// before handing text onward.
    async fn call_summarize(
        &self,
        text: &str,
        target_summary_size: usize,
    ) -> Result<String, RecapError> {
        let key = cache_key(
            "call_summarize",
            &CallKey {
                text,
                target_summary_size,
                model: &self.model_name,
            },
        )?;
        if let Some(hit) = self.cache.get(&key).await? {
            return Ok(hit);
        }

        let messages = summarization_prompt(text, target_summary_size);
        let max_attempts = self.retry.max_attempts();
        let mut attempt = 0;
        loop {
            attempt += 1;
            match self.model.chat(ChatRequest::new(messages.clone())).await {
                Ok(response) => {
                    if let Some(usage) = &response.usage {
                        self.usage.record(usage);
                    }
                    let wrapped = format!(
                        "{MARKER_OPEN}{}{MARKER_CLOSE}",
                        response.message.content()
                    );
                    self.cache.put(&key, &wrapped).await?;
                    return Ok(wrapped);
                }
                Err(RecapError::Transient(cause)) if attempt < max_attempts => {
                    warn!("summarize failed (try {attempt} of {max_attempts}): {cause}");
                    tokio::time::sleep(self.retry.delay(attempt)).await;
                }
                Err(RecapError::Transient(cause)) => {
                    error!("summarize failed after {max_attempts} tries, aborting: {cause}");
                    return Err(RecapError::CallFailed {
                        attempts: attempt,
                        cause,
                    });
                }
                Err(RecapError::NonRetryable(cause)) => {
                    error!("summarize hit a non-retryable error on try {attempt}, aborting: {cause}");
                    return Err(RecapError::CallFailed {
                        attempts: attempt,
                        cause,
                    });
                }
                Err(other) => return Err(other),
            }
        }
    }
}

/// Strip the provider-output markers from a summary.
pub fn strip_markers(text: &str) -> String {
    text.replace(MARKER_OPEN, "").replace(MARKER_CLOSE, "")
}

/// Whitespace-collapsed prefix of a text for log lines.
fn preview(text: &str, max_chars: usize) -> String {
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    let mut out: String = collapsed.chars().take(max_chars).collect();
    if collapsed.chars().count() > max_chars {
        out.push_str("...");
    }
    out
}
