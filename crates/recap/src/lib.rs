mod engine;
mod key;
mod params;
mod prompt;
mod retry;
mod synthesis;
mod usage;

pub use engine::{strip_markers, Summarizer};
pub use key::cache_key;
pub use params::{compute_budget, SummarizationParameters};
pub use prompt::{summarization_prompt, synthesis_prompt};
pub use retry::RetryPolicy;
pub use synthesis::{Synthesizer, SYNTHESIS_PROMPT_BUDGET};
pub use usage::UsageTracker;
