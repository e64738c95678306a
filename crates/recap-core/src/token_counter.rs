use tiktoken_rs::CoreBPE;

use crate::{Message, RecapError};

/// Trait for counting tokens in text and messages.
pub trait TokenCounter: Send + Sync {
    /// Count the number of tokens in a text string.
    fn count_text(&self, text: &str) -> usize;

    /// Count the total number of tokens in a slice of messages.
    /// Default implementation sums count_text(content) + 4 per message
    /// for role framing overhead.
    fn count_messages(&self, messages: &[Message]) -> usize {
        messages
            .iter()
            .map(|m| self.count_text(m.content()) + 4)
            .sum()
    }
}

/// Heuristic token counter that estimates ~4 characters per token.
pub struct HeuristicTokenCounter;

impl TokenCounter for HeuristicTokenCounter {
    fn count_text(&self, text: &str) -> usize {
        // ~4 chars per token, minimum 1 token for non-empty text
        let count = text.len() / 4;
        if text.is_empty() {
            0
        } else {
            count.max(1)
        }
    }
}

/// Exact token counter backed by the tiktoken BPE for a given model.
pub struct TiktokenCounter {
    bpe: CoreBPE,
    model: String,
}

impl TiktokenCounter {
    /// Resolve the BPE encoding for a model identifier.
    pub fn for_model(model: impl Into<String>) -> Result<Self, RecapError> {
        let model = model.into();
        let bpe = tiktoken_rs::get_bpe_from_model(&model)
            .map_err(|e| RecapError::Config(format!("no tokenizer for model {model}: {e}")))?;
        Ok(Self { bpe, model })
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

impl TokenCounter for TiktokenCounter {
    fn count_text(&self, text: &str) -> usize {
        self.bpe.encode_with_special_tokens(text).len()
    }
}
