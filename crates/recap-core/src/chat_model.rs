use async_trait::async_trait;

use crate::{ChatRequest, ChatResponse, RecapError};

/// Trait for chat-completion language models.
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Send a chat request and return the model's response.
    async fn chat(&self, request: ChatRequest) -> Result<ChatResponse, RecapError>;
}
