mod chat_model;
mod error;
mod message;
mod token_counter;

pub use chat_model::ChatModel;
pub use error::RecapError;
pub use message::{ChatRequest, ChatResponse, Message, Role, TokenUsage};
pub use token_counter::{HeuristicTokenCounter, TiktokenCounter, TokenCounter};
