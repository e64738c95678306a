mod backend;
mod chat_model;

pub use backend::{FakeBackend, HttpBackend, ProviderBackend, ProviderRequest, ProviderResponse};
pub use chat_model::{OpenAiChatModel, OpenAiConfig};
