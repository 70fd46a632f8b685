pub mod anthropic;
pub mod gemini;
pub mod openai;
pub mod selector;

pub use anthropic::AnthropicModel;
pub use gemini::GeminiModel;
pub use openai::OpenAiModel;
pub use selector::ProviderSelector;
