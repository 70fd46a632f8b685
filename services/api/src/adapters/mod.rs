pub mod db;
pub mod identity;
pub mod llm;
pub mod story_llm;

pub use db::PgStoryStore;
pub use identity::HttpIdentityAdapter;
pub use llm::ProviderSelector;
pub use story_llm::StoryAgent;
