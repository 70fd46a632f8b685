pub mod domain;
pub mod parse;
pub mod ports;

pub use domain::{Priority, UserStory, UserStoryCollection, UserStoryRecord};
pub use parse::{parse_story_collection, StoryParseError};
pub use ports::{
    CompletionModel, IdentityService, PortError, PortResult, StoryGenerationService,
    UserStoryStore,
};
