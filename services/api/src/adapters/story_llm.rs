//! services/api/src/adapters/story_llm.rs
//!
//! This module contains the story generation pipeline, which implements the
//! `StoryGenerationService` port: render the prompt, pick a live backend,
//! send the prompt, and strictly parse the response.

const PROMPT_TEMPLATE: &str = r#"You are an expert product manager and agile coach. Break down the following idea into detailed, developer-friendly user stories.

For each user story, provide:
- Title: Clear, concise title
- User Story: "As a [user], I want to [action], so that [benefit]"
- Acceptance Criteria: List of specific, testable criteria
- Definition of Done: Clear completion criteria
- Priority: High/Medium/Low
- Estimated Effort: Story points (1-8)
- Dependencies: Any blocking stories or technical requirements

Return the response as valid JSON in this exact format, with no text outside the JSON object:
{
  "userStories": [
    {
      "title": "string",
      "userStory": "string",
      "acceptanceCriteria": ["string"],
      "definitionOfDone": ["string"],
      "priority": "High|Medium|Low",
      "estimatedEffort": number,
      "dependencies": ["string"]
    }
  ]
}

Idea: {idea}
"#;

use async_trait::async_trait;
use storyforge_core::domain::UserStoryCollection;
use storyforge_core::parse::parse_story_collection;
use storyforge_core::ports::{PortError, PortResult, StoryGenerationService};
use tracing::{info, warn};

use super::llm::ProviderSelector;

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// The generation pipeline: prompt template + provider selector + strict
/// response validation.
pub struct StoryAgent {
    selector: ProviderSelector,
}

impl StoryAgent {
    /// Creates a new `StoryAgent` over an already-constructed selector.
    pub fn new(selector: ProviderSelector) -> Self {
        Self { selector }
    }
}

//=========================================================================================
// `StoryGenerationService` Trait Implementation
//=========================================================================================

#[async_trait]
impl StoryGenerationService for StoryAgent {
    /// Generates a validated story collection for `idea`.
    ///
    /// The whole response comes from the single backend the selector
    /// committed to; there is no mixing of outputs, no caching, and no
    /// retry beyond the selector's own fallback chain.
    async fn generate_user_stories(&self, idea: &str) -> PortResult<UserStoryCollection> {
        let Some(model) = self.selector.select().await else {
            return Err(PortError::NoProviderAvailable);
        };
        info!(backend = model.name(), "generating user stories");

        let prompt = PROMPT_TEMPLATE.replace("{idea}", idea);

        let raw = model
            .complete(&prompt)
            .await
            .map_err(|e| PortError::GenerationFailed(e.to_string()))?;

        parse_story_collection(&raw).map_err(|e| {
            warn!(backend = model.name(), error = %e, "model response failed validation");
            PortError::GenerationFailed(e.to_string())
        })
    }
}
