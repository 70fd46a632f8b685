//! crates/storyforge_core/src/domain.rs
//!
//! Defines the core data structures for the application.
//!
//! Unlike a purely internal domain model, these structs double as the wire
//! and storage shape: the LLM is instructed to emit exactly this JSON, the
//! HTTP layer returns it, and the store keeps it as a JSONB blob. The
//! camelCase renames are therefore part of the contract, not presentation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Relative priority of a story. Closed enumeration; anything else coming
/// back from the model is a validation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Priority {
    High,
    Medium,
    Low,
}

/// A single agile user story as produced by the generation pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStory {
    pub title: String,
    /// Conventionally "As a [user], I want to [action], so that [benefit]".
    pub user_story: String,
    /// Order is meaningful (display order).
    pub acceptance_criteria: Vec<String>,
    pub definition_of_done: Vec<String>,
    pub priority: Priority,
    /// Story points, conventionally 1-8. Must be at least 1.
    pub estimated_effort: u32,
    /// References to other stories or technical prerequisites. May be empty.
    pub dependencies: Vec<String>,
}

/// The full output of one generation call. Never partially persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStoryCollection {
    pub user_stories: Vec<UserStory>,
}

/// A persisted story set with its provenance. Immutable after creation;
/// there is no update path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStoryRecord {
    pub id: i64,
    pub user_id: String,
    /// The verbatim idea text the stories were generated from.
    pub original_idea: String,
    pub user_stories: UserStoryCollection,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn priority_accepts_the_three_known_levels() {
        for (text, expected) in [
            ("\"High\"", Priority::High),
            ("\"Medium\"", Priority::Medium),
            ("\"Low\"", Priority::Low),
        ] {
            let parsed: Priority = serde_json::from_str(text).unwrap();
            assert_eq!(parsed, expected);
        }
    }

    #[test]
    fn priority_rejects_unknown_levels() {
        assert!(serde_json::from_str::<Priority>("\"Critical\"").is_err());
        assert!(serde_json::from_str::<Priority>("\"high\"").is_err());
    }

    #[test]
    fn user_story_round_trips_in_camel_case() {
        let story = UserStory {
            title: "Login".to_string(),
            user_story: "As a user, I want to log in, so that my data is private".to_string(),
            acceptance_criteria: vec!["Shows an error on a bad password".to_string()],
            definition_of_done: vec!["Deployed behind the feature flag".to_string()],
            priority: Priority::High,
            estimated_effort: 3,
            dependencies: vec![],
        };

        let json = serde_json::to_value(&story).unwrap();
        assert!(json.get("userStory").is_some());
        assert!(json.get("acceptanceCriteria").is_some());
        assert!(json.get("estimatedEffort").is_some());

        let back: UserStory = serde_json::from_value(json).unwrap();
        assert_eq!(back, story);
    }
}
