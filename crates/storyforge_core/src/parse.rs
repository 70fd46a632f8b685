//! crates/storyforge_core/src/parse.rs
//!
//! Strict parsing and validation of raw model output into a
//! [`UserStoryCollection`]. The pipeline either gets a fully valid
//! collection out of this module or an error describing why; there is no
//! repair step and no partial result.

use crate::domain::UserStoryCollection;

/// Why a model response was rejected.
#[derive(Debug, thiserror::Error)]
pub enum StoryParseError {
    /// The response was not the expected JSON document at all, or a field
    /// had the wrong type or was missing.
    #[error("Response is not a valid user story document: {0}")]
    InvalidJson(#[from] serde_json::Error),
    /// The document deserialized but a story violated a value constraint.
    #[error("Story {index} (\"{title}\") is invalid: {reason}")]
    InvalidStory {
        index: usize,
        title: String,
        reason: String,
    },
}

/// Parses raw model output into a validated [`UserStoryCollection`].
///
/// Models frequently wrap their JSON in a Markdown code fence even when
/// told not to, so a single surrounding fence is tolerated. Everything
/// else is strict: the text must deserialize into an object with a
/// `userStories` array whose entries carry every field with the right
/// type, `priority` drawn from the closed enumeration, and a positive
/// `estimatedEffort`.
pub fn parse_story_collection(raw: &str) -> Result<UserStoryCollection, StoryParseError> {
    let body = strip_code_fence(raw.trim());

    let collection: UserStoryCollection = serde_json::from_str(body)?;

    for (index, story) in collection.user_stories.iter().enumerate() {
        if story.estimated_effort == 0 {
            return Err(StoryParseError::InvalidStory {
                index,
                title: story.title.clone(),
                reason: "estimatedEffort must be a positive integer".to_string(),
            });
        }
    }

    Ok(collection)
}

/// Removes one surrounding Markdown code fence (``` or ```json) if present.
fn strip_code_fence(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    let Some(rest) = rest.strip_suffix("```") else {
        return text;
    };
    // Drop a language tag such as `json` on the opening fence line.
    match rest.split_once('\n') {
        Some((first_line, body)) if !first_line.trim().is_empty() => body,
        _ => rest,
    }
    .trim()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Priority;

    const VALID: &str = r#"{
        "userStories": [
            {
                "title": "Share a file",
                "userStory": "As a member, I want to share a file, so that my team can see it",
                "acceptanceCriteria": ["Upload completes", "Link is visible to the team"],
                "definitionOfDone": ["Unit tests pass"],
                "priority": "High",
                "estimatedEffort": 5,
                "dependencies": ["Authentication"]
            }
        ]
    }"#;

    #[test]
    fn accepts_a_valid_document() {
        let collection = parse_story_collection(VALID).unwrap();
        assert_eq!(collection.user_stories.len(), 1);
        let story = &collection.user_stories[0];
        assert_eq!(story.title, "Share a file");
        assert_eq!(story.priority, Priority::High);
        assert_eq!(story.estimated_effort, 5);
        assert_eq!(story.acceptance_criteria.len(), 2);
    }

    #[test]
    fn accepts_a_fenced_document() {
        let fenced = format!("```json\n{VALID}\n```");
        let collection = parse_story_collection(&fenced).unwrap();
        assert_eq!(collection.user_stories.len(), 1);

        let bare_fence = format!("```\n{VALID}\n```");
        assert!(parse_story_collection(&bare_fence).is_ok());
    }

    #[test]
    fn rejects_plain_text() {
        let result = parse_story_collection("Here are your user stories!");
        assert!(matches!(result, Err(StoryParseError::InvalidJson(_))));
    }

    #[test]
    fn rejects_a_document_without_the_stories_field() {
        let result = parse_story_collection(r#"{"stories": []}"#);
        assert!(matches!(result, Err(StoryParseError::InvalidJson(_))));
    }

    #[test]
    fn rejects_a_missing_field() {
        // No definitionOfDone.
        let result = parse_story_collection(
            r#"{"userStories": [{
                "title": "t",
                "userStory": "s",
                "acceptanceCriteria": [],
                "priority": "Low",
                "estimatedEffort": 1,
                "dependencies": []
            }]}"#,
        );
        assert!(matches!(result, Err(StoryParseError::InvalidJson(_))));
    }

    #[test]
    fn rejects_an_unknown_priority() {
        let result = parse_story_collection(
            r#"{"userStories": [{
                "title": "t",
                "userStory": "s",
                "acceptanceCriteria": [],
                "definitionOfDone": [],
                "priority": "Urgent",
                "estimatedEffort": 1,
                "dependencies": []
            }]}"#,
        );
        assert!(matches!(result, Err(StoryParseError::InvalidJson(_))));
    }

    #[test]
    fn rejects_zero_effort() {
        let result = parse_story_collection(
            r#"{"userStories": [{
                "title": "t",
                "userStory": "s",
                "acceptanceCriteria": [],
                "definitionOfDone": [],
                "priority": "Medium",
                "estimatedEffort": 0,
                "dependencies": []
            }]}"#,
        );
        match result {
            Err(StoryParseError::InvalidStory { index, .. }) => assert_eq!(index, 0),
            other => panic!("expected InvalidStory, got {other:?}"),
        }
    }

    #[test]
    fn rejects_a_negative_effort() {
        // u32 target, so serde rejects this before the value check runs.
        let result = parse_story_collection(
            r#"{"userStories": [{
                "title": "t",
                "userStory": "s",
                "acceptanceCriteria": [],
                "definitionOfDone": [],
                "priority": "Medium",
                "estimatedEffort": -2,
                "dependencies": []
            }]}"#,
        );
        assert!(matches!(result, Err(StoryParseError::InvalidJson(_))));
    }

    #[test]
    fn accepts_an_empty_collection() {
        let collection = parse_story_collection(r#"{"userStories": []}"#).unwrap();
        assert!(collection.user_stories.is_empty());
    }
}
