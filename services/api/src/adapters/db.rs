//! services/api/src/adapters/db.rs
//!
//! This module contains the database adapter, which is the concrete implementation
//! of the `UserStoryStore` port from the `core` crate. It handles all interactions
//! with the PostgreSQL database using `sqlx`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::{FromRow, PgPool};
use storyforge_core::domain::{UserStoryCollection, UserStoryRecord};
use storyforge_core::ports::{PortError, PortResult, UserStoryStore};

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// A database adapter that implements the `UserStoryStore` port.
#[derive(Clone)]
pub struct PgStoryStore {
    pool: PgPool,
}

impl PgStoryStore {
    /// Creates a new `PgStoryStore`.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// A helper function to run database migrations at startup.
    pub async fn run_migrations(&self) -> Result<(), sqlx::Error> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }
}

//=========================================================================================
// "Impure" Database Record Structs
//=========================================================================================

#[derive(FromRow)]
struct StoryRow {
    id: i64,
    user_id: String,
    original_idea: String,
    user_stories: Json<UserStoryCollection>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl StoryRow {
    fn to_domain(self) -> UserStoryRecord {
        UserStoryRecord {
            id: self.id,
            user_id: self.user_id,
            original_idea: self.original_idea,
            user_stories: self.user_stories.0,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

//=========================================================================================
// `UserStoryStore` Trait Implementation
//=========================================================================================

#[async_trait]
impl UserStoryStore for PgStoryStore {
    async fn save_user_stories(
        &self,
        user_id: &str,
        original_idea: &str,
        stories: &UserStoryCollection,
    ) -> PortResult<UserStoryRecord> {
        let row = sqlx::query_as::<_, StoryRow>(
            "INSERT INTO user_stories (user_id, original_idea, user_stories) \
             VALUES ($1, $2, $3) \
             RETURNING id, user_id, original_idea, user_stories, created_at, updated_at",
        )
        .bind(user_id)
        .bind(original_idea)
        .bind(Json(stories))
        .fetch_one(&self.pool)
        .await
        .map_err(|e| PortError::Storage(e.to_string()))?;

        Ok(row.to_domain())
    }

    async fn list_by_user(&self, user_id: &str) -> PortResult<Vec<UserStoryRecord>> {
        let rows = sqlx::query_as::<_, StoryRow>(
            "SELECT id, user_id, original_idea, user_stories, created_at, updated_at \
             FROM user_stories WHERE user_id = $1 ORDER BY created_at ASC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| PortError::Storage(e.to_string()))?;

        Ok(rows.into_iter().map(StoryRow::to_domain).collect())
    }

    async fn get_by_id(&self, id: i64, user_id: &str) -> PortResult<Option<UserStoryRecord>> {
        // Ownership is enforced in the query itself: an id without the
        // matching user_id finds nothing.
        let row = sqlx::query_as::<_, StoryRow>(
            "SELECT id, user_id, original_idea, user_stories, created_at, updated_at \
             FROM user_stories WHERE id = $1 AND user_id = $2",
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| PortError::Storage(e.to_string()))?;

        Ok(row.map(StoryRow::to_domain))
    }

    async fn delete_by_id(&self, id: i64, user_id: &str) -> PortResult<bool> {
        let result = sqlx::query("DELETE FROM user_stories WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(|e| PortError::Storage(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }
}
