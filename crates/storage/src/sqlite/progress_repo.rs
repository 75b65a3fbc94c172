use async_trait::async_trait;
use sqlx::Row;

use tutor_core::model::TutorialKey;

use crate::repository::{ProgressRecord, ProgressStore, StorageError};

use super::SqliteProgressStore;

fn ser<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Serialization(e.to_string())
}

#[async_trait]
impl ProgressStore for SqliteProgressStore {
    async fn load(&self, tutorial: &TutorialKey) -> Result<Option<ProgressRecord>, StorageError> {
        let row = sqlx::query(
            r"
            SELECT current_section, visited, saved_at
            FROM tutorial_progress
            WHERE tutorial = ?1
            ",
        )
        .bind(tutorial.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|err| StorageError::Connection(err.to_string()))?;

        let Some(row) = row else {
            return Ok(None);
        };

        let current_section: String = row.try_get("current_section").map_err(ser)?;
        let visited_json: String = row.try_get("visited").map_err(ser)?;
        let visited: Vec<String> = serde_json::from_str(&visited_json).map_err(ser)?;
        let saved_at: chrono::DateTime<chrono::Utc> = row.try_get("saved_at").map_err(ser)?;

        Ok(Some(ProgressRecord {
            tutorial: tutorial.clone(),
            current_section,
            visited,
            saved_at,
        }))
    }

    async fn save(&self, record: &ProgressRecord) -> Result<(), StorageError> {
        let visited_json = serde_json::to_string(&record.visited).map_err(ser)?;

        sqlx::query(
            r"
            INSERT INTO tutorial_progress (tutorial, current_section, visited, saved_at)
            VALUES (?1, ?2, ?3, ?4)
            ON CONFLICT(tutorial) DO UPDATE SET
                current_section = excluded.current_section,
                visited = excluded.visited,
                saved_at = excluded.saved_at
            ",
        )
        .bind(record.tutorial.as_str())
        .bind(&record.current_section)
        .bind(&visited_json)
        .bind(record.saved_at)
        .execute(&self.pool)
        .await
        .map_err(|err| StorageError::Connection(err.to_string()))?;

        Ok(())
    }
}
