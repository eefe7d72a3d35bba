use async_trait::async_trait;
use sqlx::PgPool;
use tracing::debug;

use crate::error::{AppError, Result};
use crate::models::Media;

use super::is_unique_violation;

/// Gateway for media account records.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MediaRepository: Send + Sync {
    async fn create(&self, title: &str, username: &str) -> Result<Media>;

    /// All medias ordered by ascending id
    async fn find_all(&self) -> Result<Vec<Media>>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Media>>;

    /// Medias matching (title, username), skipping `exclude_id` when set so
    /// an update does not collide with the record it is updating.
    async fn find_duplicates(
        &self,
        title: &str,
        username: &str,
        exclude_id: Option<i64>,
    ) -> Result<Vec<Media>>;

    async fn update(&self, id: i64, title: &str, username: &str) -> Result<Media>;

    async fn delete(&self, id: i64) -> Result<()>;
}

#[derive(Clone)]
pub struct PgMediaRepository {
    pool: PgPool,
}

impl PgMediaRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MediaRepository for PgMediaRepository {
    async fn create(&self, title: &str, username: &str) -> Result<Media> {
        let media = sqlx::query_as::<_, Media>(
            r#"
            INSERT INTO medias (title, username)
            VALUES ($1, $2)
            RETURNING id, title, username
            "#,
        )
        .bind(title)
        .bind(username)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| duplicate_conflict(e, title, username))?;

        debug!(media_id = media.id, "created media");
        Ok(media)
    }

    async fn find_all(&self) -> Result<Vec<Media>> {
        let medias = sqlx::query_as::<_, Media>(
            r#"
            SELECT id, title, username
            FROM medias
            ORDER BY id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(medias)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Media>> {
        let media = sqlx::query_as::<_, Media>(
            r#"
            SELECT id, title, username
            FROM medias
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(media)
    }

    async fn find_duplicates(
        &self,
        title: &str,
        username: &str,
        exclude_id: Option<i64>,
    ) -> Result<Vec<Media>> {
        let medias = sqlx::query_as::<_, Media>(
            r#"
            SELECT id, title, username
            FROM medias
            WHERE title = $1
              AND username = $2
              AND ($3::bigint IS NULL OR id <> $3)
            ORDER BY id ASC
            "#,
        )
        .bind(title)
        .bind(username)
        .bind(exclude_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(medias)
    }

    async fn update(&self, id: i64, title: &str, username: &str) -> Result<Media> {
        let media = sqlx::query_as::<_, Media>(
            r#"
            UPDATE medias
            SET title = $2, username = $3
            WHERE id = $1
            RETURNING id, title, username
            "#,
        )
        .bind(id)
        .bind(title)
        .bind(username)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| duplicate_conflict(e, title, username))?;

        debug!(media_id = id, "updated media");
        Ok(media)
    }

    async fn delete(&self, id: i64) -> Result<()> {
        sqlx::query("DELETE FROM medias WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        debug!(media_id = id, "deleted media");
        Ok(())
    }
}

/// The unique index on (title, username) backstops the service-level
/// duplicate check against concurrent writers; surface it as the same
/// Conflict the service raises.
fn duplicate_conflict(err: sqlx::Error, title: &str, username: &str) -> AppError {
    if is_unique_violation(&err) {
        AppError::Conflict(format!(
            "media \"{title}\" already registered for username \"{username}\""
        ))
    } else {
        err.into()
    }
}
