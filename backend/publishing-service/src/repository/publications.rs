use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::debug;

use crate::error::Result;
use crate::models::Publication;

/// Read-only lookup over publication references.
///
/// This is the capability the media and post deletion guards consume: they
/// only need to know whether any publication still points at a record, not
/// the full gateway. Wired at the composition root so the three services
/// stay free of construction cycles.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PublicationLookup: Send + Sync {
    /// First publication referencing the media, if any
    async fn find_by_media_id(&self, media_id: i64) -> Result<Option<Publication>>;

    /// First publication referencing the post, if any
    async fn find_by_post_id(&self, post_id: i64) -> Result<Option<Publication>>;
}

/// Gateway for publication records.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PublicationRepository: Send + Sync {
    async fn create(&self, media_id: i64, post_id: i64, date: DateTime<Utc>)
        -> Result<Publication>;

    /// Publications ordered by ascending id, narrowed by the tri-state
    /// `published` filter (Some(true): date strictly before `now`,
    /// Some(false): strictly after, None: all) and, when `after` is set, to
    /// dates strictly after it — on every branch.
    async fn find_filtered(
        &self,
        published: Option<bool>,
        after: Option<DateTime<Utc>>,
        now: DateTime<Utc>,
    ) -> Result<Vec<Publication>>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Publication>>;

    async fn find_by_media_id(&self, media_id: i64) -> Result<Option<Publication>>;

    async fn find_by_post_id(&self, post_id: i64) -> Result<Option<Publication>>;

    async fn update(
        &self,
        id: i64,
        media_id: i64,
        post_id: i64,
        date: DateTime<Utc>,
    ) -> Result<Publication>;

    async fn delete(&self, id: i64) -> Result<()>;
}

#[derive(Clone)]
pub struct PgPublicationRepository {
    pool: PgPool,
}

impl PgPublicationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn lookup_by_media_id(&self, media_id: i64) -> Result<Option<Publication>> {
        let publication = sqlx::query_as::<_, Publication>(
            r#"
            SELECT id, media_id, post_id, date
            FROM publications
            WHERE media_id = $1
            ORDER BY id ASC
            LIMIT 1
            "#,
        )
        .bind(media_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(publication)
    }

    async fn lookup_by_post_id(&self, post_id: i64) -> Result<Option<Publication>> {
        let publication = sqlx::query_as::<_, Publication>(
            r#"
            SELECT id, media_id, post_id, date
            FROM publications
            WHERE post_id = $1
            ORDER BY id ASC
            LIMIT 1
            "#,
        )
        .bind(post_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(publication)
    }
}

#[async_trait]
impl PublicationLookup for PgPublicationRepository {
    async fn find_by_media_id(&self, media_id: i64) -> Result<Option<Publication>> {
        self.lookup_by_media_id(media_id).await
    }

    async fn find_by_post_id(&self, post_id: i64) -> Result<Option<Publication>> {
        self.lookup_by_post_id(post_id).await
    }
}

#[async_trait]
impl PublicationRepository for PgPublicationRepository {
    async fn create(
        &self,
        media_id: i64,
        post_id: i64,
        date: DateTime<Utc>,
    ) -> Result<Publication> {
        let publication = sqlx::query_as::<_, Publication>(
            r#"
            INSERT INTO publications (media_id, post_id, date)
            VALUES ($1, $2, $3)
            RETURNING id, media_id, post_id, date
            "#,
        )
        .bind(media_id)
        .bind(post_id)
        .bind(date)
        .fetch_one(&self.pool)
        .await?;

        debug!(publication_id = publication.id, "created publication");
        Ok(publication)
    }

    async fn find_filtered(
        &self,
        published: Option<bool>,
        after: Option<DateTime<Utc>>,
        now: DateTime<Utc>,
    ) -> Result<Vec<Publication>> {
        // `now` is bound by the caller so the clock stays in the service
        // layer; NULL binds collapse the untouched branches.
        let publications = sqlx::query_as::<_, Publication>(
            r#"
            SELECT id, media_id, post_id, date
            FROM publications
            WHERE ($1::boolean IS NULL
                   OR ($1 = TRUE AND date < $3)
                   OR ($1 = FALSE AND date > $3))
              AND ($2::timestamptz IS NULL OR date > $2)
            ORDER BY id ASC
            "#,
        )
        .bind(published)
        .bind(after)
        .bind(now)
        .fetch_all(&self.pool)
        .await?;

        Ok(publications)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Publication>> {
        let publication = sqlx::query_as::<_, Publication>(
            r#"
            SELECT id, media_id, post_id, date
            FROM publications
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(publication)
    }

    async fn find_by_media_id(&self, media_id: i64) -> Result<Option<Publication>> {
        self.lookup_by_media_id(media_id).await
    }

    async fn find_by_post_id(&self, post_id: i64) -> Result<Option<Publication>> {
        self.lookup_by_post_id(post_id).await
    }

    async fn update(
        &self,
        id: i64,
        media_id: i64,
        post_id: i64,
        date: DateTime<Utc>,
    ) -> Result<Publication> {
        let publication = sqlx::query_as::<_, Publication>(
            r#"
            UPDATE publications
            SET media_id = $2, post_id = $3, date = $4
            WHERE id = $1
            RETURNING id, media_id, post_id, date
            "#,
        )
        .bind(id)
        .bind(media_id)
        .bind(post_id)
        .bind(date)
        .fetch_one(&self.pool)
        .await?;

        debug!(publication_id = id, "updated publication");
        Ok(publication)
    }

    async fn delete(&self, id: i64) -> Result<()> {
        sqlx::query("DELETE FROM publications WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        debug!(publication_id = id, "deleted publication");
        Ok(())
    }
}
