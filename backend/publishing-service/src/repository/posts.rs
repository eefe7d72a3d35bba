use async_trait::async_trait;
use sqlx::PgPool;
use tracing::debug;

use crate::error::Result;
use crate::models::Post;

/// Gateway for post records.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PostRepository: Send + Sync {
    async fn create<'a>(&self, title: &str, text: &str, image: Option<&'a str>) -> Result<Post>;

    /// All posts ordered by ascending id
    async fn find_all(&self) -> Result<Vec<Post>>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Post>>;

    async fn update<'a>(&self, id: i64, title: &str, text: &str, image: Option<&'a str>)
        -> Result<Post>;

    async fn delete(&self, id: i64) -> Result<()>;
}

#[derive(Clone)]
pub struct PgPostRepository {
    pool: PgPool,
}

impl PgPostRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PostRepository for PgPostRepository {
    async fn create<'a>(&self, title: &str, text: &str, image: Option<&'a str>) -> Result<Post> {
        let post = sqlx::query_as::<_, Post>(
            r#"
            INSERT INTO posts (title, text, image)
            VALUES ($1, $2, $3)
            RETURNING id, title, text, image
            "#,
        )
        .bind(title)
        .bind(text)
        .bind(image)
        .fetch_one(&self.pool)
        .await?;

        debug!(post_id = post.id, "created post");
        Ok(post)
    }

    async fn find_all(&self) -> Result<Vec<Post>> {
        let posts = sqlx::query_as::<_, Post>(
            r#"
            SELECT id, title, text, image
            FROM posts
            ORDER BY id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(posts)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Post>> {
        let post = sqlx::query_as::<_, Post>(
            r#"
            SELECT id, title, text, image
            FROM posts
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(post)
    }

    async fn update<'a>(
        &self,
        id: i64,
        title: &str,
        text: &str,
        image: Option<&'a str>,
    ) -> Result<Post> {
        let post = sqlx::query_as::<_, Post>(
            r#"
            UPDATE posts
            SET title = $2, text = $3, image = $4
            WHERE id = $1
            RETURNING id, title, text, image
            "#,
        )
        .bind(id)
        .bind(title)
        .bind(text)
        .bind(image)
        .fetch_one(&self.pool)
        .await?;

        debug!(post_id = id, "updated post");
        Ok(post)
    }

    async fn delete(&self, id: i64) -> Result<()> {
        sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        debug!(post_id = id, "deleted post");
        Ok(())
    }
}
