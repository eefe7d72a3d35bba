/// Database access layer
///
/// One repository per entity: an async trait describing the gateway the
/// services consume, and a Postgres implementation over a shared pool.
pub mod medias;
pub mod posts;
pub mod publications;

pub use medias::{MediaRepository, PgMediaRepository};
pub use posts::{PgPostRepository, PostRepository};
pub use publications::{PgPublicationRepository, PublicationLookup, PublicationRepository};

use sqlx::PgPool;

/// Create tables and indexes if missing so the service can start against an
/// empty database.
///
/// `publications.media_id` / `post_id` deliberately carry no foreign-key
/// constraints: referential integrity is enforced by the service layer. The
/// unique index on (title, username) is the storage backstop for the
/// duplicate-media race window; the repositories surface its violation as a
/// Conflict.
pub async fn ensure_schema(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS medias (
            id BIGSERIAL PRIMARY KEY,
            title TEXT NOT NULL,
            username TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE UNIQUE INDEX IF NOT EXISTS medias_title_username_idx
        ON medias (title, username)
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS posts (
            id BIGSERIAL PRIMARY KEY,
            title TEXT NOT NULL,
            text TEXT NOT NULL,
            image TEXT
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS publications (
            id BIGSERIAL PRIMARY KEY,
            media_id BIGINT NOT NULL,
            post_id BIGINT NOT NULL,
            date TIMESTAMPTZ NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    tracing::info!("database schema ensured");
    Ok(())
}

/// Postgres unique_violation (23505)
pub(crate) fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.code().as_deref() == Some("23505"))
}
