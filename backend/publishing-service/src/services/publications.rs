/// Publication service - cross-references to medias/posts and the temporal
/// guard on already-published schedules
use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::error::{AppError, Result};
use crate::models::Publication;
use crate::repository::PublicationRepository;
use crate::services::{MediaService, PostService};

pub struct PublicationService {
    repo: Arc<dyn PublicationRepository>,
    medias: Arc<MediaService>,
    posts: Arc<PostService>,
}

impl PublicationService {
    pub fn new(
        repo: Arc<dyn PublicationRepository>,
        medias: Arc<MediaService>,
        posts: Arc<PostService>,
    ) -> Self {
        Self { repo, medias, posts }
    }

    /// Schedule a post on a media account. Both references must resolve;
    /// the media is checked first, so its NotFound surfaces first.
    pub async fn create(
        &self,
        media_id: i64,
        post_id: i64,
        date: DateTime<Utc>,
    ) -> Result<Publication> {
        self.check_media_and_post_exist(media_id, post_id).await?;
        self.repo.create(media_id, post_id, date).await
    }

    /// List publications.
    ///
    /// `published` narrows to dates strictly before now (true) or strictly
    /// after now (false); `after` additionally requires dates strictly
    /// after it, regardless of the `published` branch.
    pub async fn find_all(
        &self,
        published: Option<bool>,
        after: Option<DateTime<Utc>>,
    ) -> Result<Vec<Publication>> {
        self.repo.find_filtered(published, after, Utc::now()).await
    }

    pub async fn find_one(&self, id: i64) -> Result<Publication> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("publication {id} not found")))
    }

    /// First publication referencing the media, if any. Lookup semantics
    /// only: absence is not an error.
    pub async fn find_one_by_media_id(&self, media_id: i64) -> Result<Option<Publication>> {
        self.repo.find_by_media_id(media_id).await
    }

    /// First publication referencing the post, if any
    pub async fn find_one_by_post_id(&self, post_id: i64) -> Result<Option<Publication>> {
        self.repo.find_by_post_id(post_id).await
    }

    /// Reschedule or repoint a publication. Blocked once the existing
    /// record's date is at or before now, whatever the new date is; the
    /// record itself stays deletable.
    pub async fn update(
        &self,
        id: i64,
        media_id: i64,
        post_id: i64,
        date: DateTime<Utc>,
    ) -> Result<Publication> {
        let existing = self.find_one(id).await?;
        if is_already_published(existing.date, Utc::now()) {
            return Err(AppError::Forbidden(format!(
                "publication {id} has already been published"
            )));
        }
        self.check_media_and_post_exist(media_id, post_id).await?;
        self.repo.update(id, media_id, post_id, date).await
    }

    /// Delete a publication, published or not
    pub async fn remove(&self, id: i64) -> Result<()> {
        self.find_one(id).await?;
        self.repo.delete(id).await
    }

    async fn check_media_and_post_exist(&self, media_id: i64, post_id: i64) -> Result<()> {
        self.medias.find_one(media_id).await?;
        self.posts.find_one(post_id).await?;
        Ok(())
    }
}

fn is_already_published(date: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    date <= now
}
