/// Media service - uniqueness and deletion-safety rules for media accounts
use std::sync::Arc;

use crate::error::{AppError, Result};
use crate::models::Media;
use crate::repository::{MediaRepository, PublicationLookup};

pub struct MediaService {
    repo: Arc<dyn MediaRepository>,
    publications: Arc<dyn PublicationLookup>,
}

impl MediaService {
    pub fn new(repo: Arc<dyn MediaRepository>, publications: Arc<dyn PublicationLookup>) -> Self {
        Self { repo, publications }
    }

    /// Create a media account unless its (title, username) pair is taken
    pub async fn create(&self, title: &str, username: &str) -> Result<Media> {
        self.ensure_no_duplicate(title, username, None).await?;
        self.repo.create(title, username).await
    }

    pub async fn find_all(&self) -> Result<Vec<Media>> {
        self.repo.find_all().await
    }

    pub async fn find_one(&self, id: i64) -> Result<Media> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("media {id} not found")))
    }

    /// Update a media account, re-running the duplicate check against the
    /// new values. The record's own id is excluded from the scan so saving
    /// a media with its unchanged values succeeds.
    pub async fn update(&self, id: i64, title: &str, username: &str) -> Result<Media> {
        self.find_one(id).await?;
        self.ensure_no_duplicate(title, username, Some(id)).await?;
        self.repo.update(id, title, username).await
    }

    /// Delete a media account unless a publication still references it
    pub async fn remove(&self, id: i64) -> Result<()> {
        self.find_one(id).await?;
        if self.publications.find_by_media_id(id).await?.is_some() {
            return Err(AppError::Forbidden(format!(
                "media {id} is referenced by a publication"
            )));
        }
        self.repo.delete(id).await
    }

    async fn ensure_no_duplicate(
        &self,
        title: &str,
        username: &str,
        exclude_id: Option<i64>,
    ) -> Result<()> {
        let duplicates = self.repo.find_duplicates(title, username, exclude_id).await?;
        if !duplicates.is_empty() {
            return Err(AppError::Conflict(format!(
                "media \"{title}\" already registered for username \"{username}\""
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::medias::MockMediaRepository;
    use crate::repository::publications::MockPublicationLookup;

    fn instagram(id: i64) -> Media {
        Media {
            id,
            title: "Instagram".to_string(),
            username: "brand.account".to_string(),
        }
    }

    fn publication_for(media_id: i64) -> crate::models::Publication {
        crate::models::Publication {
            id: 9,
            media_id,
            post_id: 4,
            date: "2023-09-09T12:00:00Z".parse().unwrap(),
        }
    }

    fn service(repo: MockMediaRepository, lookup: MockPublicationLookup) -> MediaService {
        MediaService::new(Arc::new(repo), Arc::new(lookup))
    }

    #[tokio::test]
    async fn create_returns_created_media() {
        let mut repo = MockMediaRepository::new();
        repo.expect_find_duplicates()
            .withf(|title, username, exclude| {
                title == "Instagram" && username == "brand.account" && exclude.is_none()
            })
            .returning(|_, _, _| Ok(vec![]));
        repo.expect_create()
            .withf(|title, username| title == "Instagram" && username == "brand.account")
            .returning(|_, _| Ok(instagram(1)));

        let result = service(repo, MockPublicationLookup::new())
            .create("Instagram", "brand.account")
            .await
            .unwrap();
        assert_eq!(result, instagram(1));
    }

    #[tokio::test]
    async fn create_conflicts_on_duplicate_pair() {
        let mut repo = MockMediaRepository::new();
        repo.expect_find_duplicates()
            .returning(|_, _, _| Ok(vec![instagram(1)]));
        // no expect_create: creating after a duplicate hit must not happen

        let err = service(repo, MockPublicationLookup::new())
            .create("Instagram", "brand.account")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn find_one_returns_not_found_for_missing_id() {
        let mut repo = MockMediaRepository::new();
        repo.expect_find_by_id().returning(|_| Ok(None));

        let err = service(repo, MockPublicationLookup::new())
            .find_one(7)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn update_returns_not_found_for_missing_id() {
        let mut repo = MockMediaRepository::new();
        repo.expect_find_by_id().returning(|_| Ok(None));

        let err = service(repo, MockPublicationLookup::new())
            .update(7, "Instagram", "brand.account")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn update_conflicts_when_another_media_holds_the_pair() {
        let mut repo = MockMediaRepository::new();
        repo.expect_find_by_id().returning(|_| Ok(Some(instagram(1))));
        repo.expect_find_duplicates()
            .withf(|_, _, exclude| *exclude == Some(1))
            .returning(|_, _, _| Ok(vec![instagram(2)]));

        let err = service(repo, MockPublicationLookup::new())
            .update(1, "Instagram", "brand.account")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn update_allows_saving_a_media_with_its_own_values() {
        let mut repo = MockMediaRepository::new();
        repo.expect_find_by_id().returning(|_| Ok(Some(instagram(1))));
        // the scan excludes id 1, so the record itself is not a duplicate
        repo.expect_find_duplicates()
            .withf(|_, _, exclude| *exclude == Some(1))
            .returning(|_, _, _| Ok(vec![]));
        repo.expect_update()
            .times(1)
            .returning(|_, _, _| Ok(instagram(1)));

        let result = service(repo, MockPublicationLookup::new())
            .update(1, "Instagram", "brand.account")
            .await
            .unwrap();
        assert_eq!(result, instagram(1));
    }

    #[tokio::test]
    async fn remove_is_forbidden_while_a_publication_references_the_media() {
        let mut repo = MockMediaRepository::new();
        repo.expect_find_by_id().returning(|_| Ok(Some(instagram(1))));
        let mut lookup = MockPublicationLookup::new();
        lookup
            .expect_find_by_media_id()
            .returning(|id| Ok(Some(publication_for(id))));

        let err = service(repo, lookup).remove(1).await.unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));
    }

    #[tokio::test]
    async fn remove_deletes_an_unreferenced_media() {
        let mut repo = MockMediaRepository::new();
        repo.expect_find_by_id().returning(|_| Ok(Some(instagram(1))));
        repo.expect_delete().times(1).returning(|_| Ok(()));
        let mut lookup = MockPublicationLookup::new();
        lookup.expect_find_by_media_id().returning(|_| Ok(None));

        service(repo, lookup).remove(1).await.unwrap();
    }

    #[tokio::test]
    async fn remove_returns_not_found_for_missing_id() {
        let mut repo = MockMediaRepository::new();
        repo.expect_find_by_id().returning(|_| Ok(None));

        let err = service(repo, MockPublicationLookup::new())
            .remove(7)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
