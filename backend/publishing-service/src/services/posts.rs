/// Post service - deletion-safety rules for posts
use std::sync::Arc;

use crate::error::{AppError, Result};
use crate::models::Post;
use crate::repository::{PostRepository, PublicationLookup};

pub struct PostService {
    repo: Arc<dyn PostRepository>,
    publications: Arc<dyn PublicationLookup>,
}

impl PostService {
    pub fn new(repo: Arc<dyn PostRepository>, publications: Arc<dyn PublicationLookup>) -> Self {
        Self { repo, publications }
    }

    pub async fn create(&self, title: &str, text: &str, image: Option<&str>) -> Result<Post> {
        self.repo.create(title, text, image).await
    }

    pub async fn find_all(&self) -> Result<Vec<Post>> {
        self.repo.find_all().await
    }

    pub async fn find_one(&self, id: i64) -> Result<Post> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("post {id} not found")))
    }

    pub async fn update(
        &self,
        id: i64,
        title: &str,
        text: &str,
        image: Option<&str>,
    ) -> Result<Post> {
        self.find_one(id).await?;
        self.repo.update(id, title, text, image).await
    }

    /// Delete a post unless a publication still references it
    pub async fn remove(&self, id: i64) -> Result<()> {
        self.find_one(id).await?;
        if self.publications.find_by_post_id(id).await?.is_some() {
            return Err(AppError::Forbidden(format!(
                "post {id} is referenced by a publication"
            )));
        }
        self.repo.delete(id).await
    }
}
