/// Post handlers - HTTP endpoints for post operations
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::error::Result;
use crate::services::PostService;

use super::ErrorResponse;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct PostBody {
    #[validate(length(min = 1, message = "title must not be empty"))]
    pub title: String,
    #[validate(length(min = 1, message = "text must not be empty"))]
    pub text: String,
    pub image: Option<String>,
}

/// Create a post
#[utoipa::path(
    post,
    path = "/posts",
    tag = "posts",
    request_body = PostBody,
    responses(
        (status = 201, description = "Post created", body = crate::models::Post),
        (status = 400, description = "Invalid body", body = ErrorResponse)
    )
)]
pub async fn create_post(
    service: web::Data<PostService>,
    body: web::Json<PostBody>,
) -> Result<HttpResponse> {
    body.validate()?;
    let post = service
        .create(&body.title, &body.text, body.image.as_deref())
        .await?;
    Ok(HttpResponse::Created().json(post))
}

/// List all posts
#[utoipa::path(
    get,
    path = "/posts",
    tag = "posts",
    responses((status = 200, description = "All posts, ascending id", body = [crate::models::Post]))
)]
pub async fn find_all_posts(service: web::Data<PostService>) -> Result<HttpResponse> {
    let posts = service.find_all().await?;
    Ok(HttpResponse::Ok().json(posts))
}

/// Get a post by id
#[utoipa::path(
    get,
    path = "/posts/{id}",
    tag = "posts",
    params(("id" = i64, Path, description = "Post id")),
    responses(
        (status = 200, description = "The post", body = crate::models::Post),
        (status = 404, description = "No post with this id", body = ErrorResponse)
    )
)]
pub async fn find_post(service: web::Data<PostService>, id: web::Path<i64>) -> Result<HttpResponse> {
    let post = service.find_one(*id).await?;
    Ok(HttpResponse::Ok().json(post))
}

/// Update a post
#[utoipa::path(
    put,
    path = "/posts/{id}",
    tag = "posts",
    params(("id" = i64, Path, description = "Post id")),
    request_body = PostBody,
    responses(
        (status = 200, description = "Updated post", body = crate::models::Post),
        (status = 404, description = "No post with this id", body = ErrorResponse)
    )
)]
pub async fn update_post(
    service: web::Data<PostService>,
    id: web::Path<i64>,
    body: web::Json<PostBody>,
) -> Result<HttpResponse> {
    body.validate()?;
    let post = service
        .update(*id, &body.title, &body.text, body.image.as_deref())
        .await?;
    Ok(HttpResponse::Ok().json(post))
}

/// Delete a post
#[utoipa::path(
    delete,
    path = "/posts/{id}",
    tag = "posts",
    params(("id" = i64, Path, description = "Post id")),
    responses(
        (status = 200, description = "Post deleted"),
        (status = 403, description = "A publication references this post", body = ErrorResponse),
        (status = 404, description = "No post with this id", body = ErrorResponse)
    )
)]
pub async fn delete_post(
    service: web::Data<PostService>,
    id: web::Path<i64>,
) -> Result<HttpResponse> {
    service.remove(*id).await?;
    Ok(HttpResponse::Ok().finish())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::{http::StatusCode, test, web, App};

    use crate::models::Post;
    use crate::repository::posts::MockPostRepository;
    use crate::repository::publications::MockPublicationLookup;
    use crate::services::PostService;

    fn launch_post(id: i64) -> Post {
        Post {
            id,
            title: "Launch day".to_string(),
            text: "We are live!".to_string(),
            image: None,
        }
    }

    async fn request(
        repo: MockPostRepository,
        lookup: MockPublicationLookup,
        req: test::TestRequest,
    ) -> actix_web::dev::ServiceResponse {
        let service = PostService::new(Arc::new(repo), Arc::new(lookup));
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(service))
                .configure(crate::handlers::configure),
        )
        .await;
        test::call_service(&app, req.to_request()).await
    }

    #[tokio::test]
    async fn post_posts_returns_201_without_an_image_field() {
        let mut repo = MockPostRepository::new();
        repo.expect_create().returning(|_, _, _| Ok(launch_post(1)));

        let req = test::TestRequest::post()
            .uri("/posts")
            .set_json(serde_json::json!({"title": "Launch day", "text": "We are live!"}));
        let resp = request(repo, MockPublicationLookup::new(), req).await;

        assert_eq!(resp.status(), StatusCode::CREATED);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["id"], 1);
        assert!(body.get("image").is_none());
    }

    #[tokio::test]
    async fn post_posts_rejects_an_empty_text_with_400() {
        let req = test::TestRequest::post()
            .uri("/posts")
            .set_json(serde_json::json!({"title": "Launch day", "text": ""}));
        let resp = request(MockPostRepository::new(), MockPublicationLookup::new(), req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn get_missing_post_returns_404() {
        let mut repo = MockPostRepository::new();
        repo.expect_find_by_id().returning(|_| Ok(None));

        let req = test::TestRequest::get().uri("/posts/7");
        let resp = request(repo, MockPublicationLookup::new(), req).await;

        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn delete_referenced_post_returns_403() {
        let mut repo = MockPostRepository::new();
        repo.expect_find_by_id().returning(|_| Ok(Some(launch_post(1))));
        let mut lookup = MockPublicationLookup::new();
        lookup.expect_find_by_post_id().returning(|post_id| {
            Ok(Some(crate::models::Publication {
                id: 9,
                media_id: 4,
                post_id,
                date: "2023-09-09T12:00:00Z".parse().unwrap(),
            }))
        });

        let req = test::TestRequest::delete().uri("/posts/1");
        let resp = request(repo, lookup, req).await;

        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    }
}
