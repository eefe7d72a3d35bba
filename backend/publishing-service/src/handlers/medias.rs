/// Media handlers - HTTP endpoints for media account operations
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::error::Result;
use crate::services::MediaService;

use super::ErrorResponse;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct MediaBody {
    #[validate(length(min = 1, message = "title must not be empty"))]
    pub title: String,
    #[validate(length(min = 1, message = "username must not be empty"))]
    pub username: String,
}

/// Register a media account
#[utoipa::path(
    post,
    path = "/medias",
    tag = "medias",
    request_body = MediaBody,
    responses(
        (status = 201, description = "Media registered", body = crate::models::Media),
        (status = 400, description = "Invalid body", body = ErrorResponse),
        (status = 409, description = "(title, username) pair already taken", body = ErrorResponse)
    )
)]
pub async fn create_media(
    service: web::Data<MediaService>,
    body: web::Json<MediaBody>,
) -> Result<HttpResponse> {
    body.validate()?;
    let media = service.create(&body.title, &body.username).await?;
    Ok(HttpResponse::Created().json(media))
}

/// List all media accounts
#[utoipa::path(
    get,
    path = "/medias",
    tag = "medias",
    responses((status = 200, description = "All medias, ascending id", body = [crate::models::Media]))
)]
pub async fn find_all_medias(service: web::Data<MediaService>) -> Result<HttpResponse> {
    let medias = service.find_all().await?;
    Ok(HttpResponse::Ok().json(medias))
}

/// Get a media account by id
#[utoipa::path(
    get,
    path = "/medias/{id}",
    tag = "medias",
    params(("id" = i64, Path, description = "Media id")),
    responses(
        (status = 200, description = "The media", body = crate::models::Media),
        (status = 404, description = "No media with this id", body = ErrorResponse)
    )
)]
pub async fn find_media(
    service: web::Data<MediaService>,
    id: web::Path<i64>,
) -> Result<HttpResponse> {
    let media = service.find_one(*id).await?;
    Ok(HttpResponse::Ok().json(media))
}

/// Update a media account
#[utoipa::path(
    put,
    path = "/medias/{id}",
    tag = "medias",
    params(("id" = i64, Path, description = "Media id")),
    request_body = MediaBody,
    responses(
        (status = 200, description = "Updated media", body = crate::models::Media),
        (status = 404, description = "No media with this id", body = ErrorResponse),
        (status = 409, description = "Another media holds the pair", body = ErrorResponse)
    )
)]
pub async fn update_media(
    service: web::Data<MediaService>,
    id: web::Path<i64>,
    body: web::Json<MediaBody>,
) -> Result<HttpResponse> {
    body.validate()?;
    let media = service.update(*id, &body.title, &body.username).await?;
    Ok(HttpResponse::Ok().json(media))
}

/// Delete a media account
#[utoipa::path(
    delete,
    path = "/medias/{id}",
    tag = "medias",
    params(("id" = i64, Path, description = "Media id")),
    responses(
        (status = 200, description = "Media deleted"),
        (status = 403, description = "A publication references this media", body = ErrorResponse),
        (status = 404, description = "No media with this id", body = ErrorResponse)
    )
)]
pub async fn delete_media(
    service: web::Data<MediaService>,
    id: web::Path<i64>,
) -> Result<HttpResponse> {
    service.remove(*id).await?;
    Ok(HttpResponse::Ok().finish())
}
