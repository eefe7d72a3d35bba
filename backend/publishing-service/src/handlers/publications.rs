/// Publication handlers - HTTP endpoints for scheduling operations
use actix_web::{web, HttpResponse};
use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::error::{AppError, Result};
use crate::services::PublicationService;

use super::ErrorResponse;

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PublicationBody {
    #[validate(range(min = 1, message = "mediaId must be a positive integer"))]
    pub media_id: i64,
    #[validate(range(min = 1, message = "postId must be a positive integer"))]
    pub post_id: i64,
    /// ISO-8601 timestamp the post should go out on
    pub date: DateTime<Utc>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct FindPublicationsQuery {
    /// true: only already-published records, false: only pending ones
    pub published: Option<bool>,
    /// ISO-8601 date or timestamp; keeps only records dated strictly after it
    pub after: Option<String>,
}

/// Schedule a post on a media account
#[utoipa::path(
    post,
    path = "/publications",
    tag = "publications",
    request_body = PublicationBody,
    responses(
        (status = 201, description = "Publication scheduled", body = crate::models::Publication),
        (status = 400, description = "Invalid body", body = ErrorResponse),
        (status = 404, description = "Media or post does not exist", body = ErrorResponse)
    )
)]
pub async fn create_publication(
    service: web::Data<PublicationService>,
    body: web::Json<PublicationBody>,
) -> Result<HttpResponse> {
    body.validate()?;
    let publication = service
        .create(body.media_id, body.post_id, body.date)
        .await?;
    Ok(HttpResponse::Created().json(publication))
}

/// List publications, optionally filtered by published state and date
#[utoipa::path(
    get,
    path = "/publications",
    tag = "publications",
    params(FindPublicationsQuery),
    responses(
        (status = 200, description = "Matching publications, ascending id", body = [crate::models::Publication]),
        (status = 400, description = "Malformed query", body = ErrorResponse)
    )
)]
pub async fn find_all_publications(
    service: web::Data<PublicationService>,
    query: web::Query<FindPublicationsQuery>,
) -> Result<HttpResponse> {
    let after = query.after.as_deref().map(parse_after).transpose()?;
    let publications = service.find_all(query.published, after).await?;
    Ok(HttpResponse::Ok().json(publications))
}

/// Get a publication by id
#[utoipa::path(
    get,
    path = "/publications/{id}",
    tag = "publications",
    params(("id" = i64, Path, description = "Publication id")),
    responses(
        (status = 200, description = "The publication", body = crate::models::Publication),
        (status = 404, description = "No publication with this id", body = ErrorResponse)
    )
)]
pub async fn find_publication(
    service: web::Data<PublicationService>,
    id: web::Path<i64>,
) -> Result<HttpResponse> {
    let publication = service.find_one(*id).await?;
    Ok(HttpResponse::Ok().json(publication))
}

/// Reschedule or repoint a publication
#[utoipa::path(
    patch,
    path = "/publications/{id}",
    tag = "publications",
    params(("id" = i64, Path, description = "Publication id")),
    request_body = PublicationBody,
    responses(
        (status = 200, description = "Updated publication", body = crate::models::Publication),
        (status = 403, description = "Publication date has already passed", body = ErrorResponse),
        (status = 404, description = "Publication, media or post does not exist", body = ErrorResponse)
    )
)]
pub async fn update_publication(
    service: web::Data<PublicationService>,
    id: web::Path<i64>,
    body: web::Json<PublicationBody>,
) -> Result<HttpResponse> {
    body.validate()?;
    let publication = service
        .update(*id, body.media_id, body.post_id, body.date)
        .await?;
    Ok(HttpResponse::Ok().json(publication))
}

/// Delete a publication
#[utoipa::path(
    delete,
    path = "/publications/{id}",
    tag = "publications",
    params(("id" = i64, Path, description = "Publication id")),
    responses(
        (status = 200, description = "Publication deleted"),
        (status = 404, description = "No publication with this id", body = ErrorResponse)
    )
)]
pub async fn delete_publication(
    service: web::Data<PublicationService>,
    id: web::Path<i64>,
) -> Result<HttpResponse> {
    service.remove(*id).await?;
    Ok(HttpResponse::Ok().finish())
}

/// Accepts a date-only value ("2022-06-06") or a full RFC 3339 timestamp;
/// date-only values mean midnight UTC.
fn parse_after(raw: &str) -> Result<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }
    raw.parse::<NaiveDate>()
        .map(|d| Utc.from_utc_datetime(&d.and_time(NaiveTime::MIN)))
        .map_err(|_| AppError::Validation(format!("after must be an ISO-8601 date, got \"{raw}\"")))
}
