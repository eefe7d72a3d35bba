/// OpenAPI documentation for Publishing Service
use utoipa::OpenApi;

use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Publishing Service API",
        version = "1.0.0",
        description = "Scheduling backend for social media publications. Registers media accounts and posts, then links them with dated publications while guarding referential integrity and already-published records.",
        license(name = "MIT")
    ),
    paths(
        handlers::medias::create_media,
        handlers::medias::find_all_medias,
        handlers::medias::find_media,
        handlers::medias::update_media,
        handlers::medias::delete_media,
        handlers::posts::create_post,
        handlers::posts::find_all_posts,
        handlers::posts::find_post,
        handlers::posts::update_post,
        handlers::posts::delete_post,
        handlers::publications::create_publication,
        handlers::publications::find_all_publications,
        handlers::publications::find_publication,
        handlers::publications::update_publication,
        handlers::publications::delete_publication,
    ),
    components(schemas(
        models::Media,
        models::Post,
        models::Publication,
        handlers::medias::MediaBody,
        handlers::posts::PostBody,
        handlers::publications::PublicationBody,
        handlers::ErrorResponse,
    )),
    tags(
        (name = "medias", description = "Media account registration and management"),
        (name = "posts", description = "Post creation and management"),
        (name = "publications", description = "Scheduling posts to media accounts"),
    )
)]
pub struct ApiDoc;
