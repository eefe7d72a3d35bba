/// HTTP request handlers
///
/// Request DTOs live next to the handlers that consume them; the services
/// never see raw request shapes. `configure` builds the full routing tree
/// so main and the handler tests mount the exact same surface.
pub mod medias;
pub mod posts;
pub mod publications;

use actix_web::web;
use serde::Serialize;
use utoipa::ToSchema;

/// Error body produced by `AppError` responses
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub status: u16,
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/medias")
            .service(
                web::resource("")
                    .route(web::post().to(medias::create_media))
                    .route(web::get().to(medias::find_all_medias)),
            )
            .service(
                web::resource("/{id}")
                    .route(web::get().to(medias::find_media))
                    .route(web::put().to(medias::update_media))
                    .route(web::delete().to(medias::delete_media)),
            ),
    )
    .service(
        web::scope("/posts")
            .service(
                web::resource("")
                    .route(web::post().to(posts::create_post))
                    .route(web::get().to(posts::find_all_posts)),
            )
            .service(
                web::resource("/{id}")
                    .route(web::get().to(posts::find_post))
                    .route(web::put().to(posts::update_post))
                    .route(web::delete().to(posts::delete_post)),
            ),
    )
    .service(
        web::scope("/publications")
            .service(
                web::resource("")
                    .route(web::post().to(publications::create_publication))
                    .route(web::get().to(publications::find_all_publications)),
            )
            .service(
                web::resource("/{id}")
                    .route(web::get().to(publications::find_publication))
                    .route(web::patch().to(publications::update_publication))
                    .route(web::delete().to(publications::delete_publication)),
            ),
    );
}
