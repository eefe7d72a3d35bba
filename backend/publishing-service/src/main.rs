use std::io;
use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{web, App, HttpResponse, HttpServer};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use publishing_service::handlers;
use publishing_service::openapi::ApiDoc;
use publishing_service::repository::{
    self, PgMediaRepository, PgPostRepository, PgPublicationRepository,
};
use publishing_service::services::{MediaService, PostService, PublicationService};
use publishing_service::Config;

async fn health_summary(pool: web::Data<PgPool>) -> HttpResponse {
    match sqlx::query("SELECT 1").fetch_one(pool.get_ref()).await {
        Ok(_) => HttpResponse::Ok().json(serde_json::json!({
            "status": "ok",
            "service": "publishing-service",
            "version": env!("CARGO_PKG_VERSION")
        })),
        Err(e) => HttpResponse::ServiceUnavailable().json(serde_json::json!({
            "status": "unhealthy",
            "error": format!("PostgreSQL connection failed: {}", e),
            "service": "publishing-service"
        })),
    }
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,actix_web=debug,sqlx=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::error!("Configuration loading failed: {:#}", e);
            eprintln!("ERROR: Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    tracing::info!("Starting publishing-service v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Environment: {}", config.app.env);

    let db_pool = match PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .connect(&config.database.url)
        .await
    {
        Ok(pool) => pool,
        Err(e) => {
            tracing::error!("Database pool creation failed: {}", e);
            eprintln!("ERROR: Failed to create database pool: {}", e);
            std::process::exit(1);
        }
    };

    tracing::info!("Connected to database");

    repository::ensure_schema(&db_pool).await.map_err(|e| {
        io::Error::new(
            io::ErrorKind::Other,
            format!("Failed to ensure database schema: {e}"),
        )
    })?;

    // Gateways first, then services. The publication lookup capability the
    // media/post deletion guards consume is the publications gateway itself,
    // and the publication service is built last on top of the other two, so
    // the three-way dependency never needs a partially-constructed service.
    let media_repo = Arc::new(PgMediaRepository::new(db_pool.clone()));
    let post_repo = Arc::new(PgPostRepository::new(db_pool.clone()));
    let publication_repo = Arc::new(PgPublicationRepository::new(db_pool.clone()));

    let media_service = Arc::new(MediaService::new(media_repo, publication_repo.clone()));
    let post_service = Arc::new(PostService::new(post_repo, publication_repo.clone()));
    let publication_service = Arc::new(PublicationService::new(
        publication_repo,
        media_service.clone(),
        post_service.clone(),
    ));

    let bind_address = format!("{}:{}", config.app.host, config.app.port);
    tracing::info!("Starting HTTP server at {}", bind_address);

    let allowed_origins = config.cors.allowed_origins.clone();

    HttpServer::new(move || {
        let mut cors = Cors::default()
            .allowed_methods(vec!["GET", "POST", "PUT", "PATCH", "DELETE"])
            .allow_any_header();
        for origin in allowed_origins.split(',') {
            let origin = origin.trim();
            if origin == "*" {
                cors = cors.allow_any_origin();
            } else {
                cors = cors.allowed_origin(origin);
            }
        }

        App::new()
            .wrap(tracing_actix_web::TracingLogger::default())
            .wrap(cors)
            .app_data(web::Data::new(db_pool.clone()))
            .app_data(web::Data::from(media_service.clone()))
            .app_data(web::Data::from(post_service.clone()))
            .app_data(web::Data::from(publication_service.clone()))
            .route("/health", web::get().to(health_summary))
            .configure(handlers::configure)
            .service(SwaggerUi::new("/docs/{_:.*}").url("/openapi.json", ApiDoc::openapi()))
    })
    .bind(bind_address)?
    .run()
    .await
}
