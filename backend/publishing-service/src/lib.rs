/// Publishing Service Library
///
/// REST backend for scheduling posts to social media accounts. Clients
/// register media accounts and posts, then link the two with a publication
/// carrying the date the post should go out on.
///
/// # Modules
///
/// - `handlers`: HTTP request handlers and request DTOs
/// - `models`: Data structures for medias, posts, publications
/// - `services`: Business rules layer (referential and temporal guards)
/// - `repository`: Database access layer
/// - `error`: Error types and handling
/// - `config`: Configuration management
pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod openapi;
pub mod repository;
pub mod services;

pub use config::Config;
pub use error::{AppError, Result};
