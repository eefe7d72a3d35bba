/// Business rules layer
///
/// Everything the HTTP surface is not allowed to decide lives here: the
/// duplicate-media policy, the publication reference checks, the deletion
/// guards, and the temporal guard on published publications. Services talk
/// to storage only through the repository traits.
pub mod medias;
pub mod posts;
pub mod publications;

pub use medias::MediaService;
pub use posts::PostService;
pub use publications::PublicationService;
