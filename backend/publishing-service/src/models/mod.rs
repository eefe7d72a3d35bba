/// Domain records for medias, posts, and publications.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// A social media account posts can be published to.
///
/// No two medias share the same (title, username) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Media {
    pub id: i64,
    /// Network name, e.g. "Instagram"
    pub title: String,
    pub username: String,
}

/// Content to be published. Carries no uniqueness constraint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Post {
    pub id: i64,
    pub title: String,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// Schedules a post on a media account at a given date.
///
/// `media_id` and `post_id` are weak references validated by the service
/// layer, not by database constraints. A publication is considered
/// published once `date` is at or before the current time; that state is
/// derived, never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Publication {
    pub id: i64,
    pub media_id: i64,
    pub post_id: i64,
    pub date: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn publication_serializes_camel_case() {
        let publication = Publication {
            id: 1,
            media_id: 2,
            post_id: 3,
            date: "2023-09-09T12:00:00Z".parse().unwrap(),
        };

        let json = serde_json::to_value(&publication).unwrap();
        assert_eq!(json["mediaId"], 2);
        assert_eq!(json["postId"], 3);
        assert_eq!(json["date"], "2023-09-09T12:00:00Z");
    }

    #[test]
    fn post_omits_absent_image() {
        let post = Post {
            id: 1,
            title: "launch".to_string(),
            text: "we are live".to_string(),
            image: None,
        };

        let json = serde_json::to_value(&post).unwrap();
        assert!(json.get("image").is_none());
    }
}
