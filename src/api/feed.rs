//! Feed API handler
//!
//! Serves the paginated, published-only, recency-ordered view of listings.

use crate::state::{AppState, FeedPage};
use axum::{
    extract::{Query, State},
    response::Json,
};
use serde::Deserialize;
use std::sync::Arc;

/// Pagination parameters for the feed
#[derive(Debug, Default, Deserialize)]
pub struct FeedQuery {
    /// Page size; defaults to 24, clamped to 100
    pub limit: Option<i64>,
    /// Number of listings to skip; defaults to 0
    pub offset: Option<i64>,
}

/// GET /api/feed - The published feed, most recent first
pub async fn get_feed(
    State(state): State<Arc<AppState>>,
    Query(query): Query<FeedQuery>,
) -> Json<FeedPage> {
    Json(state.listings.feed(query.limit, query.offset).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, ServerConfig, UploadConfig};
    use crate::state::listing::PUBLISHED_STATUS;
    use crate::state::ListingDraft;

    fn create_test_state(dir: &std::path::Path) -> Arc<AppState> {
        let config = Config {
            server: ServerConfig {
                port: 0,
                host: "127.0.0.1".to_string(),
            },
            uploads: UploadConfig {
                dir: dir.to_path_buf(),
                max_file_bytes: 1024,
                max_files: 10,
            },
        };
        Arc::new(AppState::new(&config))
    }

    #[tokio::test]
    async fn test_get_feed_empty() {
        let temp = tempfile::tempdir().unwrap();
        let state = create_test_state(temp.path());

        let response = get_feed(State(state), Query(FeedQuery::default())).await;
        assert_eq!(response.total, 0);
        assert!(response.items.is_empty());
    }

    #[tokio::test]
    async fn test_get_feed_returns_published_only() {
        let temp = tempfile::tempdir().unwrap();
        let state = create_test_state(temp.path());

        let published = ListingDraft {
            title: Some("Visible".to_string()),
            price: Some("10".to_string()),
            description: None,
            status: Some(PUBLISHED_STATUS.to_string()),
        };
        let draft = ListingDraft {
            title: Some("Hidden".to_string()),
            price: Some("10".to_string()),
            description: None,
            status: Some("draft".to_string()),
        };
        let images = vec!["/uploads/x.jpg".to_string()];
        state.listings.create(published, images.clone()).await.unwrap();
        state.listings.create(draft, images).await.unwrap();

        let response = get_feed(State(state), Query(FeedQuery::default())).await;
        assert_eq!(response.total, 1);
        assert_eq!(response.items[0].title, "Visible");
        assert_eq!(response.items[0].cover.as_deref(), Some("/uploads/x.jpg"));
    }
}
