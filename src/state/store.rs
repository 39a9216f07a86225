//! Listing store
//!
//! Owns all read/write policy over listings: creation validation, the
//! published feed (filtering, ordering, pagination), and token-gated
//! mutation and deletion. Storage itself is delegated to an injected
//! [`ListingRepository`].

use crate::error::AppError;
use crate::state::listing::{FeedPage, Listing, ListingDraft, ListingPatch};
use crate::state::repository::{ListingRepository, MemoryRepository};
use chrono::Utc;
use std::sync::Arc;
use tracing::info;

/// Feed page size used when the client does not request one (or requests 0)
pub const DEFAULT_FEED_LIMIT: usize = 24;

/// Upper bound on the feed page size
pub const MAX_FEED_LIMIT: usize = 100;

/// The listing store
///
/// Cheap to clone; clones share the same repository.
#[derive(Clone)]
pub struct ListingStore {
    repository: Arc<dyn ListingRepository>,
}

impl ListingStore {
    /// Create a store over the given repository
    pub fn new(repository: Arc<dyn ListingRepository>) -> Self {
        Self { repository }
    }

    /// Create a store over a fresh in-memory repository
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryRepository::new()))
    }

    /// Create a new listing from form input and stored image paths.
    ///
    /// Fails with `Validation` when the title or price is missing/empty,
    /// when the price does not coerce to a non-negative number, or when no
    /// images were uploaded. Returns the full new listing, edit token
    /// included; the caller decides how much of it to expose.
    pub async fn create(
        &self,
        draft: ListingDraft,
        images: Vec<String>,
    ) -> Result<Listing, AppError> {
        let title = draft
            .title
            .filter(|title| !title.is_empty())
            .ok_or_else(|| AppError::Validation("Title and price are required".to_string()))?;
        let price_raw = draft
            .price
            .filter(|price| !price.is_empty())
            .ok_or_else(|| AppError::Validation("Title and price are required".to_string()))?;
        let price = coerce_price(&price_raw)?;

        if images.is_empty() {
            return Err(AppError::Validation(
                "At least one image is required".to_string(),
            ));
        }

        let listing = Listing {
            id: Listing::generate_id(),
            title,
            price,
            description: draft.description,
            status: draft.status,
            images,
            created_at: Utc::now(),
            edit_token: Listing::generate_token(),
        };

        info!(listing_id = %listing.id, "Created listing");
        self.repository.insert(listing.clone()).await;
        Ok(listing)
    }

    /// The published feed: most recent first, windowed by `offset`/`limit`.
    ///
    /// `limit` defaults to [`DEFAULT_FEED_LIMIT`] when absent or 0 and is
    /// clamped to [`MAX_FEED_LIMIT`]; `offset` is clamped to >= 0. `total`
    /// counts every published listing, not just the returned page, so an
    /// out-of-range offset yields an empty page with the correct total.
    pub async fn feed(&self, limit: Option<i64>, offset: Option<i64>) -> FeedPage {
        let limit = match limit.unwrap_or(0) {
            0 => DEFAULT_FEED_LIMIT,
            requested => requested.min(MAX_FEED_LIMIT as i64).max(0) as usize,
        };
        let offset = offset.unwrap_or(0).max(0) as usize;

        let mut published: Vec<Listing> = self
            .repository
            .all()
            .await
            .into_iter()
            .filter(Listing::is_published)
            .collect();
        // Stable sort: equal timestamps keep insertion order.
        published.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        let total = published.len();
        let items = published
            .into_iter()
            .skip(offset)
            .take(limit)
            .map(|listing| listing.summary())
            .collect();

        FeedPage { total, items }
    }

    /// Fetch the full listing record by ID
    pub async fn get(&self, id: &str) -> Result<Listing, AppError> {
        self.repository
            .get(id)
            .await
            .ok_or_else(|| AppError::ListingNotFound(id.to_string()))
    }

    /// Apply a partial patch to a listing, gated by its edit token.
    ///
    /// Each field overwrites only when present and truthy (non-empty text,
    /// non-zero price); absent or falsy fields are left unchanged, so a
    /// caller cannot clear a field through this path.
    pub async fn update(
        &self,
        id: &str,
        token: Option<&str>,
        patch: ListingPatch,
    ) -> Result<Listing, AppError> {
        let mut listing = self.get(id).await?;
        authorize(&listing, token)?;

        if let Some(title) = patch.title.filter(|title| !title.is_empty()) {
            listing.title = title;
        }
        if let Some(price) = patch.price.filter(|price| *price != 0.0) {
            listing.price = price;
        }
        if let Some(description) = patch.description.filter(|d| !d.is_empty()) {
            listing.description = Some(description);
        }
        if let Some(status) = patch.status.filter(|status| !status.is_empty()) {
            listing.status = Some(status);
        }

        self.repository.replace(listing.clone()).await;
        info!(listing_id = %listing.id, "Updated listing");
        Ok(listing)
    }

    /// Permanently remove a listing, gated by its edit token.
    ///
    /// Uploaded image files are left on disk; only the record is removed.
    pub async fn delete(&self, id: &str, token: Option<&str>) -> Result<(), AppError> {
        let listing = self.get(id).await?;
        authorize(&listing, token)?;

        self.repository.remove(id).await;
        info!(listing_id = %id, "Deleted listing");
        Ok(())
    }
}

/// Check a bearer token against a listing's edit token
fn authorize(listing: &Listing, token: Option<&str>) -> Result<(), AppError> {
    if token == Some(listing.edit_token.as_str()) {
        Ok(())
    } else {
        Err(AppError::Forbidden(
            "Edit token does not match".to_string(),
        ))
    }
}

/// Coerce submitted price text to a non-negative number
fn coerce_price(raw: &str) -> Result<f64, AppError> {
    let price: f64 = raw
        .trim()
        .parse()
        .map_err(|_| AppError::Validation(format!("Price is not a number: {}", raw)))?;
    if !price.is_finite() || price < 0.0 {
        return Err(AppError::Validation(format!(
            "Price must be a non-negative number: {}",
            raw
        )));
    }
    Ok(price)
}
