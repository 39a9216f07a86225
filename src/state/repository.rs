//! Storage seam for listings
//!
//! `ListingRepository` abstracts the storage engine behind the store so the
//! in-memory engine can be swapped for a durable one without changing the
//! store contract. `MemoryRepository` is the only engine shipped: a
//! process-lifetime `Vec` behind a lock, initialized empty at startup and
//! discarded at exit.

use crate::state::listing::Listing;
use async_trait::async_trait;
use tokio::sync::RwLock;

/// Storage operations required by the listing store
#[async_trait]
pub trait ListingRepository: Send + Sync {
    /// Append a new listing
    async fn insert(&self, listing: Listing);

    /// Fetch a listing by ID
    async fn get(&self, id: &str) -> Option<Listing>;

    /// Overwrite the listing with the same ID in place.
    /// Returns false when no listing with that ID exists.
    async fn replace(&self, listing: Listing) -> bool;

    /// Remove a listing by ID, returning it if it existed
    async fn remove(&self, id: &str) -> Option<Listing>;

    /// All listings in insertion order
    async fn all(&self) -> Vec<Listing>;
}

/// In-memory storage engine
///
/// Insertion order is preserved; the feed relies on it to break
/// `created_at` ties stably.
#[derive(Debug, Default)]
pub struct MemoryRepository {
    listings: RwLock<Vec<Listing>>,
}

impl MemoryRepository {
    /// Create an empty repository
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ListingRepository for MemoryRepository {
    async fn insert(&self, listing: Listing) {
        self.listings.write().await.push(listing);
    }

    async fn get(&self, id: &str) -> Option<Listing> {
        self.listings
            .read()
            .await
            .iter()
            .find(|listing| listing.id == id)
            .cloned()
    }

    async fn replace(&self, listing: Listing) -> bool {
        let mut listings = self.listings.write().await;
        match listings.iter_mut().find(|existing| existing.id == listing.id) {
            Some(existing) => {
                *existing = listing;
                true
            }
            None => false,
        }
    }

    async fn remove(&self, id: &str) -> Option<Listing> {
        let mut listings = self.listings.write().await;
        let index = listings.iter().position(|listing| listing.id == id)?;
        Some(listings.remove(index))
    }

    async fn all(&self) -> Vec<Listing> {
        self.listings.read().await.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::listing::ListingId;
    use chrono::Utc;

    fn listing_with_id(id: &str) -> Listing {
        Listing {
            id: id.to_string(),
            title: format!("Listing {}", id),
            price: 10.0,
            description: None,
            status: None,
            images: vec!["/uploads/img.jpg".to_string()],
            created_at: Utc::now(),
            edit_token: Listing::generate_token(),
        }
    }

    #[tokio::test]
    async fn test_insert_and_get() {
        let repo = MemoryRepository::new();
        repo.insert(listing_with_id("1")).await;

        let found = repo.get("1").await;
        assert!(found.is_some());
        assert_eq!(found.unwrap().title, "Listing 1");

        assert!(repo.get("missing").await.is_none());
    }

    #[tokio::test]
    async fn test_all_preserves_insertion_order() {
        let repo = MemoryRepository::new();
        repo.insert(listing_with_id("a")).await;
        repo.insert(listing_with_id("b")).await;
        repo.insert(listing_with_id("c")).await;

        let ids: Vec<ListingId> = repo.all().await.into_iter().map(|l| l.id).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[tokio::test]
    async fn test_replace_keeps_position() {
        let repo = MemoryRepository::new();
        repo.insert(listing_with_id("a")).await;
        repo.insert(listing_with_id("b")).await;

        let mut updated = listing_with_id("a");
        updated.title = "Updated".to_string();
        assert!(repo.replace(updated).await);

        let all = repo.all().await;
        assert_eq!(all[0].id, "a");
        assert_eq!(all[0].title, "Updated");
        assert_eq!(all[1].id, "b");
    }

    #[tokio::test]
    async fn test_replace_unknown_id() {
        let repo = MemoryRepository::new();
        assert!(!repo.replace(listing_with_id("ghost")).await);
    }

    #[tokio::test]
    async fn test_remove() {
        let repo = MemoryRepository::new();
        repo.insert(listing_with_id("a")).await;
        repo.insert(listing_with_id("b")).await;

        let removed = repo.remove("a").await;
        assert!(removed.is_some());
        assert_eq!(removed.unwrap().id, "a");
        assert!(repo.get("a").await.is_none());
        assert_eq!(repo.all().await.len(), 1);

        assert!(repo.remove("a").await.is_none());
    }
}
