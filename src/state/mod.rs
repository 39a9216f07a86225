// State management module
// Handles the listing domain model, the storage seam, and store policy

pub mod app_state;
pub mod listing;
pub mod repository;
pub mod store;

pub use app_state::AppState;
pub use listing::{FeedPage, Listing, ListingDraft, ListingId, ListingPatch, ListingSummary};
pub use repository::{ListingRepository, MemoryRepository};
pub use store::ListingStore;
