// Application state shared across request handlers

use crate::config::Config;
use crate::services::images::ImageStore;
use crate::state::store::ListingStore;

/// Main application state
///
/// Handed to handlers as `State<Arc<AppState>>`. Interior locking lives in
/// the listing repository, so no outer lock is needed here.
#[derive(Clone)]
pub struct AppState {
    /// The listing store (all read/write policy)
    pub listings: ListingStore,
    /// The uploaded-image store (disk-backed blob collaborator)
    pub images: ImageStore,
}

impl AppState {
    /// Create application state from configuration, with an empty
    /// in-memory listing store
    pub fn new(config: &Config) -> Self {
        Self {
            listings: ListingStore::in_memory(),
            images: ImageStore::new(&config.uploads),
        }
    }
}
