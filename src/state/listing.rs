// Listing domain model
// Contains the listing record, its input shapes, and feed projections

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a listing
pub type ListingId = String;

/// The status value that makes a listing visible in the feed.
/// Every other status string is opaque pass-through.
pub const PUBLISHED_STATUS: &str = "published";

/// A single classified ad
///
/// `edit_token` is a bearer secret issued at creation; it authorizes mutation
/// and deletion and must never be serialized by read endpoints.
#[derive(Debug, Clone, PartialEq)]
pub struct Listing {
    /// Unique identifier, assigned at creation, immutable
    pub id: ListingId,
    /// Listing title
    pub title: String,
    /// Asking price, coerced from form text at creation
    pub price: f64,
    /// Optional free-text description
    pub description: Option<String>,
    /// Free-text status; only `"published"` affects feed visibility
    pub status: Option<String>,
    /// Public paths of uploaded images; the first entry is the cover
    pub images: Vec<String>,
    /// Creation timestamp, immutable, feed ordering key
    pub created_at: DateTime<Utc>,
    /// Bearer secret required to mutate or delete this listing
    pub edit_token: String,
}

impl Listing {
    /// Generate a new unique ID for a listing
    /// Uses UUID v4 for uniqueness
    pub fn generate_id() -> ListingId {
        Uuid::new_v4().to_string()
    }

    /// Generate a fresh edit token
    pub fn generate_token() -> String {
        Uuid::new_v4().to_string()
    }

    /// Whether this listing is visible in the feed
    pub fn is_published(&self) -> bool {
        self.status.as_deref() == Some(PUBLISHED_STATUS)
    }

    /// The cover image path (first image), if any
    pub fn cover(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }

    /// Project this listing to its feed summary view
    pub fn summary(&self) -> ListingSummary {
        ListingSummary {
            id: self.id.clone(),
            title: self.title.clone(),
            price: self.price,
            cover: self.cover().map(str::to_string),
            description: self.description.clone(),
            created_at: self.created_at,
        }
    }
}

/// Raw creation input, as parsed from the multipart form.
/// All fields are optional here; the store validates presence.
#[derive(Debug, Clone, Default)]
pub struct ListingDraft {
    /// Listing title, required by the store
    pub title: Option<String>,
    /// Price as submitted text, required by the store, coerced to a number
    pub price: Option<String>,
    /// Optional description
    pub description: Option<String>,
    /// Optional status (e.g. "draft", "published")
    pub status: Option<String>,
}

/// Partial update input for a listing.
///
/// Patch semantics are truthy: a field overwrites only when present and
/// non-empty (non-zero for price). A caller cannot clear a field to
/// empty/zero through this type.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListingPatch {
    /// Replacement title, applied when non-empty
    pub title: Option<String>,
    /// Replacement price, applied when non-zero
    pub price: Option<f64>,
    /// Replacement description, applied when non-empty
    pub description: Option<String>,
    /// Replacement status, applied when non-empty
    pub status: Option<String>,
}

/// Summary view of a listing as it appears in the feed
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ListingSummary {
    /// Listing identifier
    pub id: ListingId,
    /// Listing title
    pub title: String,
    /// Asking price
    pub price: f64,
    /// Cover image path (`images[0]`)
    pub cover: Option<String>,
    /// Optional description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

/// One page of the published feed
#[derive(Debug, Clone, Serialize)]
pub struct FeedPage {
    /// Count of all published listings, not just this page
    pub total: usize,
    /// The requested window of summaries, most recent first
    pub items: Vec<ListingSummary>,
}
