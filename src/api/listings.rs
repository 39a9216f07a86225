//! Listing API handlers
//!
//! Contains HTTP request handlers for listing CRUD operations. Creation
//! accepts multipart form data (text fields plus up to ten image files);
//! mutation and deletion are gated by the edit token issued at creation.

use crate::error::AppError;
use crate::services::images::StoredImage;
use crate::state::{AppState, Listing, ListingDraft, ListingId, ListingPatch};
use axum::{
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    response::Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::warn;

/// Full listing view returned by read endpoints.
///
/// Deliberately omits the edit token: the token is only ever disclosed in
/// the creation response's edit URL.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingResponse {
    /// Listing identifier
    pub id: ListingId,
    /// Listing title
    pub title: String,
    /// Asking price
    pub price: f64,
    /// Optional description
    pub description: Option<String>,
    /// Free-text status
    pub status: Option<String>,
    /// Public image paths, cover first
    pub images: Vec<String>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl From<&Listing> for ListingResponse {
    fn from(listing: &Listing) -> Self {
        Self {
            id: listing.id.clone(),
            title: listing.title.clone(),
            price: listing.price,
            description: listing.description.clone(),
            status: listing.status.clone(),
            images: listing.images.clone(),
            created_at: listing.created_at,
        }
    }
}

/// Response to a successful creation
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateListingResponse {
    /// Always true on success
    pub ok: bool,
    /// The new listing's identifier
    pub id: ListingId,
    /// Relative edit-page URL carrying the id and edit token
    pub edit_url: String,
}

/// Response to a successful update
#[derive(Debug, Serialize)]
pub struct UpdateListingResponse {
    /// Always true on success
    pub ok: bool,
    /// The listing after the patch was applied
    pub item: ListingResponse,
}

/// Response to a successful deletion
#[derive(Debug, Serialize)]
pub struct DeleteListingResponse {
    /// Always true on success
    pub ok: bool,
}

/// Edit token supplied via the query string
#[derive(Debug, Default, Deserialize)]
pub struct TokenQuery {
    /// The bearer edit token
    pub token: Option<String>,
}

/// POST /api/listings - Create a listing from multipart form data
///
/// Text fields: `title`, `price`, `description`, `status`. File field:
/// `images` (repeatable). Files are persisted as they stream in; if the
/// listing itself fails validation afterwards, the stored files are
/// discarded again.
pub async fn create_listing(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<CreateListingResponse>), AppError> {
    let mut draft = ListingDraft::default();
    let mut stored: Vec<StoredImage> = Vec::new();

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => {
                state.images.discard(&stored).await;
                return Err(AppError::BadMultipart(e.to_string()));
            }
        };

        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "title" | "price" | "description" | "status" => {
                let text = match field.text().await {
                    Ok(text) => text,
                    Err(e) => {
                        state.images.discard(&stored).await;
                        return Err(AppError::BadMultipart(e.to_string()));
                    }
                };
                match name.as_str() {
                    "title" => draft.title = Some(text),
                    "price" => draft.price = Some(text),
                    "description" => draft.description = Some(text),
                    _ => draft.status = Some(text),
                }
            }
            "images" => {
                if stored.len() >= state.images.max_files() {
                    state.images.discard(&stored).await;
                    return Err(AppError::UploadRejected(format!(
                        "At most {} images are accepted",
                        state.images.max_files()
                    )));
                }

                let file_name = field.file_name().map(|s| s.to_string());
                let content_type = field.content_type().map(|s| s.to_string());
                let data = match field.bytes().await {
                    Ok(data) => data,
                    Err(e) => {
                        state.images.discard(&stored).await;
                        return Err(AppError::BadMultipart(e.to_string()));
                    }
                };

                match state
                    .images
                    .store(file_name.as_deref(), content_type.as_deref(), &data)
                    .await
                {
                    Ok(image) => stored.push(image),
                    Err(e) => {
                        state.images.discard(&stored).await;
                        return Err(e);
                    }
                }
            }
            other => {
                warn!("Unknown multipart field: {}", other);
            }
        }
    }

    let images: Vec<String> = stored
        .iter()
        .map(|image| image.public_path.clone())
        .collect();

    match state.listings.create(draft, images).await {
        Ok(listing) => {
            let edit_url = format!(
                "/edit.html?id={}&token={}",
                listing.id, listing.edit_token
            );
            Ok((
                StatusCode::CREATED,
                Json(CreateListingResponse {
                    ok: true,
                    id: listing.id,
                    edit_url,
                }),
            ))
        }
        Err(e) => {
            // The listing was never created, so its uploads are discarded
            state.images.discard(&stored).await;
            Err(e)
        }
    }
}

/// GET /api/listings/:id - Fetch a single listing
pub async fn get_listing(
    State(state): State<Arc<AppState>>,
    Path(id): Path<ListingId>,
) -> Result<Json<ListingResponse>, AppError> {
    let listing = state.listings.get(&id).await?;
    Ok(Json(ListingResponse::from(&listing)))
}

/// PATCH /api/listings/:id - Apply a partial update, gated by the edit token
pub async fn update_listing(
    State(state): State<Arc<AppState>>,
    Path(id): Path<ListingId>,
    Query(query): Query<TokenQuery>,
    Json(patch): Json<ListingPatch>,
) -> Result<Json<UpdateListingResponse>, AppError> {
    let listing = state
        .listings
        .update(&id, query.token.as_deref(), patch)
        .await?;

    Ok(Json(UpdateListingResponse {
        ok: true,
        item: ListingResponse::from(&listing),
    }))
}

/// DELETE /api/listings/:id - Delete a listing, gated by the edit token.
/// The listing's image files stay on disk.
pub async fn delete_listing(
    State(state): State<Arc<AppState>>,
    Path(id): Path<ListingId>,
    Query(query): Query<TokenQuery>,
) -> Result<Json<DeleteListingResponse>, AppError> {
    state.listings.delete(&id, query.token.as_deref()).await?;
    Ok(Json(DeleteListingResponse { ok: true }))
}
