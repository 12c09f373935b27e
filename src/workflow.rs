//! Property record workflow: create, update and delete a listing together
//! with its media
//!
//! None of these operations is transactional. Each is a sequence of store and
//! storage calls; a failure partway through leaves whatever already happened
//! in place. The accepted inconsistencies are documented per operation.
//!
//! Every operation takes the caller's access token and resolved user id
//! explicitly; there is no ambient session.

use uuid::Uuid;

use crate::error::Error;
use crate::media::{self, MediaFile};
use crate::model::{
    NewProperty, Property, PropertyChanges, PropertyFeatures, PropertyStatus,
};
use crate::storage::parse_public_url;
use crate::Supabase;

/// Input for creating a listing. The property type is implied by the
/// feature variant and the status is always forced to active.
#[derive(Debug, Clone)]
pub struct PropertyDraft {
    pub title: String,
    pub description: String,
    pub price_min: i64,
    pub price_max: Option<i64>,
    pub country: String,
    pub state: String,
    pub lga: Option<String>,
    pub city: Option<String>,
    pub features: PropertyFeatures,
}

/// Input for editing a listing. Country is fixed at creation time.
#[derive(Debug, Clone)]
pub struct PropertyUpdate {
    pub title: String,
    pub description: String,
    pub price_min: i64,
    pub price_max: Option<i64>,
    pub state: String,
    pub lga: Option<String>,
    pub city: Option<String>,
    pub status: PropertyStatus,
    pub features: PropertyFeatures,
}

impl PropertyUpdate {
    fn into_changes(self) -> PropertyChanges {
        let property_type = self.features.property_type();
        PropertyChanges {
            title: self.title,
            description: self.description,
            property_type,
            price_min: self.price_min,
            price_max: self.price_max,
            state: self.state,
            lga: self.lga,
            city: self.city,
            status: self.status,
            features: self.features.into_bag(),
        }
    }
}

/// Create a listing, then upload its media.
///
/// The row is inserted first with status forced to active. If a media upload
/// fails afterwards the error surfaces to the caller but the row is NOT
/// removed; the listing persists with partial or no media.
pub async fn create_property(
    supabase: &Supabase,
    token: &str,
    seller_id: Uuid,
    draft: PropertyDraft,
    files: Vec<MediaFile>,
) -> Result<Property, Error> {
    let property_type = draft.features.property_type();
    let row = NewProperty {
        seller_id,
        title: draft.title,
        description: draft.description,
        property_type,
        price_min: draft.price_min,
        price_max: draft.price_max,
        country: draft.country,
        state: draft.state,
        lga: draft.lga,
        city: draft.city,
        features: draft.features.into_bag(),
        status: PropertyStatus::Active,
    };

    let property = supabase
        .from("properties")
        .insert(row)
        .auth(token)
        .execute_one::<Property>()
        .await?;

    media::upload_media(supabase, token, property.id, &[], files).await?;

    Ok(property)
}

/// Update a listing's fields, remove the requested media, upload new media.
///
/// Scalars and the feature bag go out in a single PATCH. Storage-object
/// removal is best-effort: a storage failure is logged and the corresponding
/// row is still deleted so the gallery no longer shows the file.
pub async fn update_property(
    supabase: &Supabase,
    token: &str,
    caller_id: Uuid,
    property_id: Uuid,
    update: PropertyUpdate,
    media_to_delete: &[Uuid],
    new_files: Vec<MediaFile>,
) -> Result<(), Error> {
    let existing = fetch_owned(supabase, token, property_id, caller_id).await?;

    supabase
        .from("properties")
        .update(update.into_changes())
        .auth(token)
        .eq("id", property_id)
        .eq("seller_id", caller_id)
        .execute_no_return()
        .await?;

    for media_id in media_to_delete {
        let Some(row) = existing.property_media.iter().find(|m| m.id == *media_id) else {
            continue;
        };

        remove_storage_object(supabase, token, &row.media_url).await;

        supabase
            .from("property_media")
            .delete()
            .auth(token)
            .eq("id", *media_id)
            .execute_no_return()
            .await?;
    }

    let remaining: Vec<_> = existing
        .property_media
        .into_iter()
        .filter(|m| !media_to_delete.contains(&m.id))
        .collect();

    media::upload_media(supabase, token, property_id, &remaining, new_files).await?;

    Ok(())
}

/// Delete a listing: best-effort storage removals, then the media rows, then
/// the property row.
///
/// A failed storage removal is logged and must not stop the remaining
/// removals or the row deletions. A crash between steps can leave orphaned
/// storage objects or media rows.
pub async fn delete_property(
    supabase: &Supabase,
    token: &str,
    caller_id: Uuid,
    property_id: Uuid,
) -> Result<(), Error> {
    let property = fetch_owned(supabase, token, property_id, caller_id).await?;

    for row in &property.property_media {
        remove_storage_object(supabase, token, &row.media_url).await;
    }

    supabase
        .from("property_media")
        .delete()
        .auth(token)
        .eq("property_id", property_id)
        .execute_no_return()
        .await?;

    supabase
        .from("properties")
        .delete()
        .auth(token)
        .eq("id", property_id)
        .eq("seller_id", caller_id)
        .execute_no_return()
        .await?;

    Ok(())
}

/// Load a listing with its media, gated on ownership.
///
/// A listing that does not exist and a listing owned by someone else both
/// come back as [`Error::NotFound`]; the caller cannot tell the two apart.
async fn fetch_owned(
    supabase: &Supabase,
    token: &str,
    property_id: Uuid,
    caller_id: Uuid,
) -> Result<Property, Error> {
    supabase
        .from("properties")
        .select("*,property_media(*)")
        .auth(token)
        .eq("id", property_id)
        .eq("seller_id", caller_id)
        .execute_one::<Property>()
        .await?
        .ok_or(Error::NotFound)
}

async fn remove_storage_object(supabase: &Supabase, token: &str, media_url: &str) {
    let Some((bucket_id, path)) = parse_public_url(media_url) else {
        tracing::warn!(media_url, "media URL does not point at public storage");
        return;
    };

    let storage = supabase.storage();
    let bucket = storage.from(bucket_id);
    if let Err(error) = bucket.remove(token, &[path]).await {
        tracing::warn!(%error, media_url, "failed to remove storage object");
    }
}
