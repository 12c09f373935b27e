//! Media upload pipeline: validation, staging and sequential upload
//!
//! Files are validated before any network call, then uploaded one at a time.
//! The first failure aborts the remainder of the batch; files uploaded before
//! the failure are not rolled back, so an orphaned object or an unlinked row
//! can remain.

use chrono::Utc;
use uuid::Uuid;

use crate::error::Error;
use crate::model::{MediaType, NewPropertyMedia, PropertyMedia};
use crate::storage::{FileOptions, IMAGES_BUCKET, VIDEOS_BUCKET};
use crate::Supabase;

/// Maximum number of media files per property, existing plus new
pub const MAX_MEDIA_FILES: usize = 10;

/// Maximum size of a single media file in bytes (10 MiB)
pub const MAX_FILE_SIZE_BYTES: usize = 10 * 1024 * 1024;

/// A locally selected file waiting to be uploaded
#[derive(Debug, Clone)]
pub struct MediaFile {
    /// Original file name, used to preserve the extension in the storage path
    pub file_name: String,

    /// MIME type as reported by the client
    pub content_type: String,

    /// Raw file contents
    pub bytes: Vec<u8>,
}

/// Outcome of staging a batch of files for upload
#[derive(Debug, Default)]
pub struct StagedBatch {
    /// Files that passed validation, in their original order
    pub accepted: Vec<MediaFile>,

    /// User-visible messages for the files that were excluded
    pub rejected: Vec<String>,
}

/// Validate a batch of incoming files against the per-property limits.
///
/// Exceeding the total file cap rejects the whole batch with an error and
/// stages nothing. Individual files with a disallowed type or an oversized
/// payload are excluded with a message while the rest stay staged.
pub fn stage_files(existing_count: usize, incoming: Vec<MediaFile>) -> Result<StagedBatch, Error> {
    if existing_count + incoming.len() > MAX_MEDIA_FILES {
        return Err(Error::validation(format!(
            "You can upload a maximum of {} files per property",
            MAX_MEDIA_FILES
        )));
    }

    let mut batch = StagedBatch::default();

    for file in incoming {
        if media_type_of(&file.content_type).is_none() {
            batch
                .rejected
                .push(format!("{} is not an image or video", file.file_name));
            continue;
        }

        if file.bytes.len() > MAX_FILE_SIZE_BYTES {
            batch
                .rejected
                .push(format!("{} exceeds the 10 MB size limit", file.file_name));
            continue;
        }

        batch.accepted.push(file);
    }

    Ok(batch)
}

/// The media kind of a MIME type, or `None` when it is neither image nor video
pub fn media_type_of(content_type: &str) -> Option<MediaType> {
    if content_type.starts_with("image/") {
        Some(MediaType::Image)
    } else if content_type.starts_with("video/") {
        Some(MediaType::Video)
    } else {
        None
    }
}

/// Display order for the next uploaded file: one past the highest existing
/// order, or zero when the property has no media yet.
pub fn next_display_order(existing: &[PropertyMedia]) -> i32 {
    existing
        .iter()
        .filter_map(|m| m.display_order)
        .max()
        .map(|max| max + 1)
        .unwrap_or(0)
}

/// Upload staged files for a property, one at a time.
///
/// Each file is written to the bucket for its kind under a path derived from
/// the property id, a batch timestamp and the file's position, then linked
/// with a `property_media` row whose display order appends it after the
/// existing media. The first failing step returns its error and leaves the
/// remaining files unprocessed.
pub async fn upload_media(
    supabase: &Supabase,
    token: &str,
    property_id: Uuid,
    existing: &[PropertyMedia],
    files: Vec<MediaFile>,
) -> Result<(), Error> {
    let base_order = next_display_order(existing);
    let batch_ts = Utc::now().timestamp_millis();

    for (index, file) in files.into_iter().enumerate() {
        let media_type = media_type_of(&file.content_type).ok_or_else(|| {
            Error::validation(format!("{} is not an image or video", file.file_name))
        })?;

        let bucket_id = match media_type {
            MediaType::Image => IMAGES_BUCKET,
            MediaType::Video => VIDEOS_BUCKET,
        };

        let path = format!(
            "{}/{}-{}.{}",
            property_id,
            batch_ts,
            index,
            extension_of(&file.file_name)
        );

        let storage = supabase.storage();
        let bucket = storage.from(bucket_id);
        let options = FileOptions::default().with_content_type(&file.content_type);
        bucket
            .upload(token, &path, file.bytes, options)
            .await?;

        let media_url = bucket.get_public_url(&path);

        supabase
            .from("property_media")
            .insert(NewPropertyMedia {
                property_id,
                media_type,
                media_url,
                display_order: base_order + index as i32,
            })
            .auth(token)
            .execute_no_return()
            .await?;
    }

    Ok(())
}

fn extension_of(file_name: &str) -> &str {
    match file_name.rsplit_once('.') {
        Some((_, ext)) if !ext.is_empty() => ext,
        _ => "bin",
    }
}
