//! Property listing and media records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::features::FeatureBag;
use super::profile::Profile;

/// The two kinds of listings on the marketplace
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyType {
    House,
    Land,
}

impl PropertyType {
    /// The stored string form
    pub fn as_str(&self) -> &'static str {
        match self {
            PropertyType::House => "house",
            PropertyType::Land => "land",
        }
    }
}

impl FromStr for PropertyType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "house" => Ok(PropertyType::House),
            "land" => Ok(PropertyType::Land),
            _ => Err(()),
        }
    }
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Listing lifecycle status; listings are soft-retired via this field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyStatus {
    Active,
    Sold,
    Inactive,
}

impl PropertyStatus {
    /// The stored string form
    pub fn as_str(&self) -> &'static str {
        match self {
            PropertyStatus::Active => "active",
            PropertyStatus::Sold => "sold",
            PropertyStatus::Inactive => "inactive",
        }
    }
}

/// Kind of an uploaded media file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Image,
    Video,
}

/// One uploaded image or video belonging to a listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PropertyMedia {
    pub id: Uuid,
    pub property_id: Uuid,
    pub media_type: MediaType,
    pub media_url: String,
    /// Gallery position. Assigned densely at upload time but gaps are not
    /// closed when media is deleted.
    pub display_order: Option<i32>,
    pub created_at: DateTime<Utc>,
}

/// A property listing as fetched from the store, with its media rows and
/// (when the query embeds it) the seller profile.
#[derive(Debug, Clone, Deserialize)]
pub struct Property {
    pub id: Uuid,
    pub seller_id: Uuid,
    pub title: String,
    pub description: String,
    pub property_type: PropertyType,
    pub price_min: i64,
    pub price_max: Option<i64>,
    pub country: String,
    pub state: String,
    pub lga: Option<String>,
    pub city: Option<String>,
    #[serde(default)]
    pub features: FeatureBag,
    pub status: PropertyStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,

    /// Embedded media rows (PostgREST resource embedding)
    #[serde(default)]
    pub property_media: Vec<PropertyMedia>,

    /// Embedded seller profile, present on detail queries only
    #[serde(default)]
    pub profiles: Option<Profile>,
}

impl Property {
    /// The first image of the listing, used as the card cover
    pub fn cover_image(&self) -> Option<&PropertyMedia> {
        self.property_media
            .iter()
            .find(|m| m.media_type == MediaType::Image)
    }
}

/// Insert payload for a new listing
#[derive(Debug, Clone, Serialize)]
pub struct NewProperty {
    pub seller_id: Uuid,
    pub title: String,
    pub description: String,
    pub property_type: PropertyType,
    pub price_min: i64,
    pub price_max: Option<i64>,
    pub country: String,
    pub state: String,
    pub lga: Option<String>,
    pub city: Option<String>,
    pub features: FeatureBag,
    pub status: PropertyStatus,
}

/// Update payload for an existing listing. Scalars and the feature bag go
/// out in one PATCH so the row changes atomically at the store level.
#[derive(Debug, Clone, Serialize)]
pub struct PropertyChanges {
    pub title: String,
    pub description: String,
    pub property_type: PropertyType,
    pub price_min: i64,
    pub price_max: Option<i64>,
    pub state: String,
    pub lga: Option<String>,
    pub city: Option<String>,
    pub status: PropertyStatus,
    pub features: FeatureBag,
}

/// Insert payload for a media row
#[derive(Debug, Clone, Serialize)]
pub struct NewPropertyMedia {
    pub property_id: Uuid,
    pub media_type: MediaType,
    pub media_url: String,
    pub display_order: i32,
}
