//! The feature bag describing house- or land-specific characteristics
//!
//! Two representations coexist. [`FeatureBag`] mirrors the stored JSON: every
//! field optional, enum-ish fields kept as plain strings so that legacy rows
//! with unexpected values still decode. [`PropertyFeatures`] is the domain
//! side used when creating or editing a listing: a sum type keyed on the
//! property type, with disjoint field sets per variant.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::property::PropertyType;

/// House type categories offered in the listing forms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HouseType {
    Duplex,
    Bungalow,
    Flat,
    Terrace,
    Detached,
    SemiDetached,
    Townhouse,
    Cottage,
}

impl HouseType {
    /// The stored string form
    pub fn as_str(&self) -> &'static str {
        match self {
            HouseType::Duplex => "duplex",
            HouseType::Bungalow => "bungalow",
            HouseType::Flat => "flat",
            HouseType::Terrace => "terrace",
            HouseType::Detached => "detached",
            HouseType::SemiDetached => "semi_detached",
            HouseType::Townhouse => "townhouse",
            HouseType::Cottage => "cottage",
        }
    }
}

impl FromStr for HouseType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "duplex" => Ok(HouseType::Duplex),
            "bungalow" => Ok(HouseType::Bungalow),
            "flat" => Ok(HouseType::Flat),
            "terrace" => Ok(HouseType::Terrace),
            "detached" => Ok(HouseType::Detached),
            "semi_detached" => Ok(HouseType::SemiDetached),
            "townhouse" => Ok(HouseType::Townhouse),
            "cottage" => Ok(HouseType::Cottage),
            _ => Err(()),
        }
    }
}

impl fmt::Display for HouseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Bedroom count buckets used for search filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BedroomCategory {
    #[serde(rename = "1")]
    One,
    #[serde(rename = "2")]
    Two,
    #[serde(rename = "3")]
    Three,
    #[serde(rename = "4")]
    Four,
    #[serde(rename = "5_plus")]
    FivePlus,
}

impl BedroomCategory {
    /// The stored string form
    pub fn as_str(&self) -> &'static str {
        match self {
            BedroomCategory::One => "1",
            BedroomCategory::Two => "2",
            BedroomCategory::Three => "3",
            BedroomCategory::Four => "4",
            BedroomCategory::FivePlus => "5_plus",
        }
    }
}

impl fmt::Display for BedroomCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Units a land size can be quoted in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LandSizeUnit {
    Sqm,
    Sqft,
    Acres,
    Hectares,
    Plots,
}

impl LandSizeUnit {
    /// The stored string form
    pub fn as_str(&self) -> &'static str {
        match self {
            LandSizeUnit::Sqm => "sqm",
            LandSizeUnit::Sqft => "sqft",
            LandSizeUnit::Acres => "acres",
            LandSizeUnit::Hectares => "hectares",
            LandSizeUnit::Plots => "plots",
        }
    }
}

impl Default for LandSizeUnit {
    fn default() -> Self {
        LandSizeUnit::Sqm
    }
}

impl fmt::Display for LandSizeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The stored feature attribute bag.
///
/// Which fields are populated depends on the owning property's type; nothing
/// in the schema enforces that, so reads tolerate any combination.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct FeatureBag {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub house_types: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub bedroom_category: Option<String>,

    /// Exact bedroom count, kept for rows that predate bedroom categories
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bedrooms: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub bathrooms: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub land_size: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub land_size_unit: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_features: Option<Vec<String>>,
}

/// House-specific listing features
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HouseFeatures {
    pub house_types: Vec<HouseType>,
    pub bedroom_category: Option<BedroomCategory>,
    /// Exact counts, retained for backward compatibility with older listings
    pub bedrooms: Option<u32>,
    pub bathrooms: Option<u32>,
    pub additional_features: Vec<String>,
}

/// Land-specific listing features
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LandFeatures {
    pub land_size: Option<f64>,
    pub land_size_unit: LandSizeUnit,
    pub additional_features: Vec<String>,
}

/// Typed features for a new or edited listing, keyed on property type
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyFeatures {
    House(HouseFeatures),
    Land(LandFeatures),
}

impl PropertyFeatures {
    /// The property type this feature set belongs to
    pub fn property_type(&self) -> PropertyType {
        match self {
            PropertyFeatures::House(_) => PropertyType::House,
            PropertyFeatures::Land(_) => PropertyType::Land,
        }
    }

    /// Convert into the stored bag representation.
    ///
    /// The house branch never populates land fields and vice versa; empty
    /// collections and unset options are left out of the bag entirely. A land
    /// size unit is only written alongside an actual land size.
    pub fn into_bag(self) -> FeatureBag {
        let mut bag = FeatureBag::default();

        match self {
            PropertyFeatures::House(house) => {
                if !house.house_types.is_empty() {
                    bag.house_types = Some(
                        house
                            .house_types
                            .iter()
                            .map(|t| t.as_str().to_string())
                            .collect(),
                    );
                }
                bag.bedroom_category = house.bedroom_category.map(|c| c.as_str().to_string());
                bag.bedrooms = house.bedrooms;
                bag.bathrooms = house.bathrooms;
                if !house.additional_features.is_empty() {
                    bag.additional_features = Some(house.additional_features);
                }
            }
            PropertyFeatures::Land(land) => {
                if let Some(size) = land.land_size {
                    bag.land_size = Some(size);
                    bag.land_size_unit = Some(land.land_size_unit.as_str().to_string());
                }
                if !land.additional_features.is_empty() {
                    bag.additional_features = Some(land.additional_features);
                }
            }
        }

        bag
    }
}

/// Split a comma-separated free-text input into individual features, trimming
/// each token and dropping empty ones.
pub fn split_additional_features(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(|f| f.trim())
        .filter(|f| !f.is_empty())
        .map(|f| f.to_string())
        .collect()
}
