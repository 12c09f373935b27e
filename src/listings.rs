//! Listing search: filter construction and fail-open execution
//!
//! All supplied filters AND together; an absent or empty filter applies no
//! constraint. The public search never raises to the caller: a store failure
//! is logged and an empty page is rendered instead.

use uuid::Uuid;

use crate::error::Error;
use crate::model::{BedroomCategory, HouseType, LandSizeUnit, Property, PropertyType};
use crate::postgrest::SelectBuilder;
use crate::Supabase;

/// Columns fetched for listing cards: every property field plus its media
pub const LISTING_COLUMNS: &str = "*,property_media(*)";

/// Columns fetched for the detail page, with the seller profile embedded
pub const LISTING_DETAIL_COLUMNS: &str = "*,property_media(*),profiles(*)";

/// Result ordering for the listing search
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    /// Newest listings first, the default
    #[default]
    Newest,
    /// Oldest listings first
    Oldest,
    /// Cheapest first, listings without a minimum price last
    PriceAscending,
    /// Most expensive first, listings without a maximum price last
    PriceDescending,
}

/// Optional search parameters supplied by the buyer-facing search form
#[derive(Debug, Clone, Default)]
pub struct ListingFilters {
    /// Free-text query matched against title, description and location fields
    pub query: Option<String>,
    pub property_type: Option<PropertyType>,
    pub state: Option<String>,
    /// Substring match on the local government area
    pub lga: Option<String>,
    /// Substring match on the city
    pub city: Option<String>,
    /// A listing matches when its own house types intersect this set
    pub house_types: Vec<HouseType>,
    pub bedroom_category: Option<BedroomCategory>,
    pub land_size_unit: Option<LandSizeUnit>,
    pub price_min: Option<i64>,
    pub price_max: Option<i64>,
    pub sort: SortKey,
}

/// Build the listing search query. Only `status = active` rows are ever
/// returned; everything else is conditional on the supplied filters.
pub fn build_search(supabase: &Supabase, filters: &ListingFilters) -> SelectBuilder {
    let mut query = supabase
        .from("properties")
        .select(LISTING_COLUMNS)
        .eq("status", "active");

    if let Some(text) = non_empty(filters.query.as_deref()) {
        let needle = text.to_lowercase();
        query = query.or(&format!(
            "title.ilike.%{q}%,description.ilike.%{q}%,state.ilike.%{q}%,lga.ilike.%{q}%,city.ilike.%{q}%",
            q = needle
        ));
    }

    if let Some(property_type) = filters.property_type {
        query = query.eq("property_type", property_type);
    }

    if let Some(state) = non_empty(filters.state.as_deref()) {
        query = query.eq("state", state);
    }

    if let Some(lga) = non_empty(filters.lga.as_deref()) {
        query = query.ilike("lga", &format!("%{}%", lga));
    }

    if let Some(city) = non_empty(filters.city.as_deref()) {
        query = query.ilike("city", &format!("%{}%", city));
    }

    if !filters.house_types.is_empty() {
        // ANY-of: a listing matches when its house_types array contains at
        // least one of the requested values.
        let conditions = filters
            .house_types
            .iter()
            .map(|t| format!("features->house_types.cs.[\"{}\"]", t.as_str()))
            .collect::<Vec<_>>()
            .join(",");
        query = query.or(&conditions);
    }

    if let Some(category) = filters.bedroom_category {
        query = query.eq("features->>bedroom_category", category.as_str());
    }

    if let Some(unit) = filters.land_size_unit {
        query = query.eq("features->>land_size_unit", unit.as_str());
    }

    // A zero bound means "not set" on the search form.
    if let Some(min) = filters.price_min.filter(|v| *v > 0) {
        query = query.gte("price_min", min);
    }

    if let Some(max) = filters.price_max.filter(|v| *v > 0) {
        query = query.lte("price_max", max);
    }

    match filters.sort {
        SortKey::Newest => query.order("created_at", false, false),
        SortKey::Oldest => query.order("created_at", true, false),
        SortKey::PriceAscending => query.order("price_min", true, true),
        SortKey::PriceDescending => query.order("price_max", false, true),
    }
}

/// Run the listing search.
///
/// Fail-open: a store failure is logged and an empty result is returned so
/// the search page still renders.
pub async fn search(supabase: &Supabase, filters: &ListingFilters) -> Vec<Property> {
    match build_search(supabase, filters).execute::<Property>().await {
        Ok(listings) => listings,
        Err(error) => {
            tracing::error!(%error, "listing search failed");
            Vec::new()
        }
    }
}

/// Load one listing with its media and seller profile for the detail page.
/// Returns `Ok(None)` when no such listing exists.
pub async fn fetch_listing(supabase: &Supabase, id: Uuid) -> Result<Option<Property>, Error> {
    supabase
        .from("properties")
        .select(LISTING_DETAIL_COLUMNS)
        .eq("id", id)
        .execute_one::<Property>()
        .await
}

/// The caller's own listings, newest first, regardless of status. Used by
/// the seller dashboard; errors surface so the dashboard can show them.
pub async fn seller_listings(
    supabase: &Supabase,
    token: &str,
    seller_id: Uuid,
) -> Result<Vec<Property>, Error> {
    supabase
        .from("properties")
        .select(LISTING_COLUMNS)
        .auth(token)
        .eq("seller_id", seller_id)
        .order("created_at", false, false)
        .execute::<Property>()
        .await
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
