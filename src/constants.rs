//! Static label tables and location data for the listing forms and display

/// House type values with their human-readable labels
pub const HOUSE_TYPES: &[(&str, &str)] = &[
    ("duplex", "Duplex"),
    ("bungalow", "Bungalow"),
    ("flat", "Flat/Apartment"),
    ("terrace", "Terrace"),
    ("detached", "Detached"),
    ("semi_detached", "Semi-Detached"),
    ("townhouse", "Townhouse"),
    ("cottage", "Cottage"),
];

/// Bedroom category values with their human-readable labels
pub const BEDROOM_CATEGORIES: &[(&str, &str)] = &[
    ("1", "1 Bedroom"),
    ("2", "2 Bedrooms"),
    ("3", "3 Bedrooms"),
    ("4", "4 Bedrooms"),
    ("5_plus", "5+ Bedrooms"),
];

/// Land size unit values with label and abbreviation
pub const LAND_SIZE_UNITS: &[(&str, &str, &str)] = &[
    ("sqm", "Square Metres", "sqm"),
    ("sqft", "Square Feet", "sqft"),
    ("acres", "Acres", "ac"),
    ("hectares", "Hectares", "ha"),
    ("plots", "Plots", "plots"),
];

/// Nigerian states, hardcoded for reliability
pub const NIGERIAN_STATES: &[&str] = &[
    "Abia",
    "Adamawa",
    "Akwa Ibom",
    "Anambra",
    "Bauchi",
    "Bayelsa",
    "Benue",
    "Borno",
    "Cross River",
    "Delta",
    "Ebonyi",
    "Edo",
    "Ekiti",
    "Enugu",
    "FCT",
    "Gombe",
    "Imo",
    "Jigawa",
    "Kaduna",
    "Kano",
    "Katsina",
    "Kebbi",
    "Kogi",
    "Kwara",
    "Lagos",
    "Nasarawa",
    "Niger",
    "Ogun",
    "Ondo",
    "Osun",
    "Oyo",
    "Plateau",
    "Rivers",
    "Sokoto",
    "Taraba",
    "Yobe",
    "Zamfara",
];

/// Human-readable label for a stored house type value. Unknown values pass
/// through unchanged rather than erroring.
pub fn house_type_label(value: &str) -> &str {
    HOUSE_TYPES
        .iter()
        .find(|(v, _)| *v == value)
        .map(|(_, label)| *label)
        .unwrap_or(value)
}

/// Human-readable label for a stored bedroom category value
pub fn bedroom_category_label(value: &str) -> &str {
    BEDROOM_CATEGORIES
        .iter()
        .find(|(v, _)| *v == value)
        .map(|(_, label)| *label)
        .unwrap_or(value)
}

/// Abbreviation for a stored land size unit value
pub fn land_size_unit_abbreviation(value: &str) -> &str {
    LAND_SIZE_UNITS
        .iter()
        .find(|(v, _, _)| *v == value)
        .map(|(_, _, abbr)| *abbr)
        .unwrap_or(value)
}
