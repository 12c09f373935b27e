//! Listing presentation helpers
//!
//! Pure derivation functions with no side effects; everything here works on
//! already-fetched data.

use uuid::Uuid;

/// Currency prefix for all displayed prices
pub const CURRENCY: &str = "₦";

/// Format a single price with thousands separators, e.g. `₦5,000,000`
pub fn format_price(price: i64) -> String {
    format!("{}{}", CURRENCY, with_thousands_separators(price))
}

/// Format a price or price range.
///
/// A missing maximum, a zero maximum or a maximum equal to the minimum all
/// collapse to a single amount; otherwise both bounds are shown.
pub fn format_price_range(price_min: i64, price_max: Option<i64>) -> String {
    match price_max {
        None => format_price(price_min),
        Some(max) if max == 0 || max == price_min => format_price(price_min),
        Some(max) => format!("{} - {}", format_price(price_min), format_price(max)),
    }
}

fn with_thousands_separators(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);

    let first_group = digits.len() % 3;
    let first_group = if first_group == 0 { 3 } else { first_group };
    grouped.push_str(&digits[..first_group]);
    for chunk in digits[first_group..].as_bytes().chunks(3) {
        grouped.push(',');
        grouped.push_str(std::str::from_utf8(chunk).unwrap_or(""));
    }

    if value < 0 {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

/// Format a location as `city, state` or `city, state, country`
pub fn format_location(city: &str, state: &str, country: Option<&str>) -> String {
    match country {
        Some(country) => format!("{}, {}, {}", city, state, country),
        None => format!("{}, {}", city, state),
    }
}

/// Truncate text to at most `max_length` characters, trimming trailing
/// whitespace and appending an ellipsis, only when the source is longer.
pub fn truncate_text(text: &str, max_length: usize) -> String {
    if text.chars().count() <= max_length {
        return text.to_string();
    }

    let cut: String = text.chars().take(max_length).collect();
    format!("{}…", cut.trim_end())
}

/// Format a land size with its unit, e.g. `500 sqm`. Whole sizes drop the
/// fractional part.
pub fn format_land_size(size: f64, unit: &str) -> String {
    if size.fract() == 0.0 {
        format!("{} {}", size as i64, unit)
    } else {
        format!("{} {}", size, unit)
    }
}

/// Build a WhatsApp deep link for contacting a seller about a listing.
///
/// Strips every non-digit character from the stored number and URL-encodes a
/// templated message. The number is not validated; a malformed number simply
/// produces a broken link.
pub fn whatsapp_link(phone_number: &str, property_title: &str, property_id: Uuid) -> String {
    let clean_number: String = phone_number.chars().filter(|c| c.is_ascii_digit()).collect();

    let message = format!(
        "Hi, I'm interested in your property: {} (ID: {})",
        property_title, property_id
    );

    format!(
        "https://wa.me/{}?text={}",
        clean_number,
        urlencoding::encode(&message)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_price_with_separators() {
        assert_eq!(format_price(5_000_000), "₦5,000,000");
        assert_eq!(format_price(950), "₦950");
        assert_eq!(format_price(1_000), "₦1,000");
        assert_eq!(format_price(123_456_789), "₦123,456,789");
    }

    #[test]
    fn missing_or_equal_max_collapses_to_single_price() {
        assert_eq!(format_price_range(5_000_000, None), "₦5,000,000");
        assert_eq!(format_price_range(5_000_000, Some(5_000_000)), "₦5,000,000");
        assert_eq!(format_price_range(5_000_000, Some(0)), "₦5,000,000");
    }

    #[test]
    fn distinct_max_renders_a_range() {
        assert_eq!(
            format_price_range(50_000_000, Some(65_000_000)),
            "₦50,000,000 - ₦65,000,000"
        );
    }

    #[test]
    fn formats_location_with_and_without_country() {
        assert_eq!(format_location("Lekki", "Lagos", None), "Lekki, Lagos");
        assert_eq!(
            format_location("Lekki", "Lagos", Some("Nigeria")),
            "Lekki, Lagos, Nigeria"
        );
    }

    #[test]
    fn short_text_is_untouched() {
        assert_eq!(truncate_text("short", 10), "short");
        assert_eq!(truncate_text("exactly10!", 10), "exactly10!");
    }

    #[test]
    fn long_text_is_cut_trimmed_and_ellipsized() {
        let result = truncate_text("A spacious duplex", 10);
        assert_eq!(result, "A spacious…");
        assert!(result.chars().count() <= 11);
        assert!(result.ends_with('…'));
    }

    #[test]
    fn truncation_trims_trailing_whitespace_before_ellipsis() {
        // Cutting "word and more" at 5 lands on "word " - the space goes.
        assert_eq!(truncate_text("word and more", 5), "word…");
    }

    #[test]
    fn formats_land_size() {
        assert_eq!(format_land_size(500.0, "sqm"), "500 sqm");
        assert_eq!(format_land_size(2.5, "acres"), "2.5 acres");
    }

    #[test]
    fn whatsapp_link_strips_non_digits_and_encodes_message() {
        let id = Uuid::nil();
        let link = whatsapp_link("+234 (0) 801-234-5678", "4 Bedroom Duplex", id);
        assert!(link.starts_with("https://wa.me/23408012345678?text="));
        assert!(link.contains("4%20Bedroom%20Duplex"));
        assert!(link.contains(&id.to_string()));
    }

    #[test]
    fn whatsapp_link_with_garbage_number_is_simply_broken() {
        let link = whatsapp_link("not a number", "Plot", Uuid::nil());
        assert!(link.starts_with("https://wa.me/?text="));
    }
}
