//! Category tags and their display labels.
//!
//! Categories are an open set: the well-known tags below get friendly
//! labels, anything else is shown as-is and never rejected.

/// Category used when the caller does not pick one.
pub const DEFAULT_CATEGORY: &str = "work";

/// Tags with a known display label, in form order.
pub const WELL_KNOWN_CATEGORIES: &[&str] = &["work", "study", "life"];

/// Returns the display label for `tag`, falling back to the tag itself.
pub fn category_label(tag: &str) -> &str {
    match tag {
        "work" => "Work",
        "study" => "Study",
        "life" => "Life",
        other => other,
    }
}
