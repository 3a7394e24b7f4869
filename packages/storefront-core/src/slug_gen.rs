//! Slug derivation for catalog entries.
//!
//! A product created without an explicit slug gets one derived from its
//! title. On update the stored slug is only regenerated when it still equals
//! the derivation of the stored title, i.e. it was never hand-set.

pub fn generate(text: &str) -> String {
    slug::slugify(text)
}

/// Resolve the slug an update should persist.
///
/// An explicitly requested slug wins verbatim. Otherwise a new title triggers
/// regeneration only for auto-derived slugs; hand-set slugs are kept as-is.
pub fn slug_for_update(
    requested_slug: Option<&str>,
    requested_title: Option<&str>,
    current_title: &str,
    current_slug: &str,
) -> String {
    if let Some(slug) = requested_slug {
        return slug.to_string();
    }
    if let Some(title) = requested_title {
        if generate(current_title) == current_slug {
            return generate(title);
        }
    }
    current_slug.to_string()
}
