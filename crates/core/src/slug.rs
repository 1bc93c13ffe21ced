//! Case-study slugs derived from profile item URLs.

use crate::FolioError;

/// URL prefixes that point outside the site and never map to a case study.
pub const EXTERNAL_PREFIXES: &[&str] = &["http", "mailto:", "tel:"];

/// Returns true if `url` addresses an internal page rather than an external resource.
///
/// # Examples
///
/// ```
/// use folio_core::slug::is_page_url;
///
/// assert!(is_page_url("case-a"));
/// assert!(!is_page_url("https://external.com"));
/// assert!(!is_page_url("mailto:me@example.com"));
/// assert!(!is_page_url(""));
/// ```
pub fn is_page_url(url: &str) -> bool {
    let url = url.trim();
    !url.is_empty() && !EXTERNAL_PREFIXES.iter().any(|prefix| url.starts_with(prefix))
}

/// Normalizes an internal URL into a slug, rejecting anything that could escape
/// the `writing/` directory.
///
/// Leading and trailing slashes are dropped so `/case-a/` and `case-a` name the
/// same page.
pub fn normalize_slug(url: &str) -> Result<String, FolioError> {
    let slug = url.trim().trim_matches('/');
    if slug.is_empty() {
        return Err(FolioError::validation(format!(
            "item url '{url}' does not name a page"
        )));
    }
    if slug.contains('\\') {
        return Err(FolioError::validation(format!(
            "slug '{slug}' contains a backslash"
        )));
    }
    if slug
        .split('/')
        .any(|segment| segment.is_empty() || segment == "." || segment == "..")
    {
        return Err(FolioError::validation(format!(
            "slug '{slug}' contains an empty or relative path segment"
        )));
    }
    Ok(slug.to_string())
}
