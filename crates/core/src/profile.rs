//! Typed profile document.
//!
//! The profile JSON drives route generation: every internal item URL across
//! its link collections names one case-study page.

use crate::FolioError;
use crate::slug::{is_page_url, normalize_slug};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// The whole profile document (`profileData.json`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    /// Author metadata shown in page headers.
    pub general: General,
    /// Link collections (projects, writing, contact, ...).
    #[serde(default)]
    pub all_collections: Vec<Collection>,
}

/// Author metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct General {
    /// Path or URL of the profile photo.
    pub profile_photo: String,
    /// Display name.
    #[serde(default)]
    pub name: Option<String>,
    /// One-line tagline.
    #[serde(default)]
    pub tagline: Option<String>,
}

/// A named group of links.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Collection {
    /// Collection heading.
    #[serde(default)]
    pub name: Option<String>,
    /// Ordered entries.
    #[serde(default)]
    pub items: Vec<CollectionItem>,
}

/// One entry of a collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionItem {
    /// Entry title.
    #[serde(default)]
    pub title: Option<String>,
    /// Either an internal slug or an external link.
    #[serde(default)]
    pub url: Option<String>,
}

impl Profile {
    /// Parses and validates a profile document.
    ///
    /// `origin` names the document in error messages.
    pub fn from_json(json: &str, origin: &str) -> Result<Self, FolioError> {
        let profile: Profile = serde_json::from_str(json)
            .map_err(|err| FolioError::validation(format!("{origin}: {err}")))?;
        if profile.general.profile_photo.trim().is_empty() {
            return Err(FolioError::validation(format!(
                "{origin}: general.profilePhoto must not be empty"
            )));
        }
        Ok(profile)
    }

    /// Every item URL across all collections, in document order.
    pub fn item_urls(&self) -> impl Iterator<Item = &str> {
        self.all_collections
            .iter()
            .flat_map(|collection| &collection.items)
            .filter_map(|item| item.url.as_deref())
    }

    /// Slugs of all case-study pages, deduplicated in document order.
    ///
    /// External URLs (`http*`, `mailto:`, `tel:`) and empty URLs are skipped;
    /// an internal URL that cannot be a safe slug fails validation.
    pub fn page_slugs(&self) -> Result<Vec<String>, FolioError> {
        let mut seen = HashSet::new();
        let mut slugs = Vec::new();
        for url in self.item_urls().filter(|url| is_page_url(url)) {
            let slug = normalize_slug(url)?;
            if seen.insert(slug.clone()) {
                slugs.push(slug);
            } else {
                log::debug!("Slug '{}' listed more than once, keeping first", slug);
            }
        }
        Ok(slugs)
    }
}
