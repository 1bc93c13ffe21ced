//! Content loading.
//!
//! The profile is read once when the store opens and shared read-only by
//! every page render; case-study documents are read on demand.

use crate::config::SiteConfig;
use folio_core::{FolioError, Profile};
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::Arc;

/// Raw case-study document plus the profile it renders against.
#[derive(Debug, Clone)]
pub struct CaseStudySource {
    /// Page slug.
    pub slug: String,
    /// File the text came from.
    pub path: PathBuf,
    /// Full document text, frontmatter included.
    pub text: String,
    /// Shared profile document.
    pub profile: Arc<Profile>,
}

/// Read-only view of the content directory.
#[derive(Debug, Clone)]
pub struct ContentStore {
    config: SiteConfig,
    profile: Arc<Profile>,
}

impl ContentStore {
    /// Reads and validates the profile document.
    pub fn open(config: SiteConfig) -> Result<Self, FolioError> {
        let path = config.profile_path();
        let raw = std::fs::read_to_string(&path)?;
        let profile = Profile::from_json(&raw, &path.display().to_string())?;
        log::debug!("Loaded profile from {}", path.display());
        Ok(Self::from_parts(config, profile))
    }

    /// Builds a store around an already parsed profile.
    pub fn from_parts(config: SiteConfig, profile: Profile) -> Self {
        Self {
            config,
            profile: Arc::new(profile),
        }
    }

    /// Site configuration.
    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    /// Shared profile document.
    pub fn profile(&self) -> &Arc<Profile> {
        &self.profile
    }

    /// Every slug that gets a generated page.
    pub fn slugs(&self) -> Result<Vec<String>, FolioError> {
        self.profile.page_slugs()
    }

    /// Reads the document for `slug`.
    ///
    /// A missing file is [`FolioError::NotFound`]; other IO failures pass through.
    pub fn load(&self, slug: &str) -> Result<CaseStudySource, FolioError> {
        let slug = folio_core::normalize_slug(slug)?;
        let path = self.config.document_path(&slug);
        let text = match std::fs::read_to_string(&path) {
            Ok(text) => text,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                return Err(FolioError::not_found(slug));
            }
            Err(err) => return Err(err.into()),
        };
        log::debug!("Loaded {} ({} bytes)", path.display(), text.len());
        Ok(CaseStudySource {
            slug,
            path,
            text,
            profile: Arc::clone(&self.profile),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const PROFILE: &str = r#"{
        "general": { "profilePhoto": "/me.jpg" },
        "allCollections": [{ "items": [
            { "url": "case-a" },
            { "url": "https://external.com" },
            { "url": "missing" }
        ]}]
    }"#;

    fn content_dir() -> TempDir {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("profileData.json"), PROFILE).unwrap();
        fs::create_dir(dir.path().join("writing")).unwrap();
        fs::write(
            dir.path().join("writing/case-a.mdx"),
            "---\ntitle: Foo\ndescription: By Jane\n---\nHello",
        )
        .unwrap();
        dir
    }

    #[test]
    fn loads_document_and_shares_profile() {
        let dir = content_dir();
        let store = ContentStore::open(SiteConfig::with_content_dir(dir.path())).unwrap();
        assert_eq!(store.slugs().unwrap(), vec!["case-a", "missing"]);

        let source = store.load("case-a").unwrap();
        assert!(source.text.ends_with("Hello"));
        assert!(Arc::ptr_eq(&source.profile, store.profile()));
    }

    #[test]
    fn missing_document_is_not_found() {
        let dir = content_dir();
        let store = ContentStore::open(SiteConfig::with_content_dir(dir.path())).unwrap();
        let err = store.load("missing").unwrap_err();
        assert!(err.is_not_found(), "{err:?}");
    }

    #[test]
    fn traversal_is_rejected_before_io() {
        let dir = content_dir();
        let store = ContentStore::open(SiteConfig::with_content_dir(dir.path())).unwrap();
        assert!(matches!(
            store.load("../profileData"),
            Err(FolioError::Validation { .. })
        ));
    }

    #[test]
    fn malformed_profile_fails_to_open() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("profileData.json"), r#"{ "general": 3 }"#).unwrap();
        let err = ContentStore::open(SiteConfig::with_content_dir(dir.path())).unwrap_err();
        assert!(matches!(err, FolioError::Validation { .. }), "{err:?}");
    }

    #[test]
    fn missing_profile_is_io_error() {
        let dir = TempDir::new().unwrap();
        let err = ContentStore::open(SiteConfig::with_content_dir(dir.path())).unwrap_err();
        assert!(matches!(err, FolioError::IoError(_)), "{err:?}");
    }
}
