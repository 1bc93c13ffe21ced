//! Site configuration.
//!
//! Every field has a default matching the conventional layout, so an empty
//! JSON object (or no config file at all) is a valid configuration.

use folio_core::FolioError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Where content lives and where pages go.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct SiteConfig {
    /// Root of the static content directory.
    pub content_dir: PathBuf,
    /// Profile document, relative to `content_dir`.
    pub profile_file: PathBuf,
    /// Directory of `{slug}.mdx` documents, relative to `content_dir`.
    pub writing_dir: PathBuf,
    /// Destination for generated pages.
    pub output_dir: PathBuf,
    /// Markup options.
    pub render: RenderOptions,
    /// Worker threads for page rendering. `None` uses rayon's global pool.
    pub max_threads: Option<usize>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            content_dir: PathBuf::from("public/content"),
            profile_file: PathBuf::from("profileData.json"),
            writing_dir: PathBuf::from("writing"),
            output_dir: PathBuf::from("out"),
            render: RenderOptions::default(),
            max_threads: None,
        }
    }
}

impl SiteConfig {
    /// Configuration rooted at `content_dir`, everything else default.
    pub fn with_content_dir(content_dir: impl Into<PathBuf>) -> Self {
        Self {
            content_dir: content_dir.into(),
            ..Self::default()
        }
    }

    /// Reads a JSON configuration file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, FolioError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)?;
        serde_json::from_str(&raw)
            .map_err(|err| FolioError::validation(format!("{}: {}", path.display(), err)))
    }

    /// Absolute-or-relative path of the profile document.
    pub fn profile_path(&self) -> PathBuf {
        self.content_dir.join(&self.profile_file)
    }

    /// Path of the document for `slug`.
    pub fn document_path(&self, slug: &str) -> PathBuf {
        self.content_dir
            .join(&self.writing_dir)
            .join(format!("{slug}.mdx"))
    }

    /// Output file for `slug`.
    pub fn page_output_path(&self, slug: &str) -> PathBuf {
        self.output_dir.join(slug).join("index.html")
    }
}

/// Markup generation options.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct RenderOptions {
    /// Add `loading="lazy"` to content images.
    pub lazy_images: bool,
    /// Thumbnail strip height in CSS pixels.
    pub slider_height: u32,
    /// Open every content link in a new browsing context. When false only
    /// links leaving the site do.
    pub open_links_in_new_tab: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            lazy_images: true,
            slider_height: 320,
            open_links_in_new_tab: true,
        }
    }
}
