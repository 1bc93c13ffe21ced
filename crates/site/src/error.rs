use folio_core::FolioError;
use std::path::PathBuf;
use thiserror::Error;

/// Failure of a whole-site build.
#[derive(Debug, Error)]
pub enum BuildError {
    /// A page failed to load or render.
    #[error("page '{slug}' failed: {source}")]
    Page {
        /// Slug of the failing page
        slug: String,
        /// Underlying error
        #[source]
        source: FolioError,
    },
    /// An output file could not be written.
    #[error("cannot write {}: {source}", .path.display())]
    Write {
        /// Output path
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },
    /// Failure before any page was attempted (profile, slug enumeration).
    #[error(transparent)]
    Folio(#[from] FolioError),
}

impl BuildError {
    /// Slug of the failing page, if the failure belongs to one.
    pub fn slug(&self) -> Option<&str> {
        match self {
            BuildError::Page { slug, .. } => Some(slug),
            _ => None,
        }
    }

    pub(crate) fn page(slug: &str, source: FolioError) -> Self {
        BuildError::Page {
            slug: slug.to_string(),
            source,
        }
    }
}
