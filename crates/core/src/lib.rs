#![deny(missing_docs)]
//! folio core: frontmatter extraction, profile documents, MDX parsing and
//! slider/lightbox state.

/// Core error and diagnostic types.
pub mod error;
/// YAML frontmatter extraction helpers.
pub mod frontmatter;
/// Slider, lightbox and attachment state machines.
pub mod gallery;
/// MDX parsing pipeline and tree transforms.
pub mod parse;
/// Typed profile document and route enumeration.
pub mod profile;
/// Slug filtering and normalization.
pub mod slug;

pub use error::{FolioError, ParseDiagnostics, ParseWarning, SourceLocation};
pub use frontmatter::{
    CaseStudyFrontmatter, FrontmatterError, FrontmatterExtraction, FrontmatterParse,
    extract_frontmatter, parse_case_study,
};
pub use gallery::{Attachment, AttachmentKind, GalleryError, Lightbox, Slider};
pub use parse::{
    AstTransform, ParseOptions, ParserPipeline, parse_mdast, parse_mdast_with_options,
    unwrap_images,
};
pub use profile::{Collection, CollectionItem, General, Profile};
pub use slug::{is_page_url, normalize_slug};
