//! Static generation of case-study pages.
//!
//! This crate turns the content directory (a profile document plus one MDX
//! file per case study) into HTML pages:
//!
//! 1. [`ContentStore`] reads the profile once and enumerates slugs.
//! 2. [`compose_case_study`] parses frontmatter, renders the MDX body through
//!    the [`ComponentRegistry`], and adds the profile header.
//! 3. [`build_site`] does this for every slug in parallel and writes the
//!    documents.
//!
//! ```no_run
//! use folio_site::{ContentStore, SiteConfig, build_site};
//!
//! let store = ContentStore::open(SiteConfig::default())?;
//! let report = build_site(&store)?;
//! println!("{} pages", report.stats.rendered);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![deny(missing_docs)]

/// Whole-site generation.
pub mod build;
/// Custom component markup.
pub mod components;
/// Site configuration.
pub mod config;
mod error;
/// Content loading.
pub mod loader;
/// Page composition.
pub mod page;
/// Component substitution table.
pub mod registry;
/// MDX rendering.
pub mod renderer;

pub use build::{BuildReport, BuildStats, WrittenPage, build_site, render_pages};
pub use config::{RenderOptions, SiteConfig};
pub use error::BuildError;
pub use loader::{CaseStudySource, ContentStore};
pub use page::{CaseStudyPage, compose_case_study, render_header};
pub use registry::{ComponentRegistry, ComponentRenderer, Element, PropValue};
pub use renderer::render_mdx;
