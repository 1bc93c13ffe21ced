//! Static generation of every case-study page.
//!
//! Pages render in parallel against the shared profile; the first failing
//! slug fails the build.

use crate::error::BuildError;
use crate::loader::ContentStore;
use crate::page::{CaseStudyPage, compose_case_study};
use crate::registry::ComponentRegistry;
use folio_core::ParseWarning;
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// One generated file.
#[derive(Debug, Clone)]
pub struct WrittenPage {
    /// Page slug.
    pub slug: String,
    /// File the document was written to.
    pub path: PathBuf,
    /// Recoverable problems met while composing the page.
    pub warnings: Vec<ParseWarning>,
}

/// Statistics for a build.
#[derive(Debug, Clone, PartialEq)]
pub struct BuildStats {
    /// Number of slugs enumerated.
    pub total: usize,
    /// Number of pages rendered.
    pub rendered: usize,
    /// Warnings across all pages.
    pub warnings: usize,
    /// Total processing time in milliseconds.
    pub elapsed_ms: f64,
}

/// Outcome of [`build_site`].
#[derive(Debug, Clone)]
pub struct BuildReport {
    /// Written pages, in slug order.
    pub pages: Vec<WrittenPage>,
    /// Build statistics.
    pub stats: BuildStats,
}

/// Renders every page without writing anything, in slug order.
pub fn render_pages(store: &ContentStore) -> Result<Vec<CaseStudyPage>, BuildError> {
    render_pages_with(store, ComponentRegistry::shared())
}

/// [`render_pages`] with a custom component table.
pub fn render_pages_with(
    store: &ContentStore,
    registry: &ComponentRegistry,
) -> Result<Vec<CaseStudyPage>, BuildError> {
    let slugs = store.slugs()?;
    let options = &store.config().render;

    let render_one = |slug: &String| -> Result<CaseStudyPage, BuildError> {
        let source = store
            .load(slug)
            .map_err(|err| BuildError::page(slug, err))?;
        compose_case_study(&source, options, registry).map_err(|err| BuildError::page(slug, err))
    };

    let pool = store.config().max_threads.and_then(|threads| {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build()
            .map_err(|err| log::warn!("Falling back to the global thread pool: {err}"))
            .ok()
    });

    match pool {
        Some(pool) => pool.install(|| slugs.par_iter().map(render_one).collect()),
        None => slugs.par_iter().map(render_one).collect(),
    }
}

/// Renders every page and writes `{output_dir}/{slug}/index.html`.
pub fn build_site(store: &ContentStore) -> Result<BuildReport, BuildError> {
    let start = Instant::now();
    let config = store.config();
    log::info!(
        "Building site from {} into {}",
        config.content_dir.display(),
        config.output_dir.display()
    );

    let pages = render_pages(store)?;
    let total = pages.len();

    let written = pages
        .into_iter()
        .map(|page| {
            let path = config.page_output_path(&page.slug);
            write_page(&path, &page.to_document())?;
            log::info!("Wrote {}", path.display());
            Ok(WrittenPage {
                slug: page.slug,
                path,
                warnings: page.diagnostics.warnings,
            })
        })
        .collect::<Result<Vec<_>, BuildError>>()?;

    let stats = BuildStats {
        total,
        rendered: written.len(),
        warnings: written.iter().map(|page| page.warnings.len()).sum(),
        elapsed_ms: start.elapsed().as_secs_f64() * 1000.0,
    };
    log::info!(
        "Built {} pages ({} warnings) in {:.1}ms",
        stats.rendered,
        stats.warnings,
        stats.elapsed_ms
    );
    Ok(BuildReport {
        pages: written,
        stats,
    })
}

fn write_page(path: &Path, html: &str) -> Result<(), BuildError> {
    let write = || -> std::io::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, html)
    };
    write().map_err(|source| BuildError::Write {
        path: path.to_path_buf(),
        source,
    })
}
