//! Case-study page composition.
//!
//! A page is the profile header, the rendered MDX body, and the document
//! shell around them. Frontmatter problems degrade the header; body problems
//! fail the page.

use crate::config::RenderOptions;
use crate::loader::CaseStudySource;
use crate::registry::ComponentRegistry;
use crate::renderer::render_mdx;
use folio_core::{
    CaseStudyFrontmatter, FolioError, ParseDiagnostics, ParseWarning, Profile, SourceLocation,
    parse_case_study,
};

/// A composed case-study page.
#[derive(Debug, Clone)]
pub struct CaseStudyPage {
    /// Page slug.
    pub slug: String,
    /// Header metadata, empty fields when the frontmatter was unusable.
    pub frontmatter: CaseStudyFrontmatter,
    /// `<header>` markup.
    pub header_html: String,
    /// Rendered MDX body.
    pub body_html: String,
    /// Recoverable problems met while composing.
    pub diagnostics: ParseDiagnostics,
}

impl CaseStudyPage {
    /// `<title>` text: the frontmatter title, or the slug when there is none.
    pub fn title(&self) -> &str {
        if self.frontmatter.title.is_empty() {
            &self.slug
        } else {
            &self.frontmatter.title
        }
    }

    /// The `<article>` element: header followed by the body.
    pub fn article_html(&self) -> String {
        format!(
            "<article class=\"case-study\">{}<div class=\"markdown\">{}</div></article>",
            self.header_html, self.body_html
        )
    }

    /// Full HTML document for the page.
    pub fn to_document(&self) -> String {
        let mut html = String::with_capacity(self.header_html.len() + self.body_html.len() + 512);
        html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\" />\n");
        html.push_str(
            "<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\" />\n<title>",
        );
        html_escape::encode_text_to_string(self.title(), &mut html);
        html.push_str("</title>\n");
        if !self.frontmatter.description.is_empty() {
            html.push_str("<meta name=\"description\" content=\"");
            html_escape::encode_double_quoted_attribute_to_string(
                &self.frontmatter.description,
                &mut html,
            );
            html.push_str("\" />\n");
        }
        html.push_str("</head>\n<body>\n");
        html.push_str(&self.article_html());
        html.push_str("\n</body>\n</html>\n");
        html
    }
}

/// Renders the page header: profile photo linking home, then the author and
/// title when they are non-empty.
pub fn render_header(profile: &Profile, frontmatter: &CaseStudyFrontmatter) -> String {
    let mut html = String::from("<header class=\"case-study-header\">");
    html.push_str("<a href=\"/\" class=\"profile-photo-link\"><img src=\"");
    html_escape::encode_double_quoted_attribute_to_string(
        &profile.general.profile_photo,
        &mut html,
    );
    html.push_str(
        "\" alt=\"profile photo of the author\" width=\"48\" height=\"48\" style=\"object-fit:cover\" /></a>",
    );
    html.push_str("<div class=\"meta\">");
    if let Some(author) = frontmatter.author() {
        html.push_str("<a href=\"/\">");
        html_escape::encode_text_to_string(author, &mut html);
        html.push_str("</a>");
    }
    if !frontmatter.title.is_empty() {
        html.push_str("<h1>");
        html_escape::encode_text_to_string(&frontmatter.title, &mut html);
        html.push_str("</h1>");
    }
    html.push_str("</div></header>");
    html
}

/// Composes the page for a loaded document.
pub fn compose_case_study(
    source: &CaseStudySource,
    options: &RenderOptions,
    registry: &ComponentRegistry,
) -> Result<CaseStudyPage, FolioError> {
    let mut diagnostics = ParseDiagnostics::new();

    let parsed = parse_case_study(&source.text);
    if let Some(err) = &parsed.error {
        log::warn!(
            "Malformed frontmatter in {}: {}; using empty title and description",
            source.path.display(),
            err
        );
        diagnostics.add_warning(ParseWarning::MalformedFrontmatter {
            message: err.to_string(),
        });
    }

    let body = parsed.body(&source.text);
    let skipped_lines = source
        .text
        .get(..parsed.body_start)
        .unwrap_or_default()
        .matches('\n')
        .count();
    let body_html = render_mdx(body, options, registry)
        .map_err(|err| offset_location(err, skipped_lines, &source.path.display().to_string()))?;
    log::debug!("Rendered {} ({} bytes)", source.slug, body_html.len());

    let header_html = render_header(&source.profile, &parsed.frontmatter);
    Ok(CaseStudyPage {
        slug: source.slug.clone(),
        frontmatter: parsed.frontmatter,
        header_html,
        body_html,
        diagnostics,
    })
}

/// Maps body-relative error locations back to the document file.
fn offset_location(err: FolioError, lines: usize, file: &str) -> FolioError {
    let shift = |location: SourceLocation| {
        SourceLocation::with_file(file, location.line + lines, location.column)
    };
    match err {
        FolioError::Parse { message, location } => {
            FolioError::parse_error(message, shift(location))
        }
        FolioError::Render { message, location } => {
            FolioError::render_error(message, shift(location))
        }
        FolioError::UnknownComponent { name, location } => {
            FolioError::unknown_component(name, shift(location))
        }
        other => other,
    }
}
