//! Content links.

use crate::registry::Element;
use crate::renderer::{Context, Scope, render_children};
use folio_core::{FolioError, is_page_url};

/// Renders `a` (markdown `[text](href)` or JSX `<a>`).
///
/// Links open in a new browsing context with `noopener noreferrer`. With
/// `open_links_in_new_tab` off, only links leaving the site do.
pub fn render(element: &Element<'_>, ctx: &mut Context<'_>) -> Result<(), FolioError> {
    let href = element.literal("href");
    let new_tab = ctx.options().open_links_in_new_tab || href.is_some_and(|h| !is_page_url(h));

    ctx.push_raw("<a");
    if let Some(href) = href {
        ctx.push_attr("href", href);
    }
    if new_tab {
        ctx.push_raw(" target=\"_blank\" rel=\"noopener noreferrer\"");
    }
    if let Some(title) = element.literal("title") {
        ctx.push_attr("title", title);
    }
    ctx.push_raw(">");

    ctx.enter(Scope::Link);
    render_children(element.children, ctx)?;
    ctx.exit();

    ctx.push_raw("</a>");
    Ok(())
}
