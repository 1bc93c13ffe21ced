//! MDX to HTML rendering.
//!
//! The document is parsed with the case-study pipeline, then walked node by
//! node. Images, links and JSX elements go through the
//! [`ComponentRegistry`](crate::registry::ComponentRegistry) so a page can
//! swap in its own markup for them.

mod context;
mod render;

pub use context::{Context, Scope};
pub use render::{render_children, render_node};

use crate::config::RenderOptions;
use crate::registry::ComponentRegistry;
use folio_core::{FolioError, ParserPipeline};
use markdown::mdast::Node;

/// Renders an MDX document to an HTML fragment.
///
/// Frontmatter is parsed but produces no output. Any parse error, unknown
/// component, or invalid component prop fails the whole render.
pub fn render_mdx(
    source: &str,
    options: &RenderOptions,
    registry: &ComponentRegistry,
) -> Result<String, FolioError> {
    let root = ParserPipeline::case_study().parse(source)?;
    render_tree(&root, options, registry)
}

/// Renders an already parsed tree.
pub fn render_tree(
    root: &Node,
    options: &RenderOptions,
    registry: &ComponentRegistry,
) -> Result<String, FolioError> {
    let mut ctx = Context::new(options, registry);
    render_node(root, &mut ctx)?;
    Ok(ctx.finish())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(source: &str) -> String {
        render_mdx(source, &RenderOptions::default(), &ComponentRegistry::empty()).unwrap()
    }

    fn site(source: &str) -> Result<String, FolioError> {
        render_mdx(source, &RenderOptions::default(), ComponentRegistry::shared())
    }

    #[test]
    fn renders_basic_markdown() {
        insta::assert_snapshot!(
            plain("# Title\n\nSome *emphasis* and **strong** text."),
            @"<h1>Title</h1><p>Some <em>emphasis</em> and <strong>strong</strong> text.</p>"
        );
    }

    #[test]
    fn frontmatter_produces_no_output() {
        assert_eq!(plain("---\ntitle: Foo\n---\nHello"), "<p>Hello</p>");
    }

    #[test]
    fn tight_lists_drop_paragraphs() {
        assert_eq!(
            plain("- one\n- two"),
            "<ul><li>one</li><li>two</li></ul>"
        );
        assert_eq!(
            plain("- one\n\n- two"),
            "<ul><li><p>one</p></li><li><p>two</p></li></ul>"
        );
    }

    #[test]
    fn ordered_list_keeps_start() {
        assert_eq!(plain("3. c\n4. d"), "<ol start=\"3\"><li>c</li><li>d</li></ol>");
    }

    #[test]
    fn fenced_code_is_escaped() {
        assert_eq!(
            plain("```rust\nlet x = a < b;\n```"),
            "<pre><code class=\"language-rust\">let x = a &lt; b;</code></pre>"
        );
    }

    #[test]
    fn gfm_table_with_alignment() {
        insta::assert_snapshot!(
            plain("| a | b |\n|:--|--:|\n| 1 | 2 |"),
            @r#"<table><thead><tr><th align="left">a</th><th align="right">b</th></tr></thead><tbody><tr><td align="left">1</td><td align="right">2</td></tr></tbody></table>"#
        );
    }

    #[test]
    fn lowercase_jsx_passes_through() {
        assert_eq!(
            plain("<div className=\"note\">\n\nHi\n\n</div>"),
            "<div class=\"note\"><p>Hi</p></div>"
        );
    }

    #[test]
    fn fragments_are_transparent() {
        assert_eq!(plain("<>\n\nHi\n\n</>"), "<p>Hi</p>");
    }

    #[test]
    fn expressions_and_esm_are_skipped() {
        assert_eq!(plain("{/* note */}\n\nHi"), "<p>Hi</p>");
    }

    #[test]
    fn unknown_component_fails() {
        let err = site("<Gallery />").unwrap_err();
        match err {
            FolioError::UnknownComponent { name, location } => {
                assert_eq!(name, "Gallery");
                assert_eq!(location.line, 1);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn spread_attributes_fail() {
        let err = render_mdx(
            "<div {...props} />",
            &RenderOptions::default(),
            &ComponentRegistry::empty(),
        )
        .unwrap_err();
        assert!(matches!(err, FolioError::Render { .. }), "{err:?}");
    }

    #[test]
    fn malformed_mdx_is_parse_error() {
        let err = site("<Video src=\"a\"\n").unwrap_err();
        assert!(matches!(err, FolioError::Parse { .. }), "{err:?}");
    }

    #[test]
    fn tag_cut_off_after_a_paragraph_fails() {
        let err = site("Intro\n\n<Video src=\"https://v\"").unwrap_err();
        match err {
            FolioError::Parse { location, .. } => assert_eq!(location.line, 3),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn markdown_links_use_registry() {
        let html = site("See [docs](https://example.com).").unwrap();
        assert_eq!(
            html,
            "<p>See <a href=\"https://example.com\" target=\"_blank\" rel=\"noopener noreferrer\">docs</a>.</p>"
        );
    }

    #[test]
    fn plain_registry_renders_bare_links_and_images() {
        assert_eq!(
            plain("[x](/a) ![alt](/i.png)"),
            "<p><a href=\"/a\">x</a> <img alt=\"alt\" src=\"/i.png\" /></p>"
        );
    }

    #[test]
    fn custom_renderer_overrides_markdown_images() {
        fn stub(
            element: &crate::registry::Element<'_>,
            ctx: &mut Context<'_>,
        ) -> Result<(), FolioError> {
            ctx.push_raw("[img:");
            ctx.push_text(element.literal("src").unwrap_or_default());
            ctx.push_raw("]");
            Ok(())
        }
        let mut registry = ComponentRegistry::empty();
        registry.register("img", stub);
        let html = render_mdx("![a](/x.png)", &RenderOptions::default(), &registry).unwrap();
        assert_eq!(html, "[img:/x.png]");
    }
}
