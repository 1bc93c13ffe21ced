//! Embedded video player.

use crate::registry::Element;
use crate::renderer::Context;
use folio_core::FolioError;

const ALLOW: &str =
    "accelerometer; autoplay; clipboard-write; encrypted-media; gyroscope; picture-in-picture";

/// Renders `<Video src="..." />` as a 16/9 iframe embed. Inside a
/// paragraph it is a bare iframe without the figure.
pub fn render(element: &Element<'_>, ctx: &mut Context<'_>) -> Result<(), FolioError> {
    let src = element.required_literal("src")?;

    if ctx.is_inline() {
        ctx.push_raw("<iframe");
        ctx.push_attr("src", src);
        ctx.push_attr("allow", ALLOW);
        ctx.push_raw(" allowfullscreen></iframe>");
        return Ok(());
    }

    ctx.push_raw(
        "<figure class=\"figure\"><div class=\"figure-frame\" style=\"position:relative;width:100%;aspect-ratio:16/9\"><iframe",
    );
    ctx.push_attr("src", src);
    ctx.push_attr("allow", ALLOW);
    ctx.push_raw(
        " allowfullscreen style=\"position:absolute;width:100%;height:100%;border:0\"></iframe></div></figure>",
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::config::RenderOptions;
    use crate::registry::ComponentRegistry;
    use crate::renderer::render_mdx;
    use folio_core::FolioError;

    #[test]
    fn renders_iframe_embed() {
        let html = render_mdx(
            "<Video src=\"https://player.example/v/1?a=1&b=2\" />",
            &RenderOptions::default(),
            ComponentRegistry::shared(),
        )
        .unwrap();
        insta::assert_snapshot!(html, @r#"<figure class="figure"><div class="figure-frame" style="position:relative;width:100%;aspect-ratio:16/9"><iframe src="https://player.example/v/1?a=1&amp;b=2" allow="accelerometer; autoplay; clipboard-write; encrypted-media; gyroscope; picture-in-picture" allowfullscreen style="position:absolute;width:100%;height:100%;border:0"></iframe></div></figure>"#);
    }

    #[test]
    fn inline_video_has_no_figure() {
        let html = render_mdx(
            "Watch <Video src=\"https://v\" /> here",
            &RenderOptions::default(),
            ComponentRegistry::shared(),
        )
        .unwrap();
        assert!(!html.contains("<figure"), "{html}");
        assert!(html.starts_with("<p>Watch <iframe src=\"https://v\""), "{html}");
        assert!(html.ends_with("allowfullscreen></iframe> here</p>"), "{html}");
    }

    #[test]
    fn missing_src_is_render_error() {
        let err = render_mdx("<Video />", &RenderOptions::default(), ComponentRegistry::shared())
            .unwrap_err();
        assert!(matches!(err, FolioError::Render { .. }), "{err:?}");
    }

    #[test]
    fn expression_src_is_rejected() {
        let err = render_mdx(
            "<Video src={url} />",
            &RenderOptions::default(),
            ComponentRegistry::shared(),
        )
        .unwrap_err();
        assert!(matches!(err, FolioError::Render { .. }), "{err:?}");
    }
}
