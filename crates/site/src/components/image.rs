//! Content image with caption and a single-image lightbox.

use super::{FILL_STYLE, push_img};
use crate::registry::Element;
use crate::renderer::Context;
use folio_core::{Attachment, FolioError};

/// Renders `img` (markdown `![alt](src)` or JSX `<img>`).
///
/// Block position gets a `<figure>` with a 3/2 frame, a caption when `alt`
/// is non-empty, and the lightbox payload in `data-lightbox`. Inside phrasing
/// content only the `<img>` is written.
pub fn render(element: &Element<'_>, ctx: &mut Context<'_>) -> Result<(), FolioError> {
    let src = element.required_literal("src")?;
    let alt = element.literal("alt").unwrap_or_default();

    if ctx.is_inline() {
        push_img(ctx, src, alt, None);
        return Ok(());
    }

    // Dimensions of content images are not known at build time.
    let lightbox = [Attachment::image(src, Some(alt.to_string()), None, None)];
    let payload = serde_json::to_string(&lightbox)
        .map_err(|err| element.error(format!("cannot encode lightbox payload: {err}")))?;

    ctx.push_raw("<figure class=\"figure\"");
    ctx.push_attr("data-lightbox", &payload);
    ctx.push_raw(
        "><div class=\"figure-frame\" style=\"position:relative;width:100%;aspect-ratio:3/2;cursor:pointer\">",
    );
    push_img(ctx, src, alt, Some(FILL_STYLE));
    ctx.push_raw("</div>");
    if !alt.is_empty() {
        ctx.push_raw("<figcaption>");
        ctx.push_text(alt);
        ctx.push_raw("</figcaption>");
    }
    ctx.push_raw("</figure>");
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::config::RenderOptions;
    use crate::registry::ComponentRegistry;
    use crate::renderer::render_mdx;

    fn render(source: &str, options: &RenderOptions) -> String {
        render_mdx(source, options, ComponentRegistry::shared()).unwrap()
    }

    #[test]
    fn standalone_image_becomes_figure() {
        let html = render("![A & B](/a.png)", &RenderOptions::default());
        insta::assert_snapshot!(html, @r#"<figure class="figure" data-lightbox="[{&quot;url&quot;:&quot;/a.png&quot;,&quot;type&quot;:&quot;image&quot;,&quot;width&quot;:1920,&quot;height&quot;:1080,&quot;alt&quot;:&quot;A &amp; B&quot;}]"><div class="figure-frame" style="position:relative;width:100%;aspect-ratio:3/2;cursor:pointer"><img src="/a.png" alt="A &amp; B" loading="lazy" decoding="async" style="position:absolute;inset:0;width:100%;height:100%;object-fit:cover" /></div><figcaption>A &amp; B</figcaption></figure>"#);
    }

    #[test]
    fn empty_alt_has_no_caption() {
        let html = render("![](/a.png)", &RenderOptions::default());
        assert!(html.starts_with("<figure"), "{html}");
        assert!(!html.contains("figcaption"), "{html}");
        assert!(!html.contains("&quot;alt&quot;"), "{html}");
    }

    #[test]
    fn inline_image_stays_inline() {
        let options = RenderOptions {
            lazy_images: false,
            ..RenderOptions::default()
        };
        let html = render("Logo ![mark](/m.svg) here", &options);
        assert_eq!(html, "<p>Logo <img src=\"/m.svg\" alt=\"mark\" /> here</p>");
    }

    #[test]
    fn jsx_img_without_src_fails() {
        let err = render_mdx(
            "<img alt=\"x\" />",
            &RenderOptions::default(),
            ComponentRegistry::shared(),
        )
        .unwrap_err();
        assert!(err.to_string().contains("<img> requires a non-empty `src` prop"), "{err}");
    }
}
