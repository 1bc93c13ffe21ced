//! Horizontal thumbnail strip that opens a lightbox.
//!
//! The markup is static; the strip's scroll and selection state live in the
//! browser controller, which reads the attachments back from `data-slider`.

use super::props::from_js_literal;
use crate::registry::{Element, PropValue};
use crate::renderer::Context;
use folio_core::{Attachment, FolioError};
use serde::Deserialize;

/// One entry of the `images` prop.
#[derive(Debug, Clone, Deserialize)]
pub struct SlideImage {
    /// Image URL.
    pub src: String,
    /// Alt text, also the lightbox caption.
    #[serde(default)]
    pub alt: Option<String>,
    /// Intrinsic width in pixels.
    #[serde(default)]
    pub width: Option<u32>,
    /// Intrinsic height in pixels.
    #[serde(default)]
    pub height: Option<u32>,
}

impl From<SlideImage> for Attachment {
    fn from(image: SlideImage) -> Self {
        Attachment::image(image.src, image.alt, image.width, image.height)
    }
}

/// Reads the `images` prop: a JS array literal or a JSON string.
pub fn slide_images(element: &Element<'_>) -> Result<Vec<SlideImage>, FolioError> {
    let parsed = match element.props.get("images") {
        Some(PropValue::Expression { value }) => from_js_literal(value),
        Some(PropValue::Literal { value }) => {
            serde_json::from_str(value).map_err(|err| err.to_string())
        }
        Some(PropValue::Flag) | None => {
            return Err(element.error("<Slider> requires an `images` prop"));
        }
    };
    parsed.map_err(|err| element.error(format!("invalid <Slider> images: {err}")))
}

/// Renders `<Slider images={[...]} />`. The strip is block content and
/// cannot sit inside a paragraph.
pub fn render(element: &Element<'_>, ctx: &mut Context<'_>) -> Result<(), FolioError> {
    if ctx.is_inline() {
        return Err(element.error("<Slider> must stand on its own line"));
    }
    let images = slide_images(element)?;
    if images.is_empty() {
        log::warn!("Empty <Slider> at {} renders nothing", element.location);
        return Ok(());
    }

    let attachments: Vec<Attachment> = images.into_iter().map(Attachment::from).collect();
    let payload = serde_json::to_string(&attachments)
        .map_err(|err| element.error(format!("cannot encode slider payload: {err}")))?;
    let height = ctx.options().slider_height;

    ctx.push_raw("<div class=\"slider\"");
    ctx.push_attr("style", &format!("padding-top:{height}px"));
    ctx.push_attr("data-slider", &payload);
    ctx.push_raw("><div class=\"slider-viewport\"><div class=\"slider-track\">");
    for (index, attachment) in attachments.iter().enumerate() {
        ctx.push_raw("<button type=\"button\" class=\"slider-thumb\"");
        ctx.push_attr("data-index", &index.to_string());
        ctx.push_attr(
            "style",
            &format!(
                "height:{height}px;aspect-ratio:{:.4}",
                attachment.thumbnail_aspect_ratio()
            ),
        );
        ctx.push_raw(">");
        super::push_img(
            ctx,
            &attachment.url,
            attachment.alt.as_deref().unwrap_or_default(),
            Some(super::FILL_STYLE),
        );
        ctx.push_raw("</button>");
    }
    ctx.push_raw("</div></div></div>");
    Ok(())
}
