//! Case-study component renderers.
//!
//! Each module exposes a `render` function matching
//! [`ComponentRenderer`](crate::registry::ComponentRenderer).

pub mod image;
pub mod link;
pub mod props;
pub mod slider;
pub mod video;

use crate::renderer::Context;

/// Style for media that fills its aspect-ratio wrapper.
const FILL_STYLE: &str = "position:absolute;inset:0;width:100%;height:100%;object-fit:cover";

/// Writes an `<img>` tag honoring the lazy-loading option.
fn push_img(ctx: &mut Context<'_>, src: &str, alt: &str, style: Option<&str>) {
    ctx.push_raw("<img");
    ctx.push_attr("src", src);
    ctx.push_attr("alt", alt);
    if ctx.options().lazy_images {
        ctx.push_raw(" loading=\"lazy\" decoding=\"async\"");
    }
    if let Some(style) = style {
        ctx.push_attr("style", style);
    }
    ctx.push_raw(" />");
}
