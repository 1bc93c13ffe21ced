use serde::{Deserialize, Serialize};

/// Width assumed when an image does not declare one.
pub const DEFAULT_WIDTH: u32 = 1920;
/// Height assumed when an image does not declare one.
pub const DEFAULT_HEIGHT: u32 = 1080;

/// Narrowest thumbnail ratio, for portrait phone screenshots.
pub const MIN_THUMBNAIL_ASPECT: f64 = 19.0 / 5.0 / 9.0;
/// Widest thumbnail ratio: a 21:9 ultrawide monitor.
pub const MAX_THUMBNAIL_ASPECT: f64 = 21.0 / 9.0;

/// Media type of an attachment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttachmentKind {
    /// Still image.
    #[default]
    Image,
    /// Embedded video.
    Video,
}

/// One media item shown in a slider or lightbox.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    /// Source URL.
    pub url: String,
    /// Media type.
    #[serde(rename = "type", default)]
    pub kind: AttachmentKind,
    /// Intrinsic width in pixels.
    pub width: u32,
    /// Intrinsic height in pixels.
    pub height: u32,
    /// Caption / alt text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
}

impl Attachment {
    /// Image attachment, with the 1920×1080 fallback for missing dimensions.
    pub fn image(
        url: impl Into<String>,
        alt: Option<String>,
        width: Option<u32>,
        height: Option<u32>,
    ) -> Self {
        Self {
            url: url.into(),
            kind: AttachmentKind::Image,
            width: width.filter(|w| *w > 0).unwrap_or(DEFAULT_WIDTH),
            height: height.filter(|h| *h > 0).unwrap_or(DEFAULT_HEIGHT),
            alt: alt.filter(|alt| !alt.is_empty()),
        }
    }

    /// Native width / height ratio.
    pub fn aspect_ratio(&self) -> f64 {
        if self.height == 0 {
            return f64::from(DEFAULT_WIDTH) / f64::from(DEFAULT_HEIGHT);
        }
        f64::from(self.width) / f64::from(self.height)
    }

    /// Display ratio of this attachment's slider thumbnail.
    pub fn thumbnail_aspect_ratio(&self) -> f64 {
        thumbnail_aspect_ratio(self.aspect_ratio())
    }
}

/// Clamps a native ratio into the band thumbnails are allowed to occupy, so no
/// single image dominates or vanishes in the strip.
pub fn thumbnail_aspect_ratio(ratio: f64) -> f64 {
    if ratio.is_nan() {
        return MIN_THUMBNAIL_ASPECT;
    }
    ratio.clamp(MIN_THUMBNAIL_ASPECT, MAX_THUMBNAIL_ASPECT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_band_matches_device_extremes() {
        assert!((MIN_THUMBNAIL_ASPECT - 0.4222).abs() < 1e-3);
        assert!((MAX_THUMBNAIL_ASPECT - 2.3333).abs() < 1e-3);
    }

    #[test]
    fn thumbnail_ratio_is_clamped() {
        for ratio in [0.0, 0.1, 0.4, 0.5, 1.0, 16.0 / 9.0, 2.5, 10.0, f64::INFINITY] {
            let expected = ratio.clamp(MIN_THUMBNAIL_ASPECT, MAX_THUMBNAIL_ASPECT);
            assert_eq!(thumbnail_aspect_ratio(ratio), expected, "ratio {ratio}");
        }
        assert_eq!(thumbnail_aspect_ratio(f64::NAN), MIN_THUMBNAIL_ASPECT);
    }

    #[test]
    fn image_defaults_missing_dimensions() {
        let attachment = Attachment::image("/a.png", Some(String::new()), None, Some(0));
        assert_eq!(attachment.width, DEFAULT_WIDTH);
        assert_eq!(attachment.height, DEFAULT_HEIGHT);
        assert_eq!(attachment.alt, None);
        assert!((attachment.aspect_ratio() - 16.0 / 9.0).abs() < 1e-9);
    }

    #[test]
    fn panorama_thumbnail_is_capped() {
        let attachment = Attachment::image("/pano.jpg", None, Some(6000), Some(1000));
        assert_eq!(attachment.thumbnail_aspect_ratio(), MAX_THUMBNAIL_ASPECT);
    }

    #[test]
    fn serializes_with_lightbox_field_names() {
        let attachment = Attachment::image("/a.png", Some("Cover".into()), Some(800), Some(600));
        let json = serde_json::to_value(&attachment).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "url": "/a.png",
                "type": "image",
                "width": 800,
                "height": 600,
                "alt": "Cover"
            })
        );
    }
}
