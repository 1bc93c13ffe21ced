//! View-time state for the image slider and its lightbox.
//!
//! Everything here is plain data driven by explicit events, so the same
//! state machines run in unit tests and behind the wasm bindings.

mod attachment;
/// Lightbox navigation state.
pub mod lightbox;
/// Pointer physics for the slider strip.
pub mod momentum;
/// Slider scroll/selection state.
pub mod slider;

pub use attachment::{
    Attachment, AttachmentKind, DEFAULT_HEIGHT, DEFAULT_WIDTH, MAX_THUMBNAIL_ASPECT,
    MIN_THUMBNAIL_ASPECT, thumbnail_aspect_ratio,
};
pub use lightbox::{Lightbox, LightboxEvent, LightboxKey};
pub use momentum::Momentum;
pub use slider::{Metrics, ScrollDriver, Slider};

use thiserror::Error;

/// Invalid slider or lightbox requests.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GalleryError {
    /// A lightbox needs at least one attachment.
    #[error("lightbox needs at least one attachment")]
    Empty,
    /// Requested index is past the end of the attachment list.
    #[error("attachment index {index} out of range for {len} attachments")]
    IndexOutOfRange {
        /// Requested index
        index: usize,
        /// Number of attachments
        len: usize,
    },
}
