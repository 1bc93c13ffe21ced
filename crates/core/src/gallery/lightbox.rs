//! Full-screen overlay cycling through an ordered list of attachments.

use super::{Attachment, GalleryError};

/// Minimum horizontal swipe distance (px) that counts as navigation.
pub const SWIPE_THRESHOLD: f64 = 50.0;

/// Keys the overlay reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightboxKey {
    /// Previous attachment.
    ArrowLeft,
    /// Next attachment.
    ArrowRight,
    /// Dismiss the overlay.
    Escape,
}

impl LightboxKey {
    /// Maps a DOM `KeyboardEvent.key` value.
    pub fn from_dom_key(key: &str) -> Option<Self> {
        match key {
            "ArrowLeft" => Some(Self::ArrowLeft),
            "ArrowRight" => Some(Self::ArrowRight),
            "Escape" | "Esc" => Some(Self::Escape),
            _ => None,
        }
    }
}

/// What an input did to the overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightboxEvent {
    /// The visible attachment changed to this index.
    Navigated(usize),
    /// Input had no effect.
    Unchanged,
    /// The overlay asked to be closed; the owner should drop it.
    Closed,
}

/// Navigation state of an open lightbox.
#[derive(Debug, Clone, PartialEq)]
pub struct Lightbox {
    attachments: Vec<Attachment>,
    index: usize,
}

impl Lightbox {
    /// Opens the overlay on `starting_index`.
    pub fn open(attachments: Vec<Attachment>, starting_index: usize) -> Result<Self, GalleryError> {
        if attachments.is_empty() {
            return Err(GalleryError::Empty);
        }
        if starting_index >= attachments.len() {
            return Err(GalleryError::IndexOutOfRange {
                index: starting_index,
                len: attachments.len(),
            });
        }
        Ok(Self {
            attachments,
            index: starting_index,
        })
    }

    /// Index of the visible attachment.
    pub fn index(&self) -> usize {
        self.index
    }

    /// The visible attachment.
    pub fn current(&self) -> &Attachment {
        &self.attachments[self.index]
    }

    /// All attachments, in navigation order.
    pub fn attachments(&self) -> &[Attachment] {
        &self.attachments
    }

    /// Number of attachments.
    pub fn len(&self) -> usize {
        self.attachments.len()
    }

    /// Always false: an open lightbox holds at least one attachment.
    pub fn is_empty(&self) -> bool {
        self.attachments.is_empty()
    }

    /// Advances to the next attachment, wrapping to the first.
    pub fn show_next(&mut self) -> LightboxEvent {
        self.go_to((self.index + 1) % self.len())
    }

    /// Steps back to the previous attachment, wrapping to the last.
    pub fn show_previous(&mut self) -> LightboxEvent {
        let len = self.len();
        self.go_to((self.index + len - 1) % len)
    }

    /// Jumps directly to `index`; out-of-range indices are ignored.
    pub fn go_to(&mut self, index: usize) -> LightboxEvent {
        if index >= self.len() || index == self.index {
            return LightboxEvent::Unchanged;
        }
        self.index = index;
        LightboxEvent::Navigated(index)
    }

    /// Handles a key press.
    pub fn handle_key(&mut self, key: LightboxKey) -> LightboxEvent {
        match key {
            LightboxKey::ArrowLeft => self.show_previous(),
            LightboxKey::ArrowRight => self.show_next(),
            LightboxKey::Escape => LightboxEvent::Closed,
        }
    }

    /// Handles a completed horizontal swipe of `delta_x` pixels.
    ///
    /// Swiping left reveals the next attachment.
    pub fn handle_swipe(&mut self, delta_x: f64) -> LightboxEvent {
        if delta_x <= -SWIPE_THRESHOLD {
            self.show_next()
        } else if delta_x >= SWIPE_THRESHOLD {
            self.show_previous()
        } else {
            LightboxEvent::Unchanged
        }
    }

    /// Dismisses the overlay (backdrop click, close button).
    pub fn close(&self) -> LightboxEvent {
        LightboxEvent::Closed
    }
}
