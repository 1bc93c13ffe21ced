use folio_core::gallery::{Attachment, LightboxEvent, LightboxKey, ScrollDriver, Slider};
use serde::Serialize;
use wasm_bindgen::JsValue;
use wasm_bindgen::prelude::*;

// ============================================================================
// State snapshots
// ============================================================================

/// Snapshot of a slider for the view layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SliderState {
    /// Horizontal scroll offset to apply to the container.
    pub scroll_position: f64,
    /// Thumbnail whose lightbox is open.
    pub selected_index: Option<usize>,
    /// Attachment currently shown in the lightbox.
    pub lightbox_index: Option<usize>,
    /// True when the browser scrolls the strip itself.
    pub native_scroll: bool,
}

/// Result of a lightbox input, as seen from JavaScript.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum LightboxUpdate {
    /// Show the attachment at `index`.
    Navigated {
        /// New attachment index
        index: usize,
    },
    /// Nothing to do.
    Unchanged,
    /// Remove the overlay.
    Closed,
}

impl From<LightboxEvent> for LightboxUpdate {
    fn from(event: LightboxEvent) -> Self {
        match event {
            LightboxEvent::Navigated(index) => Self::Navigated { index },
            LightboxEvent::Unchanged => Self::Unchanged,
            LightboxEvent::Closed => Self::Closed,
        }
    }
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsError> {
    serde_wasm_bindgen::to_value(value)
        .map_err(|e| JsError::new(&format!("Serialization error: {}", e)))
}

// ============================================================================
// Slider controller
// ============================================================================

/// Browser-side owner of one slider's scroll and lightbox state.
///
/// Constructed from the `data-slider` attribute written at build time. The
/// view forwards DOM events and re-applies [`SliderState`] after each call.
#[wasm_bindgen]
pub struct SliderController {
    slider: Slider,
}

impl SliderController {
    /// Builds a controller from the `data-slider` JSON payload.
    pub fn from_payload(payload: &str, touch_capable: bool) -> Result<Self, String> {
        let attachments: Vec<Attachment> =
            serde_json::from_str(payload).map_err(|e| format!("Invalid slider payload: {}", e))?;
        Ok(Self {
            slider: Slider::new(attachments, ScrollDriver::for_device(touch_capable)),
        })
    }

    /// Current state snapshot.
    pub fn snapshot(&self) -> SliderState {
        SliderState {
            scroll_position: self.slider.scroll_position(),
            selected_index: self.slider.selected_index(),
            lightbox_index: self.slider.lightbox().map(|lightbox| lightbox.index()),
            native_scroll: self.slider.driver().is_native(),
        }
    }

    /// Opens the lightbox on `index`. Returns false when the click ended a drag.
    pub fn open(&mut self, index: usize) -> Result<bool, String> {
        self.slider
            .activate(index)
            .map(|lightbox| lightbox.is_some())
            .map_err(|e| e.to_string())
    }

    /// Forwards a DOM key to the lightbox; unrelated keys change nothing.
    pub fn key(&mut self, key: &str) -> LightboxUpdate {
        match LightboxKey::from_dom_key(key) {
            Some(key) => self.slider.handle_lightbox_key(key).into(),
            None => LightboxUpdate::Unchanged,
        }
    }

    /// Forwards a horizontal swipe to the lightbox.
    pub fn swipe(&mut self, delta_x: f64) -> LightboxUpdate {
        self.slider.handle_lightbox_swipe(delta_x).into()
    }
}

#[wasm_bindgen]
impl SliderController {
    /// Creates a controller. Without `touch_capable`, the device is probed.
    #[wasm_bindgen(constructor)]
    pub fn new(payload: &str, touch_capable: Option<bool>) -> Result<SliderController, JsError> {
        let touch = touch_capable.unwrap_or_else(is_touch_device);
        Self::from_payload(payload, touch).map_err(|e| JsError::new(&e))
    }

    /// Number of thumbnails.
    #[wasm_bindgen(getter)]
    pub fn length(&self) -> usize {
        self.slider.attachments().len()
    }

    /// Current scroll offset.
    #[wasm_bindgen(getter, js_name = scrollPosition)]
    pub fn scroll_position(&self) -> f64 {
        self.slider.scroll_position()
    }

    /// Selected thumbnail, `undefined` when the lightbox is closed.
    #[wasm_bindgen(getter, js_name = selectedIndex)]
    pub fn selected_index(&self) -> Option<usize> {
        self.slider.selected_index()
    }

    /// Full state as a plain object.
    pub fn state(&self) -> Result<JsValue, JsError> {
        to_js(&self.snapshot())
    }

    /// Call after the container or thumbnail row resizes.
    #[wasm_bindgen(js_name = updateMetrics)]
    pub fn update_metrics(&mut self, viewport_width: f64, content_width: f64) {
        self.slider.update_metrics(viewport_width, content_width);
    }

    /// `pointerdown` on the strip. `time_ms` is the event's `timeStamp`.
    #[wasm_bindgen(js_name = pointerDown)]
    pub fn pointer_down(&mut self, x: f64, time_ms: f64) {
        self.slider.pointer_down(x, time_ms);
    }

    /// `pointermove` on the strip.
    #[wasm_bindgen(js_name = pointerMove)]
    pub fn pointer_move(&mut self, x: f64, time_ms: f64) {
        self.slider.pointer_move(x, time_ms);
    }

    /// `pointerup` / `pointercancel` on the strip.
    #[wasm_bindgen(js_name = pointerUp)]
    pub fn pointer_up(&mut self, time_ms: f64) {
        self.slider.pointer_up(time_ms);
    }

    /// One animation frame. Keep requesting frames while this returns true.
    pub fn tick(&mut self) -> bool {
        self.slider.tick()
    }

    /// `scroll` events from a natively scrolled strip.
    #[wasm_bindgen(js_name = syncNativeScroll)]
    pub fn sync_native_scroll(&mut self, position: f64) {
        self.slider.sync_native_scroll(position);
    }

    /// Thumbnail click. Returns true if the lightbox opened.
    pub fn activate(&mut self, index: usize) -> Result<bool, JsError> {
        self.open(index).map_err(|e| JsError::new(&e))
    }

    /// Dismisses the lightbox.
    #[wasm_bindgen(js_name = closeLightbox)]
    pub fn close_lightbox(&mut self) {
        self.slider.close_lightbox();
    }

    /// `keydown` while the lightbox is open.
    #[wasm_bindgen(js_name = handleKey)]
    pub fn handle_key(&mut self, key: &str) -> Result<JsValue, JsError> {
        to_js(&self.key(key))
    }

    /// Completed horizontal swipe inside the lightbox.
    #[wasm_bindgen(js_name = handleSwipe)]
    pub fn handle_swipe(&mut self, delta_x: f64) -> Result<JsValue, JsError> {
        to_js(&self.swipe(delta_x))
    }

    /// Thumbnail widths at `height`, in order.
    #[wasm_bindgen(js_name = thumbnailWidths)]
    pub fn thumbnail_widths(&self, height: f64) -> Vec<f64> {
        self.slider.thumbnail_widths(height)
    }
}

// ============================================================================
// Device probe
// ============================================================================

/// True when the device reports touch input (`navigator.maxTouchPoints > 0`
/// or an `ontouchstart` handler slot).
#[wasm_bindgen(js_name = isTouchDevice)]
pub fn is_touch_device() -> bool {
    let global = js_sys::global();
    let max_touch_points = js_sys::Reflect::get(&global, &JsValue::from_str("navigator"))
        .ok()
        .filter(|navigator| navigator.is_object())
        .and_then(|navigator| {
            js_sys::Reflect::get(&navigator, &JsValue::from_str("maxTouchPoints")).ok()
        })
        .and_then(|points| points.as_f64())
        .unwrap_or(0.0);
    max_touch_points > 0.0
        || js_sys::Reflect::has(&global, &JsValue::from_str("ontouchstart")).unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAYLOAD: &str = r#"[
        {"url":"/a.png","type":"image","width":1920,"height":1080,"alt":"A"},
        {"url":"/b.png","type":"image","width":1080,"height":1920},
        {"url":"/c.png","type":"image","width":1920,"height":1080}
    ]"#;

    #[test]
    fn starts_at_rest() {
        let controller = SliderController::from_payload(PAYLOAD, false).unwrap();
        assert_eq!(
            controller.snapshot(),
            SliderState {
                scroll_position: 0.0,
                selected_index: None,
                lightbox_index: None,
                native_scroll: false,
            }
        );
    }

    #[test]
    fn open_navigate_and_close() {
        let mut controller = SliderController::from_payload(PAYLOAD, true).unwrap();
        assert!(controller.open(1).unwrap());
        assert_eq!(controller.snapshot().selected_index, Some(1));

        assert_eq!(controller.key("ArrowRight"), LightboxUpdate::Navigated { index: 2 });
        assert_eq!(controller.key("ArrowRight"), LightboxUpdate::Navigated { index: 0 });
        assert_eq!(controller.key("Shift"), LightboxUpdate::Unchanged);
        assert_eq!(controller.snapshot().lightbox_index, Some(0));

        assert_eq!(controller.key("Escape"), LightboxUpdate::Closed);
        let state = controller.snapshot();
        assert_eq!(state.selected_index, None);
        assert_eq!(state.lightbox_index, None);
    }

    #[test]
    fn drag_does_not_open() {
        let mut controller = SliderController::from_payload(PAYLOAD, false).unwrap();
        controller.slider.update_metrics(400.0, 1200.0);
        controller.slider.pointer_down(300.0, 0.0);
        controller.slider.pointer_move(200.0, 16.0);
        controller.slider.pointer_up(20.0);
        assert!(!controller.open(0).unwrap());
        assert_eq!(controller.snapshot().scroll_position, 100.0);
        assert!(controller.open(0).unwrap());
    }

    #[test]
    fn slow_release_does_not_coast() {
        let mut controller = SliderController::from_payload(PAYLOAD, false).unwrap();
        controller.slider.update_metrics(400.0, 1200.0);
        controller.pointer_down(300.0, 0.0);
        controller.pointer_move(250.0, 16.0);
        controller.pointer_up(500.0);
        assert!(!controller.tick());
        assert_eq!(controller.snapshot().scroll_position, 50.0);
    }

    #[test]
    fn bad_payload_and_index_are_errors() {
        assert!(SliderController::from_payload("{", false).is_err());
        let mut controller = SliderController::from_payload(PAYLOAD, false).unwrap();
        let err = controller.open(7).unwrap_err();
        assert!(err.contains("out of range"), "{err}");
    }

    #[test]
    fn swipe_update_serializes_tagged() {
        let json = serde_json::to_string(&LightboxUpdate::Navigated { index: 1 }).unwrap();
        assert_eq!(json, r#"{"type":"navigated","index":1}"#);
    }
}
