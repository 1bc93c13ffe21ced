//! Horizontally scrollable thumbnail strip that opens a lightbox on selection.

use super::lightbox::{Lightbox, LightboxEvent, LightboxKey};
use super::momentum::Momentum;
use super::{Attachment, GalleryError};

/// Pointer travel (px) beyond which a gesture is a drag rather than a click.
pub const DRAG_CLICK_TOLERANCE: f64 = 5.0;

/// Default strip height in CSS pixels.
pub const DEFAULT_SLIDER_HEIGHT: f64 = 320.0;

/// Who moves the strip.
#[derive(Debug, Clone, PartialEq)]
pub enum ScrollDriver {
    /// Pointer drags and flicks run through in-process physics.
    Momentum(Momentum),
    /// The device scrolls natively; the slider only mirrors the position.
    Native,
}

impl ScrollDriver {
    /// Touch devices already have native momentum; everything else gets physics.
    pub fn for_device(touch_capable: bool) -> Self {
        if touch_capable {
            Self::Native
        } else {
            Self::Momentum(Momentum::default())
        }
    }

    /// True for the native driver.
    pub fn is_native(&self) -> bool {
        matches!(self, Self::Native)
    }
}

/// Measured sizes that bound scrolling.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Metrics {
    /// Visible width of the scroll container.
    pub viewport_width: f64,
    /// Full width of the thumbnail row.
    pub content_width: f64,
}

impl Metrics {
    /// Largest valid scroll offset.
    pub fn max_scroll(&self) -> f64 {
        (self.content_width - self.viewport_width).max(0.0)
    }
}

/// View state of one slider instance.
#[derive(Debug, Clone)]
pub struct Slider {
    attachments: Vec<Attachment>,
    driver: ScrollDriver,
    metrics: Metrics,
    scroll_position: f64,
    selected_index: Option<usize>,
    lightbox: Option<Lightbox>,
    pointer_origin: Option<f64>,
    gesture_distance: f64,
    suppress_click: bool,
}

impl Slider {
    /// Creates a slider at rest: position 0, nothing selected.
    pub fn new(attachments: Vec<Attachment>, driver: ScrollDriver) -> Self {
        Self {
            attachments,
            driver,
            metrics: Metrics::default(),
            scroll_position: 0.0,
            selected_index: None,
            lightbox: None,
            pointer_origin: None,
            gesture_distance: 0.0,
            suppress_click: false,
        }
    }

    /// Current horizontal scroll offset.
    pub fn scroll_position(&self) -> f64 {
        self.scroll_position
    }

    /// Index of the thumbnail whose lightbox is open.
    pub fn selected_index(&self) -> Option<usize> {
        self.selected_index
    }

    /// The open lightbox, if any.
    pub fn lightbox(&self) -> Option<&Lightbox> {
        self.lightbox.as_ref()
    }

    /// Items in display order.
    pub fn attachments(&self) -> &[Attachment] {
        &self.attachments
    }

    /// Active scroll driver.
    pub fn driver(&self) -> &ScrollDriver {
        &self.driver
    }

    /// Last measured metrics.
    pub fn metrics(&self) -> Metrics {
        self.metrics
    }

    /// Recomputes scroll bounds after any layout change and re-clamps.
    ///
    /// Must run whenever the container or the thumbnail row resizes, not only
    /// on window resize: thumbnail widths depend on loaded content.
    pub fn update_metrics(&mut self, viewport_width: f64, content_width: f64) {
        self.metrics = Metrics {
            viewport_width: viewport_width.max(0.0),
            content_width: content_width.max(0.0),
        };
        let target = self.scroll_position;
        self.move_to(target);
    }

    /// Begins a pointer gesture. `time_ms` is the event timestamp.
    pub fn pointer_down(&mut self, pointer_x: f64, time_ms: f64) {
        self.pointer_origin = Some(pointer_x);
        self.gesture_distance = 0.0;
        self.suppress_click = false;
        if let ScrollDriver::Momentum(momentum) = &mut self.driver {
            momentum.pointer_down(pointer_x, self.scroll_position, time_ms);
        }
    }

    /// Continues a pointer gesture.
    pub fn pointer_move(&mut self, pointer_x: f64, time_ms: f64) {
        let Some(origin) = self.pointer_origin else {
            return;
        };
        self.gesture_distance = self.gesture_distance.max((pointer_x - origin).abs());
        let target = match &mut self.driver {
            ScrollDriver::Momentum(momentum) => momentum.pointer_move(pointer_x, time_ms),
            ScrollDriver::Native => None,
        };
        if let Some(target) = target {
            self.move_to(target);
        }
    }

    /// Ends a pointer gesture; a flick keeps coasting on subsequent ticks.
    ///
    /// A gesture that travelled past [`DRAG_CLICK_TOLERANCE`] swallows the
    /// click that follows it.
    pub fn pointer_up(&mut self, time_ms: f64) {
        if self.pointer_origin.take().is_some() {
            self.suppress_click = self.gesture_distance > DRAG_CLICK_TOLERANCE;
        }
        if let ScrollDriver::Momentum(momentum) = &mut self.driver {
            momentum.pointer_up(time_ms);
        }
    }

    /// Advances momentum by one frame. Returns true while still moving.
    pub fn tick(&mut self) -> bool {
        let next = match &mut self.driver {
            ScrollDriver::Momentum(momentum) => momentum.step(self.scroll_position),
            ScrollDriver::Native => None,
        };
        match next {
            Some(target) => {
                self.move_to(target);
                match &self.driver {
                    ScrollDriver::Momentum(momentum) => momentum.is_coasting(),
                    ScrollDriver::Native => false,
                }
            }
            None => false,
        }
    }

    /// Mirrors a position reported by the browser's own scrolling.
    pub fn sync_native_scroll(&mut self, position: f64) {
        self.move_to(position);
    }

    /// Activates the thumbnail at `index`, opening the lightbox there.
    ///
    /// The click that ends a drag is not an activation and yields `Ok(None)`;
    /// later activations (keyboard, another click) go through.
    pub fn activate(&mut self, index: usize) -> Result<Option<&Lightbox>, GalleryError> {
        if std::mem::take(&mut self.suppress_click) {
            return Ok(None);
        }
        let lightbox = Lightbox::open(self.attachments.clone(), index)?;
        self.selected_index = Some(index);
        self.lightbox = Some(lightbox);
        Ok(self.lightbox.as_ref())
    }

    /// Closes the lightbox and clears the selection.
    pub fn close_lightbox(&mut self) {
        self.lightbox = None;
        self.selected_index = None;
    }

    /// Forwards a key to the open lightbox, closing it on `Escape`.
    pub fn handle_lightbox_key(&mut self, key: LightboxKey) -> LightboxEvent {
        let event = match self.lightbox.as_mut() {
            Some(lightbox) => lightbox.handle_key(key),
            None => LightboxEvent::Unchanged,
        };
        self.apply_lightbox_event(event)
    }

    /// Forwards a swipe to the open lightbox.
    pub fn handle_lightbox_swipe(&mut self, delta_x: f64) -> LightboxEvent {
        let event = match self.lightbox.as_mut() {
            Some(lightbox) => lightbox.handle_swipe(delta_x),
            None => LightboxEvent::Unchanged,
        };
        self.apply_lightbox_event(event)
    }

    fn apply_lightbox_event(&mut self, event: LightboxEvent) -> LightboxEvent {
        if event == LightboxEvent::Closed {
            self.close_lightbox();
        }
        event
    }

    /// Rendered widths of every thumbnail at `height`.
    pub fn thumbnail_widths(&self, height: f64) -> Vec<f64> {
        self.attachments
            .iter()
            .map(|attachment| height * attachment.thumbnail_aspect_ratio())
            .collect()
    }

    /// Width of the thumbnail row at `height` with `gap` between items.
    pub fn content_width(&self, height: f64, gap: f64) -> f64 {
        let widths: f64 = self.thumbnail_widths(height).iter().sum();
        let gaps = self.attachments.len().saturating_sub(1) as f64 * gap;
        widths + gaps
    }

    fn move_to(&mut self, target: f64) {
        let clamped = if target.is_nan() {
            0.0
        } else {
            target.clamp(0.0, self.metrics.max_scroll())
        };
        if clamped != target
            && let ScrollDriver::Momentum(momentum) = &mut self.driver
            && !momentum.is_dragging()
        {
            momentum.stop();
        }
        self.scroll_position = clamped;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn images(n: usize) -> Vec<Attachment> {
        (0..n)
            .map(|i| {
                Attachment::image(format!("/img-{i}.jpg"), Some(format!("Image {i}")), None, None)
            })
            .collect()
    }

    fn desktop_slider(n: usize) -> Slider {
        let mut slider = Slider::new(images(n), ScrollDriver::for_device(false));
        slider.update_metrics(600.0, 1500.0);
        slider
    }

    #[test]
    fn starts_at_rest() {
        let slider = Slider::new(images(3), ScrollDriver::for_device(false));
        assert_eq!(slider.scroll_position(), 0.0);
        assert_eq!(slider.selected_index(), None);
        assert!(slider.lightbox().is_none());
    }

    #[test]
    fn clicking_second_thumbnail_opens_lightbox_there() {
        let mut slider = desktop_slider(3);
        slider.pointer_down(100.0, 0.0);
        slider.pointer_up(80.0);

        let lightbox = slider.activate(1).unwrap().expect("click should open lightbox");
        assert_eq!(lightbox.index(), 1);
        assert_eq!(lightbox.len(), 3);
        assert_eq!(slider.selected_index(), Some(1));

        slider.close_lightbox();
        assert_eq!(slider.selected_index(), None);
        assert!(slider.lightbox().is_none());
    }

    #[test]
    fn reopening_yields_identical_state() {
        let mut slider = desktop_slider(3);
        let first = slider.activate(2).unwrap().cloned();
        slider.handle_lightbox_key(LightboxKey::ArrowRight);
        slider.close_lightbox();
        let second = slider.activate(2).unwrap().cloned();
        assert_eq!(first, second);
    }

    #[test]
    fn escape_in_lightbox_clears_selection() {
        let mut slider = desktop_slider(3);
        slider.activate(0).unwrap();
        assert_eq!(
            slider.handle_lightbox_key(LightboxKey::Escape),
            LightboxEvent::Closed
        );
        assert_eq!(slider.selected_index(), None);
    }

    #[test]
    fn drag_is_not_a_click() {
        let mut slider = desktop_slider(3);
        slider.pointer_down(400.0, 0.0);
        slider.pointer_move(300.0, 16.0);
        slider.pointer_up(20.0);
        assert_eq!(slider.scroll_position(), 100.0);
        assert!(slider.activate(1).unwrap().is_none());
        assert_eq!(slider.selected_index(), None);
    }

    #[test]
    fn only_the_click_ending_a_drag_is_swallowed() {
        let mut slider = desktop_slider(3);
        slider.pointer_down(400.0, 0.0);
        slider.pointer_move(300.0, 16.0);
        slider.pointer_up(20.0);
        while slider.tick() {}

        assert!(slider.activate(1).unwrap().is_none());
        // Keyboard activation of a focused thumbnail.
        assert!(slider.activate(1).unwrap().is_some());
        assert_eq!(slider.selected_index(), Some(1));
    }

    #[test]
    fn out_of_range_activation_errors() {
        let mut slider = desktop_slider(3);
        assert_eq!(
            slider.activate(3).unwrap_err(),
            GalleryError::IndexOutOfRange { index: 3, len: 3 }
        );
        assert_eq!(slider.selected_index(), None);
    }

    #[test]
    fn scrolling_is_clamped_to_content() {
        let mut slider = desktop_slider(3);
        slider.pointer_down(0.0, 0.0);
        slider.pointer_move(-5_000.0, 16.0);
        assert_eq!(slider.scroll_position(), 900.0);
        slider.pointer_move(5_000.0, 32.0);
        assert_eq!(slider.scroll_position(), 0.0);
        slider.pointer_up(40.0);
    }

    #[test]
    fn flick_coasts_until_bound() {
        let mut slider = desktop_slider(3);
        slider.pointer_down(500.0, 0.0);
        slider.pointer_move(440.0, 16.0);
        slider.pointer_up(24.0);

        let mut frames = 0;
        while slider.tick() {
            frames += 1;
            assert!(frames < 1_000);
        }
        assert!(slider.scroll_position() > 60.0);
        assert!(slider.scroll_position() <= slider.metrics().max_scroll());
    }

    #[test]
    fn held_drag_stays_where_released() {
        let mut slider = desktop_slider(3);
        slider.pointer_down(500.0, 0.0);
        slider.pointer_move(440.0, 16.0);
        slider.pointer_up(400.0);
        assert!(!slider.tick());
        assert_eq!(slider.scroll_position(), 60.0);
    }

    #[test]
    fn shrinking_content_reclamps_position() {
        let mut slider = desktop_slider(3);
        slider.sync_native_scroll(800.0);
        assert_eq!(slider.scroll_position(), 800.0);
        slider.update_metrics(600.0, 1000.0);
        assert_eq!(slider.scroll_position(), 400.0);
        slider.update_metrics(1200.0, 1000.0);
        assert_eq!(slider.scroll_position(), 0.0);
    }

    #[test]
    fn native_driver_ignores_pointer_scrolling() {
        let mut slider = Slider::new(images(3), ScrollDriver::for_device(true));
        slider.update_metrics(600.0, 1500.0);
        assert!(slider.driver().is_native());
        slider.pointer_down(400.0, 0.0);
        slider.pointer_move(200.0, 16.0);
        slider.pointer_up(20.0);
        assert_eq!(slider.scroll_position(), 0.0);
        assert!(!slider.tick());

        slider.sync_native_scroll(250.0);
        assert_eq!(slider.scroll_position(), 250.0);
    }

    #[test]
    fn content_width_uses_clamped_thumbnails() {
        let slider = Slider::new(
            vec![
                Attachment::image("/tall.jpg", None, Some(100), Some(1000)),
                Attachment::image("/wide.jpg", None, Some(1600), Some(900)),
            ],
            ScrollDriver::Native,
        );
        let widths = slider.thumbnail_widths(DEFAULT_SLIDER_HEIGHT);
        assert!((widths[0] - DEFAULT_SLIDER_HEIGHT * 19.0 / 5.0 / 9.0).abs() < 1e-9);
        assert!((widths[1] - DEFAULT_SLIDER_HEIGHT * 16.0 / 9.0).abs() < 1e-9);
        let total = slider.content_width(DEFAULT_SLIDER_HEIGHT, 8.0);
        assert!((total - (widths[0] + widths[1] + 8.0)).abs() < 1e-9);
    }
}
