//! Drag-and-flick physics for the horizontal strip.
//!
//! Positions here are unclamped; the slider owns the bounds and calls
//! [`Momentum::stop`] when a frame runs into one.

/// Fraction of velocity lost per animation frame.
pub const DEFAULT_FRICTION: f64 = 0.05;

/// Below this speed (px/frame) the strip is considered at rest.
const REST_VELOCITY: f64 = 0.1;

/// A release more than this long (ms) after the last move is a hold, not a
/// flick.
pub const FLICK_WINDOW_MS: f64 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq)]
struct Drag {
    pointer_origin: f64,
    position_origin: f64,
    last_pointer: f64,
    last_time: f64,
}

/// Pointer-driven scroll with exponential velocity decay after release.
#[derive(Debug, Clone, PartialEq)]
pub struct Momentum {
    friction: f64,
    velocity: f64,
    drag: Option<Drag>,
}

impl Momentum {
    /// Creates a driver with the given per-frame friction in `(0, 1]`.
    pub fn new(friction: f64) -> Self {
        Self {
            friction: friction.clamp(f64::EPSILON, 1.0),
            velocity: 0.0,
            drag: None,
        }
    }

    /// Current velocity in px/frame; positive scrolls towards the end.
    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    /// True between pointer down and pointer up.
    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// True while a released flick is still coasting.
    pub fn is_coasting(&self) -> bool {
        self.drag.is_none() && self.velocity.abs() >= REST_VELOCITY
    }

    /// Starts a drag at `pointer_x` with the strip currently at `position`.
    ///
    /// Times are event timestamps in milliseconds.
    pub fn pointer_down(&mut self, pointer_x: f64, position: f64, time_ms: f64) {
        self.velocity = 0.0;
        self.drag = Some(Drag {
            pointer_origin: pointer_x,
            position_origin: position,
            last_pointer: pointer_x,
            last_time: time_ms,
        });
    }

    /// Moves the drag; returns the position the strip should follow.
    ///
    /// Dragging right moves content right, i.e. scrolls back towards zero.
    pub fn pointer_move(&mut self, pointer_x: f64, time_ms: f64) -> Option<f64> {
        let drag = self.drag.as_mut()?;
        self.velocity = drag.last_pointer - pointer_x;
        drag.last_pointer = pointer_x;
        drag.last_time = time_ms;
        Some(drag.position_origin - (pointer_x - drag.pointer_origin))
    }

    /// Ends the drag; the last move's velocity carries on as momentum unless
    /// the pointer was held still for longer than [`FLICK_WINDOW_MS`].
    pub fn pointer_up(&mut self, time_ms: f64) {
        let held = self
            .drag
            .take()
            .is_some_and(|drag| time_ms - drag.last_time > FLICK_WINDOW_MS);
        if held || self.velocity.abs() < REST_VELOCITY {
            self.velocity = 0.0;
        }
    }

    /// Advances one animation frame from `position`.
    ///
    /// Returns the next position, or `None` once the strip is at rest or a
    /// drag is in progress.
    pub fn step(&mut self, position: f64) -> Option<f64> {
        if self.drag.is_some() || !self.is_coasting() {
            self.velocity = 0.0;
            return None;
        }
        let next = position + self.velocity;
        self.velocity *= 1.0 - self.friction;
        Some(next)
    }

    /// Kills any remaining velocity.
    pub fn stop(&mut self) {
        self.velocity = 0.0;
    }
}

impl Default for Momentum {
    fn default() -> Self {
        Self::new(DEFAULT_FRICTION)
    }
}
