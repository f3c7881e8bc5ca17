//! Latency range slider: position/value mapping and the drag session.
//!
//! The slider keeps a `[min, max]` window inside a fixed bound. Dragging is an
//! explicit state machine: a press enters `Dragging`, every pointer move
//! produces a new live range, and a release always returns to `Idle`.

use crate::model::{ConsoleError, LatencyRange};
use serde::{Deserialize, Serialize};

/// Lower bound of every latency window (30ms).
pub const LATENCY_MIN_MS: u32 = 30;
/// Upper bound of every latency window (30s).
pub const LATENCY_MAX_MS: u32 = 30_000;

const SPAN: f64 = (LATENCY_MAX_MS - LATENCY_MIN_MS) as f64;

/// Map a value to its position along the track, in percent.
pub fn value_to_percent(value: u32) -> f64 {
    (value as f64 - LATENCY_MIN_MS as f64) / SPAN * 100.0
}

/// Map a track position in percent to a value, rounded to the millisecond.
pub fn percent_to_value(percent: f64) -> u32 {
    let p = if percent.is_nan() { 0.0 } else { percent.clamp(0.0, 100.0) };
    (p / 100.0 * SPAN + LATENCY_MIN_MS as f64).round() as u32
}

/// Horizontal bounding box of the slider track, in client pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrackRect {
    pub left: f64,
    pub width: f64,
}

impl TrackRect {
    /// Value under the cursor.
    pub fn value_at(&self, client_x: f64) -> u32 {
        if self.width <= 0.0 || !self.width.is_finite() {
            return LATENCY_MIN_MS;
        }
        percent_to_value((client_x - self.left) / self.width * 100.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Handle {
    Min,
    Max,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragState {
    Idle,
    Dragging { handle: Handle, track: TrackRect },
}

/// One latency slider with its current window and drag session.
#[derive(Debug, Clone)]
pub struct LatencySlider {
    range: LatencyRange,
    drag: DragState,
}

impl LatencySlider {
    pub fn new(range: LatencyRange) -> Self {
        Self {
            range,
            drag: DragState::Idle,
        }
    }

    pub fn range(&self) -> LatencyRange {
        self.range
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.drag, DragState::Dragging { .. })
    }

    /// Replace the window outright.
    pub fn set_range(&mut self, min: u32, max: u32) -> Result<LatencyRange, ConsoleError> {
        if min < LATENCY_MIN_MS || max > LATENCY_MAX_MS || min > max {
            return Err(ConsoleError::invalid("latency"));
        }
        self.range = LatencyRange { min, max };
        Ok(self.range)
    }

    /// Begin dragging `handle`. A press during an active drag starts over.
    pub fn press(&mut self, handle: Handle, track: TrackRect) {
        self.drag = DragState::Dragging { handle, track };
    }

    /// Track a pointer move. Returns the new window while dragging.
    ///
    /// The dragged handle is clamped against the other handle's current
    /// value, so `min <= max` holds after every move.
    pub fn move_to(&mut self, client_x: f64) -> Option<LatencyRange> {
        let DragState::Dragging { handle, track } = self.drag else {
            return None;
        };

        let value = track.value_at(client_x);
        match handle {
            Handle::Min => self.range.min = value.min(self.range.max),
            Handle::Max => self.range.max = value.max(self.range.min),
        }
        Some(self.range)
    }

    /// End the drag, wherever the pointer is.
    pub fn release(&mut self) {
        self.drag = DragState::Idle;
    }

    /// Track position of both handles, in percent.
    pub fn percents(&self) -> (f64, f64) {
        (value_to_percent(self.range.min), value_to_percent(self.range.max))
    }
}
