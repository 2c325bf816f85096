//! Gesture Classification
//!
//! Turns already-recognised swipe and wheel input into a navigation direction.
//! Near-vertical swipes and non-page wheel deltas are rejected so the input
//! router can fall back to default scrolling.

use crate::error::FrameError;
use serde::{Deserialize, Serialize};

pub const DEFAULT_OFFSET_THRESHOLD: f64 = 8.0;

/// Direction of travel through time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NavDirection {
    Forward,
    Backward,
}

/// Horizontal direction reported by the swipe recogniser
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SwipeDirection {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Swipe {
    pub dx: f64,
    pub dy: f64,
    pub direction: SwipeDirection,
}

/// Unit of a wheel delta
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeltaMode {
    Pixel,
    Line,
    Page,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WheelEvent {
    pub delta_mode: DeltaMode,
    pub delta_x: f64,
    pub delta_y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureAdapter {
    offset_threshold: f64,
}

impl Default for GestureAdapter {
    fn default() -> Self {
        GestureAdapter {
            offset_threshold: DEFAULT_OFFSET_THRESHOLD,
        }
    }
}

impl GestureAdapter {
    /// Fails with [`FrameError::InvalidThreshold`] unless the threshold is
    /// finite and non-negative.
    pub fn new(offset_threshold: f64) -> Result<Self, FrameError> {
        if !offset_threshold.is_finite() || offset_threshold < 0.0 {
            return Err(FrameError::InvalidThreshold(offset_threshold));
        }
        Ok(GestureAdapter { offset_threshold })
    }

    pub fn offset_threshold(&self) -> f64 {
        self.offset_threshold
    }

    /// A swipe navigates unless `|dy| > |dx| - offset_threshold`.
    /// Swiping left moves forward in time. Non-finite deltas never navigate.
    pub fn classify_swipe(&self, swipe: &Swipe) -> Option<NavDirection> {
        if !swipe.dx.is_finite() || !swipe.dy.is_finite() {
            return None;
        }
        if swipe.dy.abs() > swipe.dx.abs() - self.offset_threshold {
            return None;
        }
        match swipe.direction {
            SwipeDirection::Left => Some(NavDirection::Forward),
            SwipeDirection::Right => Some(NavDirection::Backward),
        }
    }

    /// Only page-mode wheel events with a horizontal component navigate.
    pub fn classify_wheel(&self, event: &WheelEvent) -> Option<NavDirection> {
        if event.delta_mode != DeltaMode::Page
            || event.delta_x == 0.0
            || !event.delta_x.is_finite()
        {
            return None;
        }
        if event.delta_x > 0.0 {
            Some(NavDirection::Forward)
        } else {
            Some(NavDirection::Backward)
        }
    }
}
