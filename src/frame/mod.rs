//! Calendar Frames
//!
//! A frame is one renderable time unit (a day, week or month panel). Frames are
//! produced by a [`FrameFactory`] and owned exclusively by the
//! [`FrameManager`], which drives their lifecycle.

pub mod collection;
pub mod manager;

pub use collection::FrameCollection;
pub use manager::FrameManager;

use crate::error::FrameError;
use crate::types::{FrameKey, TimeSpan};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Lifecycle state of a managed frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FrameState {
    Created,
    Active,
    Inactive,
    Destroyed,
}

impl FrameState {
    pub fn as_str(self) -> &'static str {
        match self {
            FrameState::Created => "created",
            FrameState::Active => "active",
            FrameState::Inactive => "inactive",
            FrameState::Destroyed => "destroyed",
        }
    }
}

/// Capabilities the manager requires of a frame.
///
/// Over a frame's lifetime the manager calls `create` once right after
/// construction, any number of `activate`/`deactivate` pairs, and `destroy`
/// once as the terminal call. The frame is dropped right after `destroy`.
pub trait Frame {
    fn create(&mut self);

    fn activate(&mut self);

    fn deactivate(&mut self);

    fn destroy(&mut self);

    fn scroll_offset(&self) -> f64;

    fn set_scroll_offset(&mut self, offset: f64);

    /// The span of time this frame renders. Used to match purge requests.
    fn timespan(&self) -> TimeSpan;
}

/// Everything a factory needs to build one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameRequest {
    /// Anchor time of the transition that asked for this frame
    pub anchor: NaiveDate,
    /// Time the frame is built for
    pub time: NaiveDate,
    pub key: FrameKey,
    pub span: TimeSpan,
}

/// Produces frames on demand.
pub trait FrameFactory {
    type Frame: Frame;

    fn build(&mut self, request: &FrameRequest) -> Result<Self::Frame, FrameError>;
}

impl<F, Fr> FrameFactory for F
where
    F: FnMut(&FrameRequest) -> Result<Fr, FrameError>,
    Fr: Frame,
{
    type Frame = Fr;

    fn build(&mut self, request: &FrameRequest) -> Result<Fr, FrameError> {
        self(request)
    }
}

/// Frame entry as stored in the collection: the frame plus its tracked state.
#[derive(Debug)]
pub struct ManagedFrame<F> {
    frame: F,
    state: FrameState,
    time: NaiveDate,
}

impl<F: Frame> ManagedFrame<F> {
    pub(crate) fn new(frame: F, time: NaiveDate) -> Self {
        ManagedFrame {
            frame,
            state: FrameState::Created,
            time,
        }
    }

    pub fn frame(&self) -> &F {
        &self.frame
    }

    pub(crate) fn frame_mut(&mut self) -> &mut F {
        &mut self.frame
    }

    pub fn state(&self) -> FrameState {
        self.state
    }

    /// Time the frame was first requested for.
    pub fn time(&self) -> NaiveDate {
        self.time
    }

    pub fn timespan(&self) -> TimeSpan {
        self.frame.timespan()
    }

    pub(crate) fn create(&mut self) {
        self.frame.create();
        self.state = FrameState::Created;
    }

    pub(crate) fn activate(&mut self) {
        if self.state != FrameState::Active {
            self.frame.activate();
            self.state = FrameState::Active;
        }
    }

    pub(crate) fn deactivate(&mut self) {
        if self.state == FrameState::Active {
            self.frame.deactivate();
            self.state = FrameState::Inactive;
        }
    }

    /// Terminal call; consumes the entry so it can never be reached again.
    pub(crate) fn destroy(mut self) {
        self.frame.destroy();
    }

    pub(crate) fn scroll_offset(&self) -> f64 {
        self.frame.scroll_offset()
    }

    pub(crate) fn set_scroll_offset(&mut self, offset: f64) {
        self.frame.set_scroll_offset(offset);
    }
}
