//! Frameslide: Sliding Frame Windows for Calendar Views
//!
//! Manages a bounded, chronologically ordered window of time-indexed frames
//! (day, week or month panels). Frames are created lazily as navigation moves
//! the anchor time, activated and deactivated as the current frame changes,
//! and evicted by window trimming or by external purge requests.

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod frame;
pub mod gesture;
pub mod granularity;
pub mod logging;
pub mod navigation;
pub mod types;
pub mod view;

pub use display::{DisplaySurface, NullSurface, RecordingSurface};
pub use error::FrameError;
pub use frame::{Frame, FrameCollection, FrameFactory, FrameManager, FrameRequest, FrameState};
pub use gesture::{GestureAdapter, NavDirection, Swipe, SwipeDirection, WheelEvent};
pub use granularity::{Granularity, GranularityKind};
pub use navigation::{Navigator, TimeController, TimeEvent};
pub use types::{FrameKey, TimeSpan};
pub use view::FrameView;
