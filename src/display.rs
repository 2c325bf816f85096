//! Display Surface
//!
//! The surface frame elements are attached to. The manager only ever attaches;
//! an element leaves the surface when its frame is destroyed.

use crate::types::FrameKey;

pub trait DisplaySurface {
    /// Attach the element of frame `key` at `position` among attached elements.
    fn attach(&mut self, key: FrameKey, position: usize);
}

/// Surface that discards attachments. Useful for headless views.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSurface;

impl DisplaySurface for NullSurface {
    fn attach(&mut self, _key: FrameKey, _position: usize) {}
}

/// Surface that keeps the attachment log, in call order.
#[derive(Debug, Default, Clone)]
pub struct RecordingSurface {
    attached: Vec<(FrameKey, usize)>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attached(&self) -> &[(FrameKey, usize)] {
        &self.attached
    }
}

impl DisplaySurface for RecordingSurface {
    fn attach(&mut self, key: FrameKey, position: usize) {
        self.attached.push((key, position));
    }
}
