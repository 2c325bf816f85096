//! Frame Lifecycle Manager
//!
//! Owns the frame collection and decides which frames exist. A date change
//! keeps the previous, current and next frames alive, activates the current
//! one, and trims everything outside the current ± 1 window once the
//! collection grows past the retention bound. Purge requests evict frames
//! whose span falls inside a given time span, independent of the bound.
//!
//! All operations run synchronously to completion; the manager is not
//! reentrant.

use crate::display::DisplaySurface;
use crate::error::FrameError;
use crate::frame::{FrameCollection, FrameFactory, FrameRequest, FrameState, ManagedFrame};
use crate::granularity::Granularity;
use crate::types::{FrameKey, TimeSpan};
use chrono::NaiveDate;
use tracing::{debug, warn};

/// Number of frames kept by a trim: current and its two neighbours.
pub const KEEP_WINDOW: usize = 3;

pub const DEFAULT_RETENTION_BOUND: usize = 5;

type Entry<Fa> = ManagedFrame<<Fa as FrameFactory>::Frame>;

pub struct FrameManager<Fa: FrameFactory, S: DisplaySurface> {
    granularity: Granularity,
    factory: Fa,
    surface: S,
    frames: FrameCollection<Entry<Fa>>,
    anchor: Option<NaiveDate>,
    current: Option<FrameKey>,
    retention_bound: usize,
}

impl<Fa: FrameFactory, S: DisplaySurface> FrameManager<Fa, S> {
    pub fn new(
        granularity: Granularity,
        factory: Fa,
        surface: S,
        retention_bound: usize,
    ) -> Result<Self, FrameError> {
        if retention_bound < KEEP_WINDOW {
            return Err(FrameError::InvalidRetention {
                bound: retention_bound,
                window: KEEP_WINDOW,
            });
        }

        Ok(FrameManager {
            granularity,
            factory,
            surface,
            frames: FrameCollection::new(),
            anchor: None,
            current: None,
            retention_bound,
        })
    }

    /// Move the manager to `time`.
    ///
    /// Order of effects: deactivate the old current frame (capturing its
    /// scroll offset), create any missing previous/current/next frames,
    /// activate the frame for `time` and restore the offset onto it, then trim.
    /// Returns the key of the new current frame.
    ///
    /// If the factory fails, the frames created by this call are destroyed
    /// again and the old current frame and anchor are restored before the
    /// error is returned.
    pub fn change_date(&mut self, time: NaiveDate) -> Result<FrameKey, FrameError> {
        let old_anchor = self.anchor;
        let old_current = self.current.take();
        let mut scroll_offset = None;
        if let Some(old_key) = old_current {
            if let Some(entry) = self.frames.get_mut(&old_key) {
                scroll_offset = Some(entry.scroll_offset());
                entry.deactivate();
            }
        }

        self.anchor = Some(time);
        let previous = self.granularity.previous(time);
        let next = self.granularity.next(time);

        let mut created = Vec::with_capacity(KEEP_WINDOW);
        let key = match self.ensure_window([previous, time, next], &mut created) {
            Ok(key) => key,
            Err(e) => {
                self.roll_back(created, old_current, old_anchor);
                return Err(e);
            }
        };

        let entry = self
            .frames
            .get_mut(&key)
            .ok_or(FrameError::FrameNotFound(key))?;
        entry.activate();
        if let Some(offset) = scroll_offset {
            entry.set_scroll_offset(offset);
        }
        self.current = Some(key);

        debug!(
            time = %time,
            key = %key,
            previous = %previous,
            next = %next,
            "Changed date"
        );

        self.trim_frames();
        Ok(key)
    }

    /// Return the frame for `time`, creating and attaching it if needed.
    ///
    /// Calling this again with a time that maps to the same key returns the
    /// existing frame without touching its lifecycle.
    pub fn add_frame(&mut self, time: NaiveDate) -> Result<&Fa::Frame, FrameError> {
        let (key, _) = self.ensure_frame(time)?;
        self.frame(&key).ok_or(FrameError::FrameNotFound(key))
    }

    /// Ensure frames for previous, current and next; returns the middle key.
    /// Keys of frames built here are pushed onto `created`.
    fn ensure_window(
        &mut self,
        times: [NaiveDate; 3],
        created: &mut Vec<FrameKey>,
    ) -> Result<FrameKey, FrameError> {
        let mut keys = [FrameKey(0); 3];
        for (slot, time) in keys.iter_mut().zip(times) {
            let (key, fresh) = self.ensure_frame(time)?;
            if fresh {
                created.push(key);
            }
            *slot = key;
        }
        Ok(keys[1])
    }

    /// Undo a failed `change_date`.
    fn roll_back(
        &mut self,
        created: Vec<FrameKey>,
        old_current: Option<FrameKey>,
        old_anchor: Option<NaiveDate>,
    ) {
        let destroyed = created.len();
        for key in created.into_iter().rev() {
            if let Some(entry) = self.frames.remove(&key) {
                entry.destroy();
            }
        }

        self.anchor = old_anchor;
        if let Some(key) = old_current {
            if let Some(entry) = self.frames.get_mut(&key) {
                entry.activate();
                self.current = Some(key);
            }
        }
        debug!(destroyed, "Rolled back failed date change");
    }

    /// Returns the key and whether the frame was built by this call.
    fn ensure_frame(&mut self, time: NaiveDate) -> Result<(FrameKey, bool), FrameError> {
        let key = self.granularity.identity(time);
        if self.frames.contains(&key) {
            return Ok((key, false));
        }

        let request = FrameRequest {
            anchor: self.anchor.unwrap_or(time),
            time,
            key,
            span: self.granularity.span(time),
        };
        let frame = self.factory.build(&request).map_err(|e| {
            warn!(key = %key, time = %time, error = %e, "Frame factory failed");
            e
        })?;

        let mut entry = ManagedFrame::new(frame, time);
        entry.create();

        let position = self.frames.position_for(&key);
        self.frames.insert_at(position, key, entry)?;
        self.surface.attach(key, position);

        debug!(key = %key, time = %time, position, "Frame created");
        Ok((key, true))
    }

    /// Evict every frame outside the current ± 1 window once the collection
    /// exceeds the retention bound. Returns the destroyed keys in order.
    ///
    /// The window starts one before the current frame (or at index 0 when
    /// there is no current frame) and spans [`KEEP_WINDOW`] entries.
    pub fn trim_frames(&mut self) -> Vec<FrameKey> {
        let len = self.frames.len();
        if len <= self.retention_bound {
            return Vec::new();
        }

        let keep_start = self
            .current
            .and_then(|key| self.frames.index_of(&key))
            .map(|index| index.saturating_sub(1))
            .unwrap_or(0);
        let keep_end = (keep_start + KEEP_WINDOW).min(len);

        // Tail first so the head indices stay valid.
        let tail = self.frames.remove_range(keep_end, len - keep_end);
        let head = self.frames.remove_range(0, keep_start);

        let evicted = self.destroy_entries(head.into_iter().chain(tail));
        debug!(
            evicted = evicted.len(),
            retained = self.frames.len(),
            "Trimmed frames"
        );
        evicted
    }

    /// Destroy and remove every frame whose span lies fully inside `span`.
    ///
    /// Frames that only overlap `span` are kept. If the current frame is
    /// purged the manager is left without a current frame until the next
    /// [`change_date`](Self::change_date).
    pub fn purge_frames(&mut self, span: &TimeSpan) -> Vec<FrameKey> {
        let doomed: Vec<FrameKey> = self
            .frames
            .iter()
            .filter(|(_, entry)| span.contains_span(&entry.timespan()))
            .map(|(key, _)| *key)
            .collect();

        let mut removed = Vec::with_capacity(doomed.len());
        for key in doomed {
            if let Some(entry) = self.frames.remove(&key) {
                if self.current == Some(key) {
                    self.current = None;
                }
                entry.destroy();
                removed.push(key);
            }
        }

        if !removed.is_empty() {
            debug!(span = %span, purged = removed.len(), "Purged frames");
        }
        removed
    }

    /// Destroy every frame. The anchor is kept.
    pub fn clear(&mut self) -> Vec<FrameKey> {
        self.current = None;
        let entries = self.frames.drain_all();
        self.destroy_entries(entries)
    }

    fn destroy_entries(
        &mut self,
        entries: impl IntoIterator<Item = (FrameKey, Entry<Fa>)>,
    ) -> Vec<FrameKey> {
        entries
            .into_iter()
            .map(|(key, entry)| {
                if self.current == Some(key) {
                    self.current = None;
                }
                entry.destroy();
                key
            })
            .collect()
    }

    pub fn anchor(&self) -> Option<NaiveDate> {
        self.anchor
    }

    pub fn current_key(&self) -> Option<FrameKey> {
        self.current
    }

    pub fn current(&self) -> Option<&Fa::Frame> {
        self.current.and_then(|key| self.frame(&key))
    }

    pub fn current_mut(&mut self) -> Option<&mut Fa::Frame> {
        let key = self.current?;
        self.frame_mut(&key)
    }

    pub fn frame(&self, key: &FrameKey) -> Option<&Fa::Frame> {
        self.frames.get(key).map(|entry| entry.frame())
    }

    /// Mutable access to a frame's own data. Lifecycle calls stay with the
    /// manager.
    pub fn frame_mut(&mut self, key: &FrameKey) -> Option<&mut Fa::Frame> {
        self.frames.get_mut(key).map(|entry| entry.frame_mut())
    }

    pub fn state(&self, key: &FrameKey) -> Option<FrameState> {
        self.frames.get(key).map(|entry| entry.state())
    }

    /// Retained entries in chronological order.
    pub fn entries(&self) -> impl Iterator<Item = (&FrameKey, &Entry<Fa>)> {
        self.frames.iter()
    }

    pub fn keys(&self) -> Vec<FrameKey> {
        self.frames.keys().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn retention_bound(&self) -> usize {
        self.retention_bound
    }

    pub fn granularity(&self) -> &Granularity {
        &self.granularity
    }

    pub fn factory(&self) -> &Fa {
        &self.factory
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }
}
