//! Frame View
//!
//! Wires a [`FrameManager`] to its input and navigation collaborators. Swipes
//! and wheel events are classified by the [`GestureAdapter`] and turned into
//! `move_to` requests on the injected [`Navigator`]; change and purge
//! notifications coming back from the navigator are forwarded to the manager.
//!
//! The navigator owns the position. Direct date changes are reported to it,
//! and gestures step from its position.

use crate::display::DisplaySurface;
use crate::error::FrameError;
use crate::frame::{FrameFactory, FrameManager};
use crate::gesture::{GestureAdapter, NavDirection, Swipe, WheelEvent};
use crate::navigation::{HandlerId, Navigator, TimeController};
use crate::types::{FrameKey, TimeSpan};
use chrono::NaiveDate;
use std::cell::RefCell;
use std::ops::ControlFlow;
use std::rc::Rc;
use tracing::{debug, warn};

pub struct FrameView<Fa: FrameFactory, S: DisplaySurface, N: Navigator> {
    manager: FrameManager<Fa, S>,
    gestures: GestureAdapter,
    navigator: N,
    active: bool,
}

impl<Fa: FrameFactory, S: DisplaySurface, N: Navigator> FrameView<Fa, S, N> {
    pub fn new(manager: FrameManager<Fa, S>, gestures: GestureAdapter, navigator: N) -> Self {
        FrameView {
            manager,
            gestures,
            navigator,
            active: true,
        }
    }

    pub fn manager(&self) -> &FrameManager<Fa, S> {
        &self.manager
    }

    pub fn manager_mut(&mut self) -> &mut FrameManager<Fa, S> {
        &mut self.manager
    }

    pub fn navigator(&self) -> &N {
        &self.navigator
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Show or hide the view. A hidden view rejects gestures and ignores
    /// purge notifications.
    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    /// Move the frame window to `time` and report the move to the navigator,
    /// which queues a change notification for other listeners.
    pub fn change_date(&mut self, time: NaiveDate) -> Result<FrameKey, FrameError> {
        let key = self.manager.change_date(time)?;
        self.navigator.move_to(time);
        Ok(key)
    }

    pub fn purge_frames(&mut self, span: &TimeSpan) -> Vec<FrameKey> {
        if !self.active {
            return Vec::new();
        }
        self.manager.purge_frames(span)
    }

    /// Returns whether the swipe was turned into a navigation request.
    pub fn handle_swipe(&mut self, swipe: &Swipe) -> bool {
        match self.gestures.classify_swipe(swipe) {
            Some(direction) => self.navigate(direction),
            None => false,
        }
    }

    /// Returns whether the wheel event was turned into a navigation request.
    pub fn handle_wheel(&mut self, event: &WheelEvent) -> bool {
        match self.gestures.classify_wheel(event) {
            Some(direction) => self.navigate(direction),
            None => false,
        }
    }

    fn navigate(&mut self, direction: NavDirection) -> bool {
        if !self.active {
            return false;
        }
        let Some(anchor) = self.navigator.position().or_else(|| self.manager.anchor()) else {
            return false;
        };

        let granularity = self.manager.granularity();
        let target = match direction {
            NavDirection::Forward => granularity.next(anchor),
            NavDirection::Backward => granularity.previous(anchor),
        };
        debug!(from = %anchor, to = %target, direction = ?direction, "Navigation requested");
        self.navigator.move_to(target);
        true
    }
}

impl<Fa, S, N> FrameView<Fa, S, N>
where
    Fa: FrameFactory + 'static,
    S: DisplaySurface + 'static,
    N: Navigator + 'static,
{
    /// Register change and purge handlers on `controller` that forward into
    /// `view`. The handlers hold a weak reference; once the view is dropped
    /// each handler unregisters itself on the next event of its kind. The
    /// returned ids can be passed to [`TimeController::remove_handler`] to
    /// unsubscribe earlier.
    pub fn subscribe(view: &Rc<RefCell<Self>>, controller: &TimeController) -> [HandlerId; 2] {
        let on_change = Rc::downgrade(view);
        let change = controller.on_change_until(move |time| {
            let Some(view) = on_change.upgrade() else {
                return ControlFlow::Break(());
            };
            // The navigator already holds `time`, so only the window moves.
            let result = view.borrow_mut().manager.change_date(time);
            if let Err(e) = result {
                warn!(time = %time, error = %e, "Date change failed");
            }
            ControlFlow::Continue(())
        });

        let on_purge = Rc::downgrade(view);
        let purge = controller.on_purge_until(move |span| {
            let Some(view) = on_purge.upgrade() else {
                return ControlFlow::Break(());
            };
            view.borrow_mut().purge_frames(span);
            ControlFlow::Continue(())
        });

        [change, purge]
    }
}
