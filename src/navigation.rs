//! Navigation Authority
//!
//! The [`Navigator`] trait is the narrow interface views use to request a move
//! through time. [`TimeController`] is a single-threaded implementation that
//! owns the current position and visible timespan, queues change and purge
//! events, and delivers them to handlers registered per event kind when the
//! embedding loop calls [`TimeController::dispatch`].

use crate::types::TimeSpan;
use chrono::NaiveDate;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::ops::ControlFlow;
use std::rc::Rc;
use tracing::debug;

/// Requests navigation and exposes the authoritative position.
pub trait Navigator {
    /// Ask to move to `time`. Implementations may apply the move later.
    fn move_to(&self, time: NaiveDate);

    fn position(&self) -> Option<NaiveDate>;

    fn timespan(&self) -> Option<TimeSpan>;
}

impl<N: Navigator + ?Sized> Navigator for Rc<N> {
    fn move_to(&self, time: NaiveDate) {
        (**self).move_to(time)
    }

    fn position(&self) -> Option<NaiveDate> {
        (**self).position()
    }

    fn timespan(&self) -> Option<TimeSpan> {
        (**self).timespan()
    }
}

/// Event queued by the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeEvent {
    Changed(NaiveDate),
    Purge(TimeSpan),
}

/// Identifies a registered handler for removal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HandlerId(u64);

// `Break` unregisters the handler.
type ChangeHandler = Box<dyn FnMut(NaiveDate) -> ControlFlow<()>>;
type PurgeHandler = Box<dyn FnMut(&TimeSpan) -> ControlFlow<()>>;

#[derive(Default)]
struct ControllerState {
    position: Option<NaiveDate>,
    timespan: Option<TimeSpan>,
    pending: VecDeque<TimeEvent>,
    next_handler: u64,
}

/// Single-threaded navigation authority.
///
/// Handlers must not register or remove handlers of the same kind while
/// being dispatched.
#[derive(Default)]
pub struct TimeController {
    state: RefCell<ControllerState>,
    change_handlers: RefCell<Vec<(HandlerId, ChangeHandler)>>,
    purge_handlers: RefCell<Vec<(HandlerId, PurgeHandler)>>,
}

impl TimeController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn starting_at(time: NaiveDate) -> Self {
        let controller = Self::new();
        controller.state.borrow_mut().position = Some(time);
        controller
    }

    pub fn on_change(&self, mut handler: impl FnMut(NaiveDate) + 'static) -> HandlerId {
        self.on_change_until(move |time| {
            handler(time);
            ControlFlow::Continue(())
        })
    }

    /// Like [`on_change`](Self::on_change), but the handler is unregistered
    /// as soon as it returns `ControlFlow::Break`.
    pub fn on_change_until(
        &self,
        handler: impl FnMut(NaiveDate) -> ControlFlow<()> + 'static,
    ) -> HandlerId {
        let id = self.next_id();
        self.change_handlers
            .borrow_mut()
            .push((id, Box::new(handler)));
        id
    }

    pub fn on_purge(&self, mut handler: impl FnMut(&TimeSpan) + 'static) -> HandlerId {
        self.on_purge_until(move |span| {
            handler(span);
            ControlFlow::Continue(())
        })
    }

    pub fn on_purge_until(
        &self,
        handler: impl FnMut(&TimeSpan) -> ControlFlow<()> + 'static,
    ) -> HandlerId {
        let id = self.next_id();
        self.purge_handlers.borrow_mut().push((id, Box::new(handler)));
        id
    }

    /// Number of registered handlers of both kinds.
    pub fn handler_count(&self) -> usize {
        self.change_handlers.borrow().len() + self.purge_handlers.borrow().len()
    }

    /// Remove a handler of either kind. Returns false if it was not registered.
    pub fn remove_handler(&self, id: HandlerId) -> bool {
        let mut change = self.change_handlers.borrow_mut();
        let before = change.len();
        change.retain(|(hid, _)| *hid != id);
        if change.len() != before {
            return true;
        }
        drop(change);

        let mut purge = self.purge_handlers.borrow_mut();
        let before = purge.len();
        purge.retain(|(hid, _)| *hid != id);
        purge.len() != before
    }

    fn next_id(&self) -> HandlerId {
        let mut state = self.state.borrow_mut();
        state.next_handler += 1;
        HandlerId(state.next_handler)
    }

    pub fn set_timespan(&self, span: TimeSpan) {
        self.state.borrow_mut().timespan = Some(span);
    }

    /// Queue a purge notification for `span`.
    pub fn request_purge(&self, span: TimeSpan) {
        self.state
            .borrow_mut()
            .pending
            .push_back(TimeEvent::Purge(span));
    }

    pub fn pending(&self) -> usize {
        self.state.borrow().pending.len()
    }

    /// Deliver queued events in FIFO order, one at a time, including events
    /// queued by handlers during this call. Returns the number delivered.
    pub fn dispatch(&self) -> usize {
        let mut delivered = 0;
        loop {
            let event = self.state.borrow_mut().pending.pop_front();
            let Some(event) = event else {
                break;
            };

            debug!(event = ?event, "Dispatching time event");
            match event {
                TimeEvent::Changed(time) => self
                    .change_handlers
                    .borrow_mut()
                    .retain_mut(|(_, handler)| handler(time).is_continue()),
                TimeEvent::Purge(span) => self
                    .purge_handlers
                    .borrow_mut()
                    .retain_mut(|(_, handler)| handler(&span).is_continue()),
            }
            delivered += 1;
        }
        delivered
    }
}

impl Navigator for TimeController {
    /// Record the new position and queue a change event. Moving to the
    /// current position queues nothing.
    fn move_to(&self, time: NaiveDate) {
        let mut state = self.state.borrow_mut();
        if state.position == Some(time) {
            return;
        }
        state.position = Some(time);
        state.pending.push_back(TimeEvent::Changed(time));
    }

    fn position(&self) -> Option<NaiveDate> {
        self.state.borrow().position
    }

    fn timespan(&self) -> Option<TimeSpan> {
        self.state.borrow().timespan
    }
}
