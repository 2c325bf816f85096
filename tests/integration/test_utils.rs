//! Shared fixtures for integration tests
//!
//! `TrackedFrame` records every lifecycle call into a shared log so tests can
//! assert exactly which capabilities the manager invoked and in what order.

use chrono::NaiveDate;
use frameslide::{
    Frame, FrameError, FrameKey, FrameManager, FrameRequest, Granularity, RecordingSurface,
    TimeSpan,
};
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Call {
    Create,
    Activate,
    Deactivate,
    Destroy,
}

pub type CallLog = Rc<RefCell<Vec<(FrameKey, Call)>>>;

pub struct TrackedFrame {
    pub key: FrameKey,
    pub span: TimeSpan,
    pub scroll: f64,
    log: CallLog,
}

impl Frame for TrackedFrame {
    fn create(&mut self) {
        self.log.borrow_mut().push((self.key, Call::Create));
    }

    fn activate(&mut self) {
        self.log.borrow_mut().push((self.key, Call::Activate));
    }

    fn deactivate(&mut self) {
        self.log.borrow_mut().push((self.key, Call::Deactivate));
    }

    fn destroy(&mut self) {
        self.log.borrow_mut().push((self.key, Call::Destroy));
    }

    fn scroll_offset(&self) -> f64 {
        self.scroll
    }

    fn set_scroll_offset(&mut self, offset: f64) {
        self.scroll = offset;
    }

    fn timespan(&self) -> TimeSpan {
        self.span
    }
}

pub struct TrackingFactory {
    pub log: CallLog,
    pub requests: Vec<FrameRequest>,
    /// Keys the factory refuses to build
    pub fail_on: Vec<FrameKey>,
}

impl TrackingFactory {
    pub fn new(log: CallLog) -> Self {
        Self {
            log,
            requests: Vec::new(),
            fail_on: Vec::new(),
        }
    }
}

impl frameslide::FrameFactory for TrackingFactory {
    type Frame = TrackedFrame;

    fn build(&mut self, request: &FrameRequest) -> Result<TrackedFrame, FrameError> {
        if self.fail_on.contains(&request.key) {
            return Err(FrameError::Factory(format!("refused {}", request.key)));
        }
        self.requests.push(*request);
        Ok(TrackedFrame {
            key: request.key,
            span: request.span,
            scroll: 0.0,
            log: self.log.clone(),
        })
    }
}

pub type TestManager = FrameManager<TrackingFactory, RecordingSurface>;

pub fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
}

pub fn key(d: u32) -> FrameKey {
    FrameKey::from_date(day(d))
}

pub fn span(start: u32, end: u32) -> TimeSpan {
    TimeSpan::new(day(start), day(end)).unwrap()
}

pub fn manager_with(granularity: Granularity, bound: usize) -> (TestManager, CallLog) {
    let log: CallLog = Rc::new(RefCell::new(Vec::new()));
    let manager = FrameManager::new(
        granularity,
        TrackingFactory::new(log.clone()),
        RecordingSurface::new(),
        bound,
    )
    .unwrap();
    (manager, log)
}

pub fn day_manager(bound: usize) -> (TestManager, CallLog) {
    manager_with(Granularity::day(), bound)
}

pub fn calls_for(log: &CallLog, key: FrameKey) -> Vec<Call> {
    log.borrow()
        .iter()
        .filter(|(k, _)| *k == key)
        .map(|(_, c)| *c)
        .collect()
}

pub fn count(log: &CallLog, call: Call) -> usize {
    log.borrow().iter().filter(|(_, c)| *c == call).count()
}
