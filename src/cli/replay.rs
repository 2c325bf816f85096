//! Replay engine: feeds scripted input through a `FrameView` wired to a
//! `TimeController`, pumping the controller after each event.

use crate::display::NullSurface;
use crate::error::FrameError;
use crate::frame::{Frame, FrameManager, FrameRequest, FrameState};
use crate::gesture::{DeltaMode, GestureAdapter, Swipe, SwipeDirection, WheelEvent};
use crate::granularity::GranularityKind;
use crate::navigation::{Navigator, TimeController};
use crate::types::{FrameKey, TimeSpan};
use crate::view::FrameView;
use chrono::NaiveDate;
use serde::Serialize;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use std::str::FromStr;
use tracing::info;

/// One scripted input
#[derive(Debug, Clone, PartialEq)]
pub enum ReplayEvent {
    Goto(NaiveDate),
    Swipe(Swipe),
    Wheel(WheelEvent),
    Purge(TimeSpan),
}

impl fmt::Display for ReplayEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReplayEvent::Goto(date) => write!(f, "goto:{}", date),
            ReplayEvent::Swipe(s) => {
                let dir = match s.direction {
                    SwipeDirection::Left => "left",
                    SwipeDirection::Right => "right",
                };
                write!(f, "swipe:{},{},{}", s.dx, s.dy, dir)
            }
            ReplayEvent::Wheel(w) => {
                let mode = match w.delta_mode {
                    DeltaMode::Pixel => "pixel",
                    DeltaMode::Line => "line",
                    DeltaMode::Page => "page",
                };
                write!(f, "wheel:{},{}", w.delta_x, mode)
            }
            ReplayEvent::Purge(span) => write!(f, "purge:{}", span),
        }
    }
}

fn parse_date(s: &str) -> Result<NaiveDate, String> {
    s.trim()
        .parse::<NaiveDate>()
        .map_err(|e| format!("Invalid date '{}': {}", s, e))
}

fn parse_number(s: &str) -> Result<f64, String> {
    s.trim()
        .parse::<f64>()
        .map_err(|e| format!("Invalid number '{}': {}", s, e))
}

impl FromStr for ReplayEvent {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (kind, args) = s
            .split_once(':')
            .ok_or_else(|| format!("Invalid event '{}': expected KIND:ARGS", s))?;

        match kind {
            "goto" => Ok(ReplayEvent::Goto(parse_date(args)?)),
            "swipe" => {
                let parts: Vec<&str> = args.split(',').collect();
                if parts.len() != 3 {
                    return Err(format!("Invalid swipe '{}': expected DX,DY,left|right", args));
                }
                let direction = match parts[2].trim() {
                    "left" => SwipeDirection::Left,
                    "right" => SwipeDirection::Right,
                    other => return Err(format!("Invalid swipe direction '{}'", other)),
                };
                Ok(ReplayEvent::Swipe(Swipe {
                    dx: parse_number(parts[0])?,
                    dy: parse_number(parts[1])?,
                    direction,
                }))
            }
            "wheel" => {
                let (dx, mode) = match args.split_once(',') {
                    Some((dx, mode)) => (dx, mode.trim()),
                    None => (args, "page"),
                };
                let delta_mode = match mode {
                    "page" => DeltaMode::Page,
                    "pixel" => DeltaMode::Pixel,
                    "line" => DeltaMode::Line,
                    other => return Err(format!("Invalid wheel mode '{}'", other)),
                };
                Ok(ReplayEvent::Wheel(WheelEvent {
                    delta_mode,
                    delta_x: parse_number(dx)?,
                    delta_y: 0.0,
                }))
            }
            "purge" => {
                let (start, end) = args
                    .split_once("..")
                    .ok_or_else(|| format!("Invalid purge span '{}': expected START..END", args))?;
                let span = TimeSpan::new(parse_date(start)?, parse_date(end)?)
                    .map_err(|e| e.to_string())?;
                Ok(ReplayEvent::Purge(span))
            }
            other => Err(format!(
                "Unknown event kind '{}' (expected goto, swipe, wheel, purge)",
                other
            )),
        }
    }
}

/// Headless frame used by the replay tool
#[derive(Debug)]
struct ReplayFrame {
    span: TimeSpan,
    scroll: f64,
}

impl Frame for ReplayFrame {
    fn create(&mut self) {}

    fn activate(&mut self) {}

    fn deactivate(&mut self) {}

    fn destroy(&mut self) {}

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

#[derive(Debug, Clone)]
pub struct ReplayOptions {
    pub start: NaiveDate,
    pub granularity: GranularityKind,
    pub retention_bound: usize,
    pub offset_threshold: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct FrameSummary {
    pub key: FrameKey,
    pub time: NaiveDate,
    pub span: TimeSpan,
    pub state: FrameState,
    pub current: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReplayStep {
    pub event: String,
    pub handled: bool,
    pub anchor: Option<NaiveDate>,
    pub frames: Vec<FrameSummary>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReplayReport {
    pub granularity: GranularityKind,
    pub retention_bound: usize,
    pub steps: Vec<ReplayStep>,
}

type ReplayFactory = fn(&FrameRequest) -> Result<ReplayFrame, FrameError>;
type ReplayView = FrameView<ReplayFactory, NullSurface, Rc<TimeController>>;

fn build_frame(request: &FrameRequest) -> Result<ReplayFrame, FrameError> {
    Ok(ReplayFrame {
        span: request.span,
        scroll: 0.0,
    })
}

fn snapshot(view: &ReplayView, event: String, handled: bool) -> ReplayStep {
    let manager = view.manager();
    let current = manager.current_key();
    let frames = manager
        .entries()
        .map(|(key, entry)| FrameSummary {
            key: *key,
            time: entry.time(),
            span: entry.timespan(),
            state: entry.state(),
            current: current == Some(*key),
        })
        .collect();

    ReplayStep {
        event,
        handled,
        anchor: manager.anchor(),
        frames,
    }
}

/// Run `events` against a fresh view and record the frame window after each.
pub fn run_replay(
    options: &ReplayOptions,
    events: &[ReplayEvent],
) -> Result<ReplayReport, FrameError> {
    let controller = Rc::new(TimeController::starting_at(options.start));
    let manager = FrameManager::new(
        options.granularity.strategy(),
        build_frame as ReplayFactory,
        NullSurface,
        options.retention_bound,
    )?;
    let view = Rc::new(RefCell::new(FrameView::new(
        manager,
        GestureAdapter::new(options.offset_threshold)?,
        Rc::clone(&controller),
    )));
    FrameView::subscribe(&view, &controller);

    let mut steps = Vec::with_capacity(events.len() + 1);
    view.borrow_mut().change_date(options.start)?;
    steps.push(snapshot(&view.borrow(), format!("start:{}", options.start), true));

    for event in events {
        let handled = match event {
            ReplayEvent::Goto(date) => {
                controller.move_to(*date);
                true
            }
            ReplayEvent::Swipe(swipe) => view.borrow_mut().handle_swipe(swipe),
            ReplayEvent::Wheel(wheel) => view.borrow_mut().handle_wheel(wheel),
            ReplayEvent::Purge(span) => {
                controller.request_purge(*span);
                true
            }
        };
        controller.dispatch();
        steps.push(snapshot(&view.borrow(), event.to_string(), handled));
    }

    info!(
        events = events.len(),
        granularity = %options.granularity,
        "Replay finished"
    );

    Ok(ReplayReport {
        granularity: options.granularity,
        retention_bound: options.retention_bound,
        steps,
    })
}
