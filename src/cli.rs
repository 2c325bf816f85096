//! CLI domain: parse, replay, and presentation.
//! The replay engine drives a real view so the tool exercises the library as
//! an embedding application would.

mod parse;
mod presentation;
mod replay;

pub use parse::{Cli, Commands};
pub use presentation::{format_replay_json, format_replay_text};
pub use replay::{run_replay, FrameSummary, ReplayEvent, ReplayOptions, ReplayReport, ReplayStep};
