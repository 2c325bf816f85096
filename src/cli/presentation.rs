//! Replay presentation: text (tables) and JSON renderings of a replay report.

use crate::cli::replay::ReplayReport;
use crate::error::FrameError;
use comfy_table::Table;

pub fn format_replay_json(report: &ReplayReport) -> Result<String, FrameError> {
    Ok(serde_json::to_string_pretty(report)?)
}

pub fn format_replay_text(report: &ReplayReport) -> String {
    let mut steps = Table::new();
    steps.set_header(vec!["#", "Event", "Handled", "Anchor", "Frames"]);
    for (i, step) in report.steps.iter().enumerate() {
        let anchor = step
            .anchor
            .map(|a| a.to_string())
            .unwrap_or_else(|| "-".to_string());
        let frames: Vec<String> = step
            .frames
            .iter()
            .map(|f| {
                if f.current {
                    format!("[{}]", f.time)
                } else {
                    f.time.to_string()
                }
            })
            .collect();
        steps.add_row(vec![
            i.to_string(),
            step.event.clone(),
            if step.handled { "yes" } else { "no" }.to_string(),
            anchor,
            frames.join(" "),
        ]);
    }

    let mut out = format!(
        "Granularity: {}  Retention bound: {}\n\n{}",
        report.granularity, report.retention_bound, steps
    );

    if let Some(last) = report.steps.last() {
        let mut frames = Table::new();
        frames.set_header(vec!["Key", "Time", "Span", "State", "Current"]);
        for frame in &last.frames {
            frames.add_row(vec![
                frame.key.to_string(),
                frame.time.to_string(),
                frame.span.to_string(),
                frame.state.as_str().to_string(),
                if frame.current { "*" } else { "" }.to_string(),
            ]);
        }
        out.push_str(&format!("\n\nRetained frames:\n{}", frames));
    }

    out
}
