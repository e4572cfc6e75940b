// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Rendering of one screen: status line plus list or compact view.

use crate::color::{codes, paint};
use clap::ValueEnum;
use serde::Serialize;
use std::time::Duration;
use sw_core::ScanId;
use sw_engine::presentation::last_update_label;
use sw_engine::{render_compact, render_list, ListLayout, MonitorState, ScanView};

#[derive(Clone, Copy, Debug, Default, PartialEq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Everything shown in one render.
pub struct Frame<'a> {
    /// `None` in one-shot mode
    pub state: Option<MonitorState>,
    pub since_last_update: Option<Duration>,
    pub views: &'a [ScanView],
    /// Compact mode target
    pub scan: Option<&'a ScanId>,
}

impl Frame<'_> {
    fn selected(&self) -> Vec<&ScanView> {
        match self.scan {
            Some(id) => self.views.iter().filter(|v| &v.id == id).take(1).collect(),
            None => self.views.iter().collect(),
        }
    }
}

#[derive(Serialize)]
struct JsonFrame<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    state: Option<String>,
    last_update_secs: Option<u64>,
    scans: Vec<&'a ScanView>,
}

pub fn render(frame: &Frame<'_>, format: OutputFormat, colorize: bool) -> anyhow::Result<String> {
    match format {
        OutputFormat::Text => Ok(render_text(frame, colorize)),
        OutputFormat::Json => render_json(frame),
    }
}

pub fn render_text(frame: &Frame<'_>, colorize: bool) -> String {
    let mut out = String::new();
    if let Some(state) = frame.state {
        let last_update = last_update_text(frame.since_last_update);
        let status = format!("{state} · last update: {last_update}");
        out.push_str(&paint(codes::HEADER, "scanwatch", colorize));
        out.push(' ');
        out.push_str(&paint(codes::CONTEXT, &status, colorize));
        out.push_str("\n\n");
    }

    match frame.scan {
        Some(id) => match frame.selected().first() {
            Some(view) => {
                out.push_str(&render_compact(view));
                out.push('\n');
            }
            None => out.push_str(&format!("scan {id} not found\n")),
        },
        None if frame.views.is_empty() => out.push_str(&render_list(frame.views)),
        None => {
            let layout = ListLayout::for_views(frame.views);
            out.push_str(&paint(codes::HEADER, &layout.header(), colorize));
            out.push('\n');
            for view in frame.views {
                let row = layout.row(view);
                if view.status.is_terminal() {
                    out.push_str(&paint(codes::MUTED, &row, colorize));
                } else {
                    out.push_str(&row);
                }
                out.push('\n');
            }
        }
    }
    out
}

fn last_update_text(since: Option<Duration>) -> String {
    match since {
        Some(_) => format!("{} ago", last_update_label(since)),
        None => last_update_label(None),
    }
}

/// One JSON document per frame, on a single line.
pub fn render_json(frame: &Frame<'_>) -> anyhow::Result<String> {
    let doc = JsonFrame {
        state: frame.state.map(|s| s.to_string()),
        last_update_secs: frame.since_last_update.map(|d| d.as_secs()),
        scans: frame.selected(),
    };
    Ok(format!("{}\n", serde_json::to_string(&doc)?))
}

#[cfg(test)]
#[path = "output_tests.rs"]
mod tests;
