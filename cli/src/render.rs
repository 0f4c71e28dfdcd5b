use leap_core::CandidateKey;
use leap_core::host::EditorHost;
use leap_core::host::ViewId;
use leap_core::memory::MemoryHost;
use leap_core::memory::RenderedOverlay;
use owo_colors::OwoColorize;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt::Write as _;

/// Where a search ended up, in 1-based coordinates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum Outcome {
    /// The query was too short to search.
    Idle,
    Narrowing { views: Vec<RenderedView> },
    /// `target` is `None` when the view holding the candidate could not be
    /// brought forward.
    Jumped { target: Option<Location> },
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Location {
    pub path: String,
    pub line: usize,
    pub column: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedView {
    pub path: String,
    pub lines: Vec<RenderedLine>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedLine {
    pub line: usize,
    pub text: String,
    pub markers: Vec<Marker>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Marker {
    pub column: usize,
    pub label: String,
}

impl Outcome {
    /// Collects the labels currently drawn by `host`, view by view.
    pub(crate) fn narrowing(host: &MemoryHost) -> Self {
        let mut drawn: BTreeMap<ViewId, Vec<RenderedOverlay>> = BTreeMap::new();
        for overlay in host.overlays() {
            drawn.entry(overlay.view).or_default().push(overlay);
        }

        let views = host
            .visible_views()
            .into_iter()
            .filter_map(|view| {
                let overlays = drawn.remove(&view)?;
                Some(RenderedView {
                    path: document_path(host, view),
                    lines: rendered_lines(host, view, &overlays),
                })
            })
            .collect();
        Outcome::Narrowing { views }
    }

    pub(crate) fn jumped(host: &MemoryHost, target: Option<CandidateKey>) -> Self {
        let target = target.map(|key| Location {
            path: document_path(host, key.view),
            line: key.line + 1,
            column: key.start + 1,
        });
        Outcome::Jumped { target }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Human-readable form. Labels are highlighted when `color` is set.
    pub fn to_text(&self, color: bool) -> String {
        match self {
            Outcome::Idle => "query too short\n".to_string(),
            Outcome::Cancelled => "cancelled\n".to_string(),
            Outcome::Jumped {
                target: Some(target),
            } => format!("jumped to {}:{}:{}\n", target.path, target.line, target.column),
            Outcome::Jumped { target: None } => "target view could not be reached\n".to_string(),
            Outcome::Narrowing { views } if views.is_empty() => "no matches\n".to_string(),
            Outcome::Narrowing { views } => {
                let mut out = String::new();
                for view in views {
                    if color {
                        let _ = writeln!(out, "{}", view.path.bold());
                    } else {
                        let _ = writeln!(out, "{}", view.path);
                    }
                    for line in &view.lines {
                        let _ = writeln!(out, "{:>4}  {}", line.line, line.marked_text(color));
                    }
                }
                out
            }
        }
    }
}

impl RenderedLine {
    /// The line with a `[label]` in front of every marked column.
    pub fn marked_text(&self, color: bool) -> String {
        let mut markers = self.markers.iter().peekable();
        let mut out = String::with_capacity(self.text.len());
        let push_marker = |out: &mut String, marker: &Marker| {
            let tag = format!("[{}]", marker.label);
            if color {
                let _ = write!(out, "{}", tag.yellow().bold());
            } else {
                out.push_str(&tag);
            }
        };
        for (column, ch) in self.text.chars().enumerate() {
            while let Some(marker) = markers.next_if(|marker| marker.column <= column + 1) {
                push_marker(&mut out, marker);
            }
            out.push(ch);
        }
        for marker in markers {
            push_marker(&mut out, marker);
        }
        out
    }
}

fn document_path(host: &MemoryHost, view: ViewId) -> String {
    host.document(view)
        .map(|document| document.0)
        .unwrap_or_default()
}

fn rendered_lines(
    host: &MemoryHost,
    view: ViewId,
    overlays: &[RenderedOverlay],
) -> Vec<RenderedLine> {
    host.visible_lines(view)
        .into_iter()
        .filter_map(|visible| {
            let mut markers: Vec<Marker> = overlays
                .iter()
                .filter(|overlay| overlay.range.start.line == visible.number)
                .map(|overlay| Marker {
                    column: overlay.range.start.column + 1,
                    label: overlay.label.clone(),
                })
                .collect();
            if markers.is_empty() {
                return None;
            }
            markers.sort_by_key(|marker| marker.column);
            Some(RenderedLine {
                line: visible.number + 1,
                text: visible.text,
                markers,
            })
        })
        .collect()
}
