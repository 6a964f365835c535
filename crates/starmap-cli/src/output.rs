//! Output formatting for command results.
//!
//! Text renderers return strings so they can be unit tested; JSON output is
//! produced by serializing the report structs directly.

use std::fmt::Write;

use clap::ValueEnum;
use serde::Serialize;

use starmap_lib::{
    format_distance, Candidates, ClickOutcome, ClosestCandidate, Explorer, MidpointCandidate,
    PlannerView, SelectionEvent, System,
};

use crate::terminal::ColorPalette;

/// Output style selected with `--format`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text.
    #[default]
    Text,
    /// Pretty-printed JSON (one compact object per line in `session`).
    Json,
}

/// SINGLE-mode candidates around one origin.
#[derive(Debug, Serialize)]
pub struct ClosestReport<'a> {
    pub origin: &'a System,
    pub max_range: f64,
    pub candidates: &'a [ClosestCandidate],
}

/// DUAL-mode midpoints for a pair of origins.
#[derive(Debug, Serialize)]
pub struct MidpointReport<'a> {
    pub origin_a: &'a System,
    pub origin_b: &'a System,
    pub limit: usize,
    pub candidates: &'a [MidpointCandidate],
}

fn system_label(system: &System, palette: &ColorPalette) -> String {
    format!(
        "{}{}{} {}({}){}",
        palette.white_bold, system.name, palette.reset, palette.gray, system.id, palette.reset
    )
}

/// Render SINGLE-mode candidates, one per line with a bucket tag.
pub fn format_closest_text(report: &ClosestReport<'_>, palette: &ColorPalette) -> String {
    let mut buffer = String::new();
    let _ = writeln!(
        buffer,
        "Systems within {} of {} ({} found):",
        format_distance(report.max_range),
        report.origin.name,
        report.candidates.len()
    );
    for candidate in report.candidates {
        let _ = writeln!(
            buffer,
            "  {}{:>4}{} {:>8}  {}",
            palette.bucket(candidate.bucket),
            candidate.bucket.label(),
            palette.reset,
            format_distance(candidate.distance),
            system_label(&candidate.system, palette)
        );
    }
    buffer
}

/// Render DUAL-mode midpoints with both legs and their sum.
pub fn format_midpoints_text(report: &MidpointReport<'_>, palette: &ColorPalette) -> String {
    let mut buffer = String::new();
    let _ = writeln!(
        buffer,
        "Best midpoints between {} and {} ({} shown):",
        report.origin_a.name,
        report.origin_b.name,
        report.candidates.len()
    );
    for (rank, candidate) in report.candidates.iter().enumerate() {
        let _ = writeln!(
            buffer,
            "{:>3}. {}  {} + {} = {}",
            rank + 1,
            system_label(&candidate.system, palette),
            format_distance(candidate.dist_a),
            format_distance(candidate.dist_b),
            format_distance(candidate.total_distance)
        );
    }
    buffer
}

fn display_name(explorer: &Explorer, id: &str) -> String {
    explorer.catalog().system_name(id).unwrap_or(id).to_string()
}

/// One-line description of a click result.
pub fn describe_click(outcome: &ClickOutcome, explorer: &Explorer) -> String {
    let name = |id: &str| display_name(explorer, id);
    match outcome {
        ClickOutcome::Ignored => "ignored".to_string(),
        ClickOutcome::Selected(id) => format!("selected {}", name(id.as_str())),
        ClickOutcome::RoutePending(endpoints) if endpoints.is_empty() => {
            "route selection cleared".to_string()
        }
        ClickOutcome::RoutePending(endpoints) => {
            let names: Vec<_> = endpoints.iter().map(|id| name(id.as_str())).collect();
            format!("route endpoint {}", names.join(", "))
        }
        ClickOutcome::RouteFound(route) => {
            let names: Vec<_> = route.steps.iter().map(|id| name(id.as_str())).collect();
            format!(
                "route {} ({} hops, {})",
                names.join(" -> "),
                route.hop_count(),
                format_distance(route.total_distance)
            )
        }
        ClickOutcome::RouteUnavailable { start, goal } => {
            format!(
                "no route between {} and {}",
                name(start.as_str()),
                name(goal.as_str())
            )
        }
        ClickOutcome::Planning { event, added } => {
            let candidates = explorer.candidates().len();
            match event {
                SelectionEvent::OriginSelected(system) => {
                    format!("origin A {} ({candidates} candidates)", system.name)
                }
                SelectionEvent::SecondOriginSelected(system) => {
                    format!("origin B {} ({candidates} candidates)", system.name)
                }
                SelectionEvent::OriginDeselected(system) => {
                    format!("deselected {}", system.name)
                }
                SelectionEvent::SelectionRestarted(system) => {
                    format!("restarted with origin A {} ({candidates} candidates)", system.name)
                }
                SelectionEvent::GatewayProposed(proposed) if added.is_empty() => format!(
                    "gateway {} <-> {} already planned",
                    proposed.source.name, proposed.target.name
                ),
                SelectionEvent::GatewayProposed(proposed) => format!(
                    "planned gateway {} <-> {} ({})",
                    proposed.source.name,
                    proposed.target.name,
                    format_distance(proposed.distance)
                ),
            }
        }
    }
}

/// Multi-line text rendering of a planner snapshot.
pub fn format_view_text(view: &PlannerView<'_>) -> String {
    let mut buffer = String::new();
    let _ = writeln!(
        buffer,
        "mode: {} | strategy: {} | phase: {:?}",
        view.mode, view.strategy, view.phase
    );
    if let Some(origin) = view.origin_a {
        let _ = writeln!(buffer, "origin A: {} ({})", origin.name, origin.id);
    }
    if let Some(origin) = view.origin_b {
        let _ = writeln!(buffer, "origin B: {} ({})", origin.name, origin.id);
    }
    if let Some(route) = view.route {
        let _ = writeln!(
            buffer,
            "route: {} ({})",
            route.steps.join(" -> "),
            format_distance(route.total_distance)
        );
    }
    match view.candidates {
        Candidates::None => {}
        Candidates::Single(list) => {
            let _ = writeln!(buffer, "candidates: {}", list.len());
        }
        Candidates::Dual(list) => {
            let _ = writeln!(buffer, "midpoints: {}", list.len());
        }
    }
    let _ = write!(
        buffer,
        "{}",
        starmap_lib::output::render_planned_gateways(view.planned_gateways)
    );
    buffer
}
