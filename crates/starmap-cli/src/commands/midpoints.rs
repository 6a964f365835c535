//! `midpoints` command: DUAL-mode candidates bridging two systems.

use anyhow::{bail, Result};

use starmap_lib::find_best_midpoints;

use super::CommandContext;
use crate::output::{format_midpoints_text, MidpointReport, OutputFormat};
use crate::terminal::ColorPalette;

/// Rank existing systems by combined distance to `a` and `b`.
pub fn handle_midpoints_command(context: &CommandContext, a: &str, b: &str) -> Result<()> {
    let dataset = context.load_dataset()?;
    let origin_a = dataset.catalog.resolve(a)?;
    let origin_b = dataset.catalog.resolve(b)?;
    if origin_a.id == origin_b.id {
        bail!("midpoints need two different systems (got {} twice)", origin_a.name);
    }

    let limit = context.config.midpoint_limit;
    let candidates = find_best_midpoints(origin_a, origin_b, &dataset.catalog, limit);
    let report = MidpointReport {
        origin_a,
        origin_b,
        limit,
        candidates: &candidates,
    };
    match context.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Text => {
            print!("{}", format_midpoints_text(&report, &ColorPalette::detect()))
        }
    }
    Ok(())
}
