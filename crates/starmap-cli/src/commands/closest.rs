//! `closest` command: SINGLE-mode gateway candidates around one system.

use anyhow::Result;

use starmap_lib::find_closest_systems;

use super::CommandContext;
use crate::output::{format_closest_text, ClosestReport, OutputFormat};
use crate::terminal::ColorPalette;

/// List systems within the configured range of `system`, nearest first.
pub fn handle_closest_command(context: &CommandContext, system: &str) -> Result<()> {
    let dataset = context.load_dataset()?;
    let origin = dataset.catalog.resolve(system)?;
    let candidates = find_closest_systems(origin, &dataset.catalog, context.config.max_range);

    let report = ClosestReport {
        origin,
        max_range: context.config.max_range,
        candidates: &candidates,
    };
    match context.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Text => print!("{}", format_closest_text(&report, &ColorPalette::detect())),
    }
    Ok(())
}
