//! Route command handler for computing lane paths between star systems.

use anyhow::{Context, Result};

use starmap_lib::{build_adjacency, shortest_path, RouteSummary};

use super::CommandContext;
use crate::output::OutputFormat;

/// Handle the route subcommand.
pub fn handle_route_command(context: &CommandContext, from: &str, to: &str) -> Result<()> {
    let dataset = context.load_dataset()?;
    let start = dataset.catalog.resolve(from)?;
    let goal = dataset.catalog.resolve(to)?;

    let graph = build_adjacency(&dataset.graph.edges);
    let route = shortest_path(&graph, &start.id, &goal.id)
        .with_context(|| format!("failed to route from {} to {}", start.name, goal.name))?;
    let summary = RouteSummary::from_route(&route, &graph, &dataset.catalog)?;

    match context.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&summary)?),
        OutputFormat::Text => print!("{}", summary.render_plain()),
    }
    Ok(())
}
