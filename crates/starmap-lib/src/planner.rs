//! Gateway candidate ranking.
//!
//! Candidates are recomputed from scratch over the whole catalog every time an
//! origin changes. That is a linear scan per click, which is fine for catalogs
//! of a few thousand systems; a spatial index would be needed well beyond that.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use crate::catalog::{Catalog, System, SystemId};
use crate::config::PlannerConfig;
use crate::distance::{bucket, distance, gradient_color, DistanceBucket};
use crate::selection::{PlanningStrategy, SelectionState};

/// SINGLE-mode candidate: a system within range of origin A.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClosestCandidate {
    pub system: System,
    pub distance: f64,
    pub bucket: DistanceBucket,
}

/// DUAL-mode candidate: an existing system that could bridge both origins.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MidpointCandidate {
    pub system: System,
    pub dist_a: f64,
    pub dist_b: f64,
    pub total_distance: f64,
}

/// Ranked candidate list for the current selection.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(tag = "strategy", content = "candidates", rename_all = "snake_case")]
pub enum Candidates {
    #[default]
    None,
    Single(Vec<ClosestCandidate>),
    Dual(Vec<MidpointCandidate>),
}

impl Candidates {
    pub fn len(&self) -> usize {
        match self {
            Candidates::None => 0,
            Candidates::Single(list) => list.len(),
            Candidates::Dual(list) => list.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether `id` appears in the ranked list.
    pub fn contains(&self, id: &str) -> bool {
        match self {
            Candidates::None => false,
            Candidates::Single(list) => list.iter().any(|c| c.system.id == id),
            Candidates::Dual(list) => list.iter().any(|c| c.system.id == id),
        }
    }
}

/// Systems within `max_range` of `origin`, nearest first. The origin itself is excluded.
pub fn find_closest_systems(
    origin: &System,
    catalog: &Catalog,
    max_range: f64,
) -> Vec<ClosestCandidate> {
    let mut candidates: Vec<ClosestCandidate> = catalog
        .systems()
        .iter()
        .filter(|target| target.id != origin.id)
        .filter_map(|target| {
            let distance = distance(origin, target);
            (distance <= max_range).then(|| ClosestCandidate {
                system: target.clone(),
                distance,
                bucket: bucket(distance),
            })
        })
        .collect();

    candidates.sort_by(|a, b| a.distance.total_cmp(&b.distance));
    candidates
}

/// Systems with the lowest combined distance to both origins, at most `limit` of them.
///
/// This ranks existing systems only; the geometric midpoint between the
/// origins is usually empty space.
pub fn find_best_midpoints(
    origin_a: &System,
    origin_b: &System,
    catalog: &Catalog,
    limit: usize,
) -> Vec<MidpointCandidate> {
    let mut candidates: Vec<MidpointCandidate> = catalog
        .systems()
        .iter()
        .filter(|target| target.id != origin_a.id && target.id != origin_b.id)
        .map(|target| {
            let dist_a = distance(origin_a, target);
            let dist_b = distance(origin_b, target);
            MidpointCandidate {
                system: target.clone(),
                dist_a,
                dist_b,
                total_distance: dist_a + dist_b,
            }
        })
        .collect();

    candidates.sort_by(|a, b| a.total_distance.total_cmp(&b.total_distance));
    candidates.truncate(limit);
    candidates
}

/// Per-system display color for the current selection.
///
/// Idle selections color nothing. With only origin A, systems are colored by
/// distance bucket. With both origins, systems are colored on a gradient of
/// their combined distance, normalized over the catalog.
pub fn heatmap(selection: &SelectionState, catalog: &Catalog) -> BTreeMap<SystemId, String> {
    let mut colors = BTreeMap::new();
    let Some(origin_a) = selection.origin_a() else {
        return colors;
    };

    match (selection.strategy(), selection.origin_b()) {
        (PlanningStrategy::Dual, Some(origin_b)) => {
            let totals: Vec<(&System, f64)> = catalog
                .systems()
                .iter()
                .filter(|s| s.id != origin_a.id && s.id != origin_b.id)
                .map(|s| (s, distance(origin_a, s) + distance(origin_b, s)))
                .collect();
            let min = totals.iter().map(|(_, t)| *t).fold(f64::INFINITY, f64::min);
            let max = totals
                .iter()
                .map(|(_, t)| *t)
                .fold(f64::NEG_INFINITY, f64::max);
            let span = max - min;
            for (system, total) in totals {
                let t = if span > 0.0 { (total - min) / span } else { 0.0 };
                colors.insert(system.id.clone(), gradient_color(t));
            }
        }
        _ => {
            for system in catalog.systems() {
                if system.id == origin_a.id {
                    continue;
                }
                let color = bucket(distance(origin_a, system)).color();
                colors.insert(system.id.clone(), color.to_string());
            }
        }
    }

    colors
}

/// Ranks gateway candidates against an injected catalog snapshot.
#[derive(Debug, Clone)]
pub struct GatewayPlanner {
    catalog: Arc<Catalog>,
    config: PlannerConfig,
    candidates: Candidates,
}

impl GatewayPlanner {
    pub fn new(catalog: Arc<Catalog>, config: PlannerConfig) -> Self {
        Self {
            catalog,
            config,
            candidates: Candidates::None,
        }
    }

    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Most recently computed candidates.
    pub fn candidates(&self) -> &Candidates {
        &self.candidates
    }

    /// Replace the catalog snapshot. Previous candidates are discarded.
    pub fn replace_catalog(&mut self, catalog: Arc<Catalog>) {
        self.catalog = catalog;
        self.candidates = Candidates::None;
    }

    /// Recompute candidates for `selection`, replacing the previous list.
    pub fn recompute(&mut self, selection: &SelectionState) -> &Candidates {
        self.candidates = match (selection.strategy(), selection.origin_a(), selection.origin_b()) {
            (_, None, _) => Candidates::None,
            (PlanningStrategy::Single, Some(origin), _) => Candidates::Single(
                find_closest_systems(origin, &self.catalog, self.config.max_range),
            ),
            (PlanningStrategy::Dual, Some(_), None) => Candidates::None,
            (PlanningStrategy::Dual, Some(a), Some(b)) => Candidates::Dual(find_best_midpoints(
                a,
                b,
                &self.catalog,
                self.config.midpoint_limit,
            )),
        };
        debug!(
            strategy = %selection.strategy(),
            candidates = self.candidates.len(),
            "recomputed gateway candidates"
        );
        &self.candidates
    }

    /// Heatmap for `selection` against this planner's catalog.
    pub fn heatmap(&self, selection: &SelectionState) -> BTreeMap<SystemId, String> {
        heatmap(selection, &self.catalog)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::SystemPosition;

    fn system(id: &str, x: f64, y: f64, z: f64) -> System {
        System {
            id: id.to_string(),
            name: id.to_uppercase(),
            natural_id: String::new(),
            position: SystemPosition { x, y, z },
        }
    }

    fn catalog() -> Catalog {
        Catalog::from_systems(vec![
            system("origin", 0.0, 0.0, 0.0),
            system("near", 3.0, 4.0, 0.0),
            system("mid", 12.0, 0.0, 0.0),
            system("edge", 0.0, 35.0, 0.0),
            system("far", 40.0, 0.0, 0.0),
            system("deep", 0.0, 0.0, -20.0),
        ])
    }

    #[test]
    fn closest_systems_respect_range_and_order() {
        let catalog = catalog();
        let origin = catalog.get("origin").unwrap();
        let candidates = find_closest_systems(origin, &catalog, 35.0);

        let ids: Vec<_> = candidates.iter().map(|c| c.system.id.as_str()).collect();
        assert_eq!(ids, vec!["near", "mid", "deep", "edge"]);
        assert!(candidates.windows(2).all(|w| w[0].distance <= w[1].distance));
        assert!(candidates.iter().all(|c| c.distance <= 35.0));
        assert_eq!(candidates[0].distance, 5.0);
        assert_eq!(candidates[0].bucket, DistanceBucket::Under10);
    }

    #[test]
    fn closest_systems_include_exact_range() {
        let catalog = catalog();
        let origin = catalog.get("origin").unwrap();
        let candidates = find_closest_systems(origin, &catalog, 5.0);
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].system.id, "near");
    }

    #[test]
    fn midpoints_exclude_origins_and_truncate() {
        let catalog = catalog();
        let a = catalog.get("origin").unwrap();
        let b = catalog.get("far").unwrap();
        let all = find_best_midpoints(a, b, &catalog, 50);
        assert_eq!(all.len(), 4);
        assert!(all
            .iter()
            .all(|c| c.system.id != "origin" && c.system.id != "far"));
        assert!(all
            .windows(2)
            .all(|w| w[0].total_distance <= w[1].total_distance));
        assert_eq!(all[0].system.id, "mid");
        assert_eq!(all[0].total_distance, 40.0);

        let limited = find_best_midpoints(a, b, &catalog, 2);
        assert_eq!(limited.len(), 2);
        assert_eq!(limited[0], all[0]);
    }

    #[test]
    fn recompute_follows_selection() {
        let catalog = Arc::new(catalog());
        let mut planner = GatewayPlanner::new(catalog.clone(), PlannerConfig::default());
        let mut selection = SelectionState::new(PlanningStrategy::Dual);

        assert_eq!(planner.recompute(&selection), &Candidates::None);

        selection.select(catalog.get("origin").unwrap());
        assert!(planner.recompute(&selection).is_empty());

        selection.select(catalog.get("far").unwrap());
        assert!(matches!(planner.recompute(&selection), Candidates::Dual(list) if list.len() == 4));

        selection.set_strategy(PlanningStrategy::Single);
        assert!(matches!(planner.recompute(&selection), Candidates::Single(list) if list.len() == 4));
        assert!(planner.candidates().contains("near"));
        assert!(!planner.candidates().contains("origin"));
    }

    #[test]
    fn heatmap_is_empty_when_idle() {
        let catalog = catalog();
        let selection = SelectionState::new(PlanningStrategy::Single);
        assert!(heatmap(&selection, &catalog).is_empty());
    }

    #[test]
    fn heatmap_buckets_single_origin() {
        let catalog = catalog();
        let mut selection = SelectionState::new(PlanningStrategy::Single);
        selection.select(catalog.get("origin").unwrap());

        let colors = heatmap(&selection, &catalog);
        assert_eq!(colors.len(), 5);
        assert!(!colors.contains_key("origin"));
        assert_eq!(colors["near"], DistanceBucket::Under10.color());
        assert_eq!(colors["far"], DistanceBucket::Over25.color());
    }

    #[test]
    fn heatmap_gradients_dual_origins() {
        let catalog = catalog();
        let mut selection = SelectionState::new(PlanningStrategy::Dual);
        selection.select(catalog.get("origin").unwrap());
        selection.select(catalog.get("far").unwrap());

        let colors = heatmap(&selection, &catalog);
        assert_eq!(colors.len(), 4);
        assert_eq!(colors["mid"], "hsl(120, 100%, 50%)");
        assert_eq!(colors["edge"], "hsl(0, 100%, 50%)");
    }
}
