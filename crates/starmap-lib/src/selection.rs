//! Origin selection state machine for gateway planning.
//!
//! The machine is a plain value with explicit transitions so it can be driven
//! and tested without any rendering layer:
//!
//! - `Idle` → `OriginASet` on the first click.
//! - SINGLE: a click on a different system proposes a gateway and returns to `Idle`.
//! - DUAL: a click on a different system moves to `BothOriginsSet`; a further
//!   click on a non-origin restarts the selection with that system as origin A.
//! - Clicking a system that is already an origin always deselects it.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::catalog::System;
use crate::distance::distance;

/// Planning strategy: one origin ranked by distance, or two origins ranked by
/// combined distance to a shared midpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlanningStrategy {
    #[default]
    Single,
    Dual,
}

impl fmt::Display for PlanningStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            PlanningStrategy::Single => "single",
            PlanningStrategy::Dual => "dual",
        };
        f.write_str(value)
    }
}

impl FromStr for PlanningStrategy {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "single" => Ok(PlanningStrategy::Single),
            "dual" | "midpoint" => Ok(PlanningStrategy::Dual),
            other => Err(format!("unknown planning strategy '{other}'")),
        }
    }
}

/// Observable phase of the selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionPhase {
    Idle,
    OriginASet,
    BothOriginsSet,
}

/// Gateway emitted by a SINGLE-mode selection, not yet checked against the registry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProposedGateway {
    pub source: System,
    pub target: System,
    pub distance: f64,
}

impl ProposedGateway {
    pub fn new(source: System, target: System) -> Self {
        let distance = distance(&source, &target);
        Self {
            source,
            target,
            distance,
        }
    }
}

/// Result of feeding one click into the state machine.
#[derive(Debug, Clone, PartialEq)]
pub enum SelectionEvent {
    /// Origin A was chosen from `Idle`.
    OriginSelected(System),
    /// Origin B was chosen (DUAL only).
    SecondOriginSelected(System),
    /// A click on an existing origin removed it.
    OriginDeselected(System),
    /// SINGLE selection completed; the machine is back to `Idle`.
    GatewayProposed(ProposedGateway),
    /// DUAL selection was full; the clicked system became the new origin A.
    SelectionRestarted(System),
}

/// Pending origin selection for gateway planning.
///
/// `origin_b` is only ever populated while the strategy is DUAL and
/// `origin_a` is set.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SelectionState {
    strategy: PlanningStrategy,
    origin_a: Option<System>,
    origin_b: Option<System>,
}

impl SelectionState {
    pub fn new(strategy: PlanningStrategy) -> Self {
        Self {
            strategy,
            origin_a: None,
            origin_b: None,
        }
    }

    pub fn strategy(&self) -> PlanningStrategy {
        self.strategy
    }

    pub fn origin_a(&self) -> Option<&System> {
        self.origin_a.as_ref()
    }

    pub fn origin_b(&self) -> Option<&System> {
        self.origin_b.as_ref()
    }

    pub fn phase(&self) -> SelectionPhase {
        match (&self.origin_a, &self.origin_b) {
            (None, _) => SelectionPhase::Idle,
            (Some(_), None) => SelectionPhase::OriginASet,
            (Some(_), Some(_)) => SelectionPhase::BothOriginsSet,
        }
    }

    /// Whether `id` is currently held as either origin.
    pub fn is_origin(&self, id: &str) -> bool {
        self.origin_a.as_ref().is_some_and(|s| s.id == id)
            || self.origin_b.as_ref().is_some_and(|s| s.id == id)
    }

    /// Apply a click on `system`.
    pub fn select(&mut self, system: &System) -> SelectionEvent {
        let Some(origin_a) = self.origin_a.as_ref() else {
            self.origin_a = Some(system.clone());
            return SelectionEvent::OriginSelected(system.clone());
        };

        if origin_a.id == system.id {
            // Promote B so a remaining origin always sits in slot A.
            let removed = self.origin_a.take();
            self.origin_a = self.origin_b.take();
            return SelectionEvent::OriginDeselected(removed.unwrap_or_else(|| system.clone()));
        }

        if self.origin_b.as_ref().is_some_and(|b| b.id == system.id) {
            self.origin_b = None;
            return SelectionEvent::OriginDeselected(system.clone());
        }

        match (self.strategy, self.origin_b.is_some()) {
            (PlanningStrategy::Single, _) => {
                let source = origin_a.clone();
                self.clear();
                SelectionEvent::GatewayProposed(ProposedGateway::new(source, system.clone()))
            }
            (PlanningStrategy::Dual, false) => {
                self.origin_b = Some(system.clone());
                SelectionEvent::SecondOriginSelected(system.clone())
            }
            (PlanningStrategy::Dual, true) => {
                self.origin_a = Some(system.clone());
                self.origin_b = None;
                SelectionEvent::SelectionRestarted(system.clone())
            }
        }
    }

    /// Switch strategy. Origin B is dropped; origin A survives.
    ///
    /// Returns `true` when the strategy actually changed.
    pub fn set_strategy(&mut self, strategy: PlanningStrategy) -> bool {
        if self.strategy == strategy {
            return false;
        }
        self.strategy = strategy;
        self.origin_b = None;
        true
    }

    /// Force `Idle`, keeping the strategy.
    pub fn clear(&mut self) {
        self.origin_a = None;
        self.origin_b = None;
    }
}
