#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic turn resolution that plans paths and proposes entity steps.
//!
//! [`TurnResolver`] is a pure system: it reacts to world events, reads
//! immutable views and answers with [`Command::StepEntity`] values. The world
//! validates each step when the commands are applied. [`Session`] owns the
//! world and drives one resolver through the `AwaitingInput` and
//! `ResolvingTurn` states.

mod session;

use grid_pursuit_core::{Command, EntityView, Event};
use grid_pursuit_system_pathfinding::{find_path_with, Heuristic};
use grid_pursuit_system_targeting::plan_targets;
use grid_pursuit_world::Grid;
use tracing::debug;

pub use session::{EngineState, Session, TurnReport};

/// Counters describing the most recent turn the resolver planned.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct TurnSummary {
    /// Entities already standing on their target; no search was run for them.
    pub settled: usize,
    /// Path searches that were run.
    pub searched: usize,
    /// Searches that reported no path.
    pub unreachable: usize,
    /// Step commands emitted.
    pub steps: usize,
}

/// Pure system that reacts to recorded input and emits step commands.
#[derive(Debug, Default)]
pub struct TurnResolver {
    heuristic: Heuristic,
    last_turn: TurnSummary,
}

impl TurnResolver {
    /// Creates a resolver whose searches use the provided heuristic.
    #[must_use]
    pub fn new(heuristic: Heuristic) -> Self {
        Self {
            heuristic,
            last_turn: TurnSummary::default(),
        }
    }

    /// Heuristic used for every path search.
    #[must_use]
    pub fn heuristic(&self) -> Heuristic {
        self.heuristic
    }

    /// Counters gathered while planning the most recent turn.
    #[must_use]
    pub fn last_turn(&self) -> TurnSummary {
        self.last_turn
    }

    /// Consumes world events and immutable views to emit step commands.
    ///
    /// Nothing is planned unless the events contain
    /// [`Event::InputRecorded`]. Targets are captured for every entity before
    /// any path is searched, so the emitted steps all derive from the same
    /// snapshot of positions.
    pub fn handle(
        &mut self,
        events: &[Event],
        entity_view: &EntityView,
        grid: &Grid,
        out: &mut Vec<Command>,
    ) {
        if !events
            .iter()
            .any(|event| matches!(event, Event::InputRecorded { .. }))
        {
            return;
        }

        self.plan(entity_view, grid, out);
    }

    fn plan(&mut self, entity_view: &EntityView, grid: &Grid, out: &mut Vec<Command>) {
        let mut summary = TurnSummary::default();

        for assignment in plan_targets(entity_view) {
            if assignment.is_settled() {
                summary.settled += 1;
                continue;
            }

            summary.searched += 1;
            let path = match find_path_with(grid, assignment.from, assignment.target, self.heuristic)
            {
                Ok(path) => path,
                Err(no_path) => {
                    summary.unreachable += 1;
                    debug!(entity = assignment.entity.get(), %no_path, "entity holds position");
                    continue;
                }
            };

            // Settled entities were skipped, so the route spans at least two cells.
            debug_assert!(path.step_count() >= 1, "route to a distinct target has no step");
            let Some(next_cell) = path.first_step() else {
                continue;
            };

            summary.steps += 1;
            out.push(Command::StepEntity {
                entity: assignment.entity,
                delta: assignment.from.delta_to(next_cell),
            });
        }

        self.last_turn = summary;
    }
}
