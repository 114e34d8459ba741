#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Per-kind target selection for every entity on the grid.
//!
//! Controlled entities head for the cell their latest input points at.
//! Autonomous entities chase the first controlled entity in identifier order;
//! "nearest" selection is deliberately not attempted.

use grid_pursuit_core::{Cell, EntityId, EntityKind, EntitySnapshot, EntityView};

/// Desired destination captured for a single entity at the start of a turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TargetAssignment {
    /// Entity the target belongs to.
    pub entity: EntityId,
    /// Cell the entity occupied when the target was chosen.
    pub from: Cell,
    /// Cell the entity wants to reach.
    pub target: Cell,
}

impl TargetAssignment {
    /// Reports whether the entity already stands on its target.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.from == self.target
    }
}

/// Derives the desired destination of `entity` from the current entity view.
#[must_use]
pub fn target_for(entity: &EntitySnapshot, entities: &EntityView) -> Cell {
    match entity.kind {
        EntityKind::Controlled => entity.cell.offset(entity.last_input),
        EntityKind::Autonomous(_) => entities
            .first_controlled()
            .map_or(entity.cell, |quarry| quarry.cell),
    }
}

/// Captures every entity's target before anyone moves, in identifier order.
#[must_use]
pub fn plan_targets(entities: &EntityView) -> Vec<TargetAssignment> {
    entities
        .iter()
        .map(|entity| TargetAssignment {
            entity: entity.id,
            from: entity.cell,
            target: target_for(entity, entities),
        })
        .collect()
}
