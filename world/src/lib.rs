#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Grid Pursuit.

mod grid;

use grid_pursuit_core::{Cell, Command, Delta, EntityId, EntityKind, Event, WELCOME_BANNER};
use thiserror::Error;
use tracing::{debug, trace};

pub use grid::Grid;

/// Errors raised while constructing a world from startup inputs.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum WorldError {
    /// One of the grid dimensions was zero.
    #[error("grid dimensions must be positive, got {width}x{height}")]
    EmptyDimensions {
        /// Requested width in cells.
        width: u32,
        /// Requested height in cells.
        height: u32,
    },
    /// The grid would not fit in addressable memory or signed coordinates.
    #[error("grid dimensions {width}x{height} are too large")]
    DimensionsTooLarge {
        /// Requested width in cells.
        width: u32,
        /// Requested height in cells.
        height: u32,
    },
    /// A blocking cell was listed outside the grid bounds.
    #[error("blocking cell {cell} lies outside the grid")]
    BlockingOutOfBounds {
        /// Offending cell.
        cell: Cell,
    },
    /// An entity was placed outside the grid bounds.
    #[error("entity start {cell} lies outside the grid")]
    EntityOutOfBounds {
        /// Offending start cell.
        cell: Cell,
    },
    /// An entity was placed on a blocking cell.
    #[error("entity start {cell} is a blocking cell")]
    EntityOnBlockingCell {
        /// Offending start cell.
        cell: Cell,
    },
}

/// Initial placement of an entity supplied at startup.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EntitySeed {
    /// Variant tag of the entity.
    pub kind: EntityKind,
    /// Cell the entity starts on.
    pub cell: Cell,
}

impl EntitySeed {
    /// Creates a new seed for the provided kind and start cell.
    #[must_use]
    pub const fn new(kind: EntityKind, cell: Cell) -> Self {
        Self { kind, cell }
    }
}

/// Represents the authoritative Grid Pursuit world state.
#[derive(Debug)]
pub struct World {
    banner: &'static str,
    grid: Grid,
    entities: Vec<Entity>,
}

impl World {
    /// Creates a world from a grid and the fixed set of starting entities.
    ///
    /// Entities receive identifiers in the order they are listed.
    pub fn new(grid: Grid, seeds: &[EntitySeed]) -> Result<Self, WorldError> {
        let mut entities = Vec::with_capacity(seeds.len());
        for (index, seed) in seeds.iter().enumerate() {
            if !grid.contains(seed.cell) {
                return Err(WorldError::EntityOutOfBounds { cell: seed.cell });
            }
            if grid.is_blocking(seed.cell) {
                return Err(WorldError::EntityOnBlockingCell { cell: seed.cell });
            }

            let id = EntityId::new(u32::try_from(index).unwrap_or(u32::MAX));
            entities.push(Entity::from_seed(id, *seed));
        }

        Ok(Self {
            banner: WELCOME_BANNER,
            grid,
            entities,
        })
    }

    fn record_input(&mut self, delta: Delta, out_events: &mut Vec<Event>) {
        if delta.is_zero() {
            return;
        }

        let mut recorded = false;
        for entity in self
            .entities
            .iter_mut()
            .filter(|entity| entity.kind.is_controlled())
        {
            entity.last_input = delta;
            recorded = true;
        }

        if recorded {
            out_events.push(Event::InputRecorded { delta });
        }
    }

    fn step_entity(&mut self, id: EntityId, delta: Delta, out_events: &mut Vec<Event>) {
        assert!(
            delta.is_single_step(),
            "entity {} attempted to move further than one tile: {delta}",
            id.get()
        );

        let grid = &self.grid;
        let Some(entity) = self.entities.iter_mut().find(|entity| entity.id == id) else {
            debug!(entity = id.get(), "step requested for unknown entity");
            return;
        };

        let from = entity.cell;
        let to = from.offset(delta);
        if grid.is_blocking(to) {
            debug!(entity = id.get(), %from, %to, "step rejected by blocking tile");
            return;
        }

        if from == to {
            return;
        }

        entity.cell = to;
        trace!(entity = id.get(), %from, %to, "entity advanced");
        out_events.push(Event::EntityMoved { entity: id, from, to });
    }
}

/// Applies the provided command to the world, mutating state deterministically.
///
/// # Panics
///
/// Panics when a [`Command::StepEntity`] carries a delta larger than one tile
/// on either axis, or targets a cell outside the grid. Both indicate a broken
/// invariant in the caller rather than a recoverable condition.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::RecordInput { delta } => world.record_input(delta, out_events),
        Command::StepEntity { entity, delta } => world.step_entity(entity, delta, out_events),
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use grid_pursuit_core::{Cell, EntityId, EntitySnapshot, EntityView};

    use super::{Grid, World};

    /// Retrieves the welcome banner that adapters may display to players.
    #[must_use]
    pub fn welcome_banner(world: &World) -> &'static str {
        world.banner
    }

    /// Provides read-only access to the world's tile grid.
    #[must_use]
    pub fn grid(world: &World) -> &Grid {
        &world.grid
    }

    /// Captures a read-only view of the entities on the grid.
    #[must_use]
    pub fn entity_view(world: &World) -> EntityView {
        EntityView::from_snapshots(
            world
                .entities
                .iter()
                .map(|entity| EntitySnapshot {
                    id: entity.id,
                    kind: entity.kind,
                    cell: entity.cell,
                    last_input: entity.last_input,
                })
                .collect(),
        )
    }

    /// Cell currently occupied by the provided entity.
    #[must_use]
    pub fn entity_cell(world: &World, id: EntityId) -> Option<Cell> {
        world
            .entities
            .iter()
            .find(|entity| entity.id == id)
            .map(|entity| entity.cell)
    }
}

#[derive(Clone, Copy, Debug)]
struct Entity {
    id: EntityId,
    kind: EntityKind,
    cell: Cell,
    last_input: Delta,
}

impl Entity {
    fn from_seed(id: EntityId, seed: EntitySeed) -> Self {
        Self {
            id,
            kind: seed.kind,
            cell: seed.cell,
            last_input: Delta::ZERO,
        }
    }
}
