#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Grid Pursuit engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters submit [`Command`] values
//! describing desired mutations, the world executes those commands via its
//! `apply` entry point, and then broadcasts [`Event`] values for systems to
//! react to deterministically. Systems consume event streams, query immutable
//! snapshots, and respond exclusively with new command batches.

use std::fmt;

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Welcome to Grid Pursuit.";

/// Commands that express all permissible world mutations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// Stores the most recent input delta on every controlled entity.
    RecordInput {
        /// Movement intent reported by the input collaborator.
        delta: Delta,
    },
    /// Requests that an entity advance a single step by the provided delta.
    StepEntity {
        /// Identifier of the entity attempting to move.
        entity: EntityId,
        /// Offset of the attempted step. Both components must lie in `-1..=1`.
        delta: Delta,
    },
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Event {
    /// Announces that a nonzero input delta was recorded and a turn is due.
    InputRecorded {
        /// Delta stored on the controlled entities.
        delta: Delta,
    },
    /// Confirms that an entity moved between two cells.
    EntityMoved {
        /// Identifier of the entity that moved.
        entity: EntityId,
        /// Cell the entity occupied before moving.
        from: Cell,
        /// Cell the entity occupies after completing the move.
        to: Cell,
    },
}

/// Location of a single grid cell.
///
/// Coordinates are signed so that offsetting a border cell by an input delta
/// yields a representable, merely out-of-bounds, cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cell {
    x: i32,
    y: i32,
}

impl Cell {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Zero-based column of the cell.
    #[must_use]
    pub const fn x(&self) -> i32 {
        self.x
    }

    /// Zero-based row of the cell.
    #[must_use]
    pub const fn y(&self) -> i32 {
        self.y
    }

    /// Returns the cell reached by applying `delta` to this cell.
    #[must_use]
    pub const fn offset(self, delta: Delta) -> Self {
        Self {
            x: self.x + delta.dx,
            y: self.y + delta.dy,
        }
    }

    /// Returns the delta that leads from this cell to `other`.
    #[must_use]
    pub const fn delta_to(self, other: Cell) -> Delta {
        Delta::new(other.x - self.x, other.y - self.y)
    }

    /// Computes the Manhattan distance between two cells.
    #[must_use]
    pub fn manhattan_distance(self, other: Cell) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    /// Computes the Chebyshev distance, the number of 8-directional steps on an open grid.
    #[must_use]
    pub fn chebyshev_distance(self, other: Cell) -> u32 {
        self.x.abs_diff(other.x).max(self.y.abs_diff(other.y))
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Signed offset between two cells.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Delta {
    dx: i32,
    dy: i32,
}

impl Delta {
    /// Delta that leaves a cell unchanged.
    pub const ZERO: Self = Self::new(0, 0);

    /// Creates a new delta from column and row offsets.
    #[must_use]
    pub const fn new(dx: i32, dy: i32) -> Self {
        Self { dx, dy }
    }

    /// Column offset.
    #[must_use]
    pub const fn dx(&self) -> i32 {
        self.dx
    }

    /// Row offset.
    #[must_use]
    pub const fn dy(&self) -> i32 {
        self.dy
    }

    /// Reports whether the delta leaves a cell unchanged.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.dx == 0 && self.dy == 0
    }

    /// Reports whether the delta moves at most one tile along each axis.
    #[must_use]
    pub const fn is_single_step(&self) -> bool {
        self.dx.abs() <= 1 && self.dy.abs() <= 1
    }
}

impl fmt::Display for Delta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:+}, {:+})", self.dx, self.dy)
    }
}

/// Classification of a single grid tile.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TileType {
    /// Entities may occupy and path through the tile.
    #[default]
    Traversable,
    /// Entities may neither occupy nor path through the tile.
    Blocking,
}

/// Unique identifier assigned to an entity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(u32);

impl EntityId {
    /// Creates a new entity identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Autonomous creature species.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Creature {
    /// Chases the controlled entity.
    Rat,
}

/// Variant tag describing who decides an entity's movement.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EntityKind {
    /// Entity driven by external input.
    Controlled,
    /// Entity that pursues controlled entities on its own.
    Autonomous(Creature),
}

impl EntityKind {
    /// Single-character symbol used when presenting the entity.
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Self::Controlled => '@',
            Self::Autonomous(Creature::Rat) => 'r',
        }
    }

    /// Reports whether the entity follows external input.
    #[must_use]
    pub const fn is_controlled(self) -> bool {
        matches!(self, Self::Controlled)
    }
}

/// Immutable representation of a single entity's state used for queries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct EntitySnapshot {
    /// Unique identifier assigned to the entity.
    pub id: EntityId,
    /// Variant tag of the entity.
    pub kind: EntityKind,
    /// Grid cell currently occupied by the entity.
    pub cell: Cell,
    /// Most recent input delta. Always zero for autonomous entities.
    pub last_input: Delta,
}

/// Read-only snapshot describing all entities on the grid.
#[derive(Clone, Debug, Default)]
pub struct EntityView {
    snapshots: Vec<EntitySnapshot>,
}

impl EntityView {
    /// Creates a new entity view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<EntitySnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured entity snapshots in identifier order.
    pub fn iter(&self) -> impl Iterator<Item = &EntitySnapshot> {
        self.snapshots.iter()
    }

    /// Retrieves the snapshot for the provided entity, if present.
    #[must_use]
    pub fn get(&self, id: EntityId) -> Option<&EntitySnapshot> {
        self.snapshots.iter().find(|snapshot| snapshot.id == id)
    }

    /// First controlled entity in identifier order.
    #[must_use]
    pub fn first_controlled(&self) -> Option<&EntitySnapshot> {
        self.snapshots
            .iter()
            .find(|snapshot| snapshot.kind.is_controlled())
    }

    /// Number of captured snapshots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Reports whether the view holds no entities.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<EntitySnapshot> {
        self.snapshots
    }
}
