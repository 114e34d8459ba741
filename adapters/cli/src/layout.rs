//! TOML layout files describing the grid, its walls and the starting entities.

use std::{collections::HashSet, fs, io, path::Path};

use grid_pursuit_core::{Cell, Creature, EntityKind};
use grid_pursuit_world::{EntitySeed, Grid, World, WorldError};
use rand::{seq::SliceRandom, Rng};
use serde::Deserialize;
use thiserror::Error;

/// Layout used when no layout file is supplied.
pub(crate) const BUILT_IN_LAYOUT: &str = r#"
width = 50
height = 20
walls = [
    { from = [10, 5], to = [40, 5] },
    { from = [10, 15], to = [40, 15] },
    { from = [10, 5], to = [10, 15] },
    { from = [40, 5], to = [40, 15] },
]

[[entities]]
kind = "controlled"
at = [20, 10]

[[entities]]
kind = "rat"
at = [30, 12]
"#;

/// Failures raised while loading a layout or building a world from it.
#[derive(Debug, Error)]
pub(crate) enum LayoutError {
    #[error("failed to read layout file {path}")]
    Read {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse layout")]
    Parse(#[from] toml::de::Error),
    #[error("wall segment from {from} to {to} is neither horizontal nor vertical")]
    DiagonalWall { from: Cell, to: Cell },
    #[error("wall segment from {from} to {to} leaves the {width}x{height} grid")]
    WallOutOfBounds {
        from: Cell,
        to: Cell,
        width: u32,
        height: u32,
    },
    #[error("cannot place {requested} extra rats on {available} free cells")]
    NotEnoughFreeCells { requested: usize, available: usize },
    #[error(transparent)]
    World(#[from] WorldError),
}

/// Parsed layout file.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct Layout {
    width: u32,
    height: u32,
    #[serde(default)]
    walls: Vec<WallSegment>,
    #[serde(default)]
    blocked: Vec<[i32; 2]>,
    #[serde(default)]
    entities: Vec<EntityEntry>,
}

/// Inclusive axis-aligned run of blocking cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
struct WallSegment {
    from: [i32; 2],
    to: [i32; 2],
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
struct EntityEntry {
    kind: EntityKindEntry,
    at: [i32; 2],
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
enum EntityKindEntry {
    Controlled,
    Rat,
}

impl From<EntityKindEntry> for EntityKind {
    fn from(entry: EntityKindEntry) -> Self {
        match entry {
            EntityKindEntry::Controlled => EntityKind::Controlled,
            EntityKindEntry::Rat => EntityKind::Autonomous(Creature::Rat),
        }
    }
}

impl Layout {
    /// Parses a layout from TOML text.
    pub(crate) fn parse(contents: &str) -> Result<Self, LayoutError> {
        Ok(toml::from_str(contents)?)
    }

    /// Reads and parses the layout stored at `path`.
    pub(crate) fn load(path: &Path) -> Result<Self, LayoutError> {
        let contents = fs::read_to_string(path).map_err(|source| LayoutError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::parse(&contents)
    }

    /// The layout used when no file is supplied.
    pub(crate) fn built_in() -> Result<Self, LayoutError> {
        Self::parse(BUILT_IN_LAYOUT)
    }

    /// Expands wall segments and single blocked cells into a cell list.
    fn blocking_cells(&self) -> Result<Vec<Cell>, LayoutError> {
        let mut cells: Vec<Cell> = self.blocked.iter().map(|&[x, y]| Cell::new(x, y)).collect();

        for segment in &self.walls {
            let from = Cell::new(segment.from[0], segment.from[1]);
            let to = Cell::new(segment.to[0], segment.to[1]);
            if from.x() != to.x() && from.y() != to.y() {
                return Err(LayoutError::DiagonalWall { from, to });
            }
            if !self.contains(from) || !self.contains(to) {
                return Err(LayoutError::WallOutOfBounds {
                    from,
                    to,
                    width: self.width,
                    height: self.height,
                });
            }

            for y in from.y().min(to.y())..=from.y().max(to.y()) {
                for x in from.x().min(to.x())..=from.x().max(to.x()) {
                    cells.push(Cell::new(x, y));
                }
            }
        }

        Ok(cells)
    }

    fn contains(&self, cell: Cell) -> bool {
        u32::try_from(cell.x()).is_ok_and(|x| x < self.width)
            && u32::try_from(cell.y()).is_ok_and(|y| y < self.height)
    }

    /// Builds the world, scattering `extra_rats` additional rats on free cells.
    ///
    /// Extra rats never start on a wall or on a cell listed in the layout.
    pub(crate) fn build_world<R: Rng + ?Sized>(
        &self,
        extra_rats: usize,
        rng: &mut R,
    ) -> Result<World, LayoutError> {
        let grid = Grid::new(self.width, self.height, &self.blocking_cells()?)?;

        let mut seeds: Vec<EntitySeed> = self
            .entities
            .iter()
            .map(|entry| EntitySeed::new(entry.kind.into(), Cell::new(entry.at[0], entry.at[1])))
            .collect();

        if extra_rats > 0 {
            let occupied: HashSet<Cell> = seeds.iter().map(|seed| seed.cell).collect();
            let free: Vec<Cell> = grid
                .traversable_cells()
                .filter(|cell| !occupied.contains(cell))
                .collect();
            if free.len() < extra_rats {
                return Err(LayoutError::NotEnoughFreeCells {
                    requested: extra_rats,
                    available: free.len(),
                });
            }

            seeds.extend(
                free.choose_multiple(rng, extra_rats)
                    .map(|&cell| EntitySeed::new(EntityKind::Autonomous(Creature::Rat), cell)),
            );
        }

        Ok(World::new(grid, &seeds)?)
    }
}
