//! Static tile field describing which cells entities may enter.

use grid_pursuit_core::{Cell, TileType};

use crate::WorldError;

/// Dense row-major tile grid with its origin at `(0, 0)`.
///
/// The grid is built once from its dimensions and the list of blocking cells
/// and is read-only afterwards. Lookups require in-bounds cells; callers that
/// may hold off-grid coordinates check [`Grid::contains`] first.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    width: u32,
    height: u32,
    tiles: Vec<TileType>,
}

impl Grid {
    /// Builds a grid of the provided size with every listed cell marked blocking.
    pub fn new(width: u32, height: u32, blocking: &[Cell]) -> Result<Self, WorldError> {
        if width == 0 || height == 0 {
            return Err(WorldError::EmptyDimensions { width, height });
        }

        let cell_count = usize::try_from(u64::from(width) * u64::from(height))
            .map_err(|_| WorldError::DimensionsTooLarge { width, height })?;
        if i32::try_from(width).is_err() || i32::try_from(height).is_err() {
            return Err(WorldError::DimensionsTooLarge { width, height });
        }

        let mut grid = Self {
            width,
            height,
            tiles: vec![TileType::Traversable; cell_count],
        };

        for &cell in blocking {
            let Some(index) = grid.index(cell) else {
                return Err(WorldError::BlockingOutOfBounds { cell });
            };
            grid.tiles[index] = TileType::Blocking;
        }

        Ok(grid)
    }

    /// Builds a grid of the provided size without any blocking cells.
    pub fn open(width: u32, height: u32) -> Result<Self, WorldError> {
        Self::new(width, height, &[])
    }

    /// Width of the grid in cells.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height of the grid in cells.
    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Reports whether the cell lies within the grid bounds.
    #[must_use]
    pub fn contains(&self, cell: Cell) -> bool {
        self.index(cell).is_some()
    }

    /// Tile stored at the provided cell.
    ///
    /// # Panics
    ///
    /// Panics when `cell` lies outside the grid.
    #[must_use]
    pub fn tile_at(&self, cell: Cell) -> TileType {
        match self.index(cell) {
            Some(index) => self.tiles[index],
            None => panic!(
                "cell {cell} lies outside the {}x{} grid",
                self.width, self.height
            ),
        }
    }

    /// Reports whether the provided cell blocks movement.
    ///
    /// # Panics
    ///
    /// Panics when `cell` lies outside the grid.
    #[must_use]
    pub fn is_blocking(&self, cell: Cell) -> bool {
        self.tile_at(cell) == TileType::Blocking
    }

    /// Tiles stored in row-major order.
    #[must_use]
    pub fn tiles(&self) -> &[TileType] {
        &self.tiles
    }

    /// Iterates all traversable cells in row-major order.
    pub fn traversable_cells(&self) -> impl Iterator<Item = Cell> + '_ {
        let width = self.width as usize;
        self.tiles
            .iter()
            .enumerate()
            .filter(|(_, tile)| **tile == TileType::Traversable)
            .map(move |(index, _)| Cell::new((index % width) as i32, (index / width) as i32))
    }

    fn index(&self, cell: Cell) -> Option<usize> {
        let x = u32::try_from(cell.x()).ok()?;
        let y = u32::try_from(cell.y()).ok()?;
        if x >= self.width || y >= self.height {
            return None;
        }

        let width = usize::try_from(self.width).ok()?;
        let column = usize::try_from(x).ok()?;
        let row = usize::try_from(y).ok()?;
        row.checked_mul(width)?.checked_add(column)
    }
}
