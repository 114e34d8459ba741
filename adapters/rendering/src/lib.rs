#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for Grid Pursuit adapters.
//!
//! The engine never manages screen state. Once per resolved turn it hands a
//! [`Scene`] (background tiles plus one glyph per entity) to a
//! [`RenderingBackend`], which owns the input loop and decides how to draw.

mod text;

use anyhow::Result as AnyResult;
use grid_pursuit_core::{Cell, Delta, TileType};
use std::{error::Error, fmt};

pub use text::TextBackend;

/// Symbol drawn for traversable tiles.
pub const FLOOR_SYMBOL: char = '.';

/// Symbol drawn for blocking tiles.
pub const WALL_SYMBOL: char = '▓';

/// Entity symbol placed on top of the background tiles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Glyph {
    /// Cell the entity occupies.
    pub cell: Cell,
    /// Single-character identifier of the entity variant.
    pub symbol: char,
}

impl Glyph {
    /// Creates a new glyph descriptor.
    #[must_use]
    pub const fn new(cell: Cell, symbol: char) -> Self {
        Self { cell, symbol }
    }
}

/// Logical snapshot of the grid handed to the render sink.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Scene {
    columns: u32,
    rows: u32,
    tiles: Vec<TileType>,
    /// Entity glyphs in identifier order. Later glyphs cover earlier ones.
    pub glyphs: Vec<Glyph>,
}

impl Scene {
    /// Creates a scene from row-major background tiles and entity glyphs.
    pub fn new(
        columns: u32,
        rows: u32,
        tiles: Vec<TileType>,
        glyphs: Vec<Glyph>,
    ) -> Result<Self, RenderingError> {
        let expected = columns as usize * rows as usize;
        if tiles.len() != expected {
            return Err(RenderingError::TileCountMismatch {
                expected,
                actual: tiles.len(),
            });
        }

        Ok(Self {
            columns,
            rows,
            tiles,
            glyphs,
        })
    }

    /// Number of tile columns.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Number of tile rows.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Renders the scene as one string per row.
    ///
    /// Glyphs outside the grid are skipped.
    #[must_use]
    pub fn text_rows(&self) -> Vec<String> {
        let width = self.columns as usize;
        let mut canvas: Vec<char> = self
            .tiles
            .iter()
            .map(|tile| match tile {
                TileType::Traversable => FLOOR_SYMBOL,
                TileType::Blocking => WALL_SYMBOL,
            })
            .collect();

        for glyph in &self.glyphs {
            let (Ok(x), Ok(y)) = (
                usize::try_from(glyph.cell.x()),
                usize::try_from(glyph.cell.y()),
            ) else {
                continue;
            };
            if x < width && y < self.rows as usize {
                canvas[y * width + x] = glyph.symbol;
            }
        }

        if width == 0 {
            return Vec::new();
        }
        canvas
            .chunks(width)
            .map(|row| row.iter().collect())
            .collect()
    }
}

/// Presentation descriptor consumed by rendering backends.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Presentation {
    /// Title shown by the backend, if it has anywhere to show one.
    pub title: String,
    /// Scene displayed before the first input arrives.
    pub scene: Scene,
}

impl Presentation {
    /// Constructs a new presentation descriptor.
    #[must_use]
    pub fn new<T>(title: T, scene: Scene) -> Self
    where
        T: Into<String>,
    {
        Self {
            title: title.into(),
            scene,
        }
    }
}

/// Rendering backend capable of presenting Grid Pursuit scenes.
pub trait RenderingBackend {
    /// Runs the backend until its input source is exhausted or asks to quit.
    ///
    /// Every movement input is handed to `update_scene` together with the
    /// scene being displayed. The closure returns `true` when it changed the
    /// scene and a redraw is due.
    fn run<F>(self, presentation: Presentation, update_scene: F) -> AnyResult<()>
    where
        F: FnMut(Delta, &mut Scene) -> bool;
}

/// Movement delta bound to a vi-style key, including the diagonals.
#[must_use]
pub fn vi_key_delta(key: char) -> Option<Delta> {
    let (dx, dy) = match key {
        'h' => (-1, 0),
        'j' => (0, 1),
        'k' => (0, -1),
        'l' => (1, 0),
        'y' => (-1, -1),
        'u' => (1, -1),
        'b' => (-1, 1),
        'n' => (1, 1),
        _ => return None,
    };
    Some(Delta::new(dx, dy))
}

/// Errors that can occur while building rendering descriptors.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderingError {
    /// The tile buffer does not cover the grid exactly.
    TileCountMismatch {
        /// Tile count implied by the dimensions.
        expected: usize,
        /// Tile count that was supplied.
        actual: usize,
    },
}

impl fmt::Display for RenderingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TileCountMismatch { expected, actual } => {
                write!(f, "scene expects {expected} tiles (received {actual})")
            }
        }
    }
}

impl Error for RenderingError {}
