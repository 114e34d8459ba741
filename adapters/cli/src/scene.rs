//! Projection of the world into rendering descriptors.

use grid_pursuit_rendering::{Glyph, RenderingError, Scene};
use grid_pursuit_world::{query, World};

/// Captures the background tiles and every entity glyph.
pub(crate) fn scene_for(world: &World) -> Result<Scene, RenderingError> {
    let grid = query::grid(world);
    Scene::new(
        grid.width(),
        grid.height(),
        grid.tiles().to_vec(),
        glyphs_for(world),
    )
}

/// Entity glyphs in identifier order.
pub(crate) fn glyphs_for(world: &World) -> Vec<Glyph> {
    query::entity_view(world)
        .iter()
        .map(|entity| Glyph::new(entity.cell, entity.kind.symbol()))
        .collect()
}
