//! Headless backend that replays a fixed input script and prints the final frame.

use std::io::Write;

use anyhow::{Context, Result};
use grid_pursuit_core::Delta;

use crate::{Presentation, RenderingBackend, Scene};

/// Backend that feeds scripted inputs and writes the last scene as text.
#[derive(Debug)]
pub struct TextBackend<W> {
    inputs: Vec<Delta>,
    writer: W,
}

impl<W: Write> TextBackend<W> {
    /// Creates a backend that replays `inputs` and writes to `writer`.
    #[must_use]
    pub fn new(inputs: Vec<Delta>, writer: W) -> Self {
        Self { inputs, writer }
    }
}

impl<W: Write> RenderingBackend for TextBackend<W> {
    fn run<F>(self, presentation: Presentation, mut update_scene: F) -> Result<()>
    where
        F: FnMut(Delta, &mut Scene) -> bool,
    {
        let Self { inputs, mut writer } = self;
        let Presentation { title, mut scene } = presentation;

        let mut redraws = 0usize;
        for delta in inputs {
            if update_scene(delta, &mut scene) {
                redraws += 1;
            }
        }

        writeln!(writer, "{title}").context("failed to write title")?;
        for row in scene.text_rows() {
            writeln!(writer, "{row}").context("failed to write frame")?;
        }
        writeln!(writer, "redraws: {redraws}").context("failed to write summary")?;
        writer.flush().context("failed to flush frame")
    }
}
