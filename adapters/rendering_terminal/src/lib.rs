#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Crossterm-backed rendering adapter for Grid Pursuit.
//!
//! The backend switches the terminal into raw mode on the alternate screen,
//! blocks on key presses and redraws only when the scene reports a change.
//! Terminal state is restored on every exit path, including errors.

mod keymap;

use std::io::{self, Stdout, Write};

use anyhow::{Context, Result};
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    event::{self, Event},
    execute, queue,
    style::Print,
    terminal::{
        disable_raw_mode, enable_raw_mode, Clear, ClearType, EnterAlternateScreen,
        LeaveAlternateScreen, SetTitle,
    },
};
use grid_pursuit_core::Delta;
use grid_pursuit_rendering::{Presentation, RenderingBackend, Scene};
use tracing::{debug, error};

pub use keymap::{action_for, KeyAction};

/// Rendering backend that draws scenes with crossterm.
#[derive(Debug, Default)]
pub struct TerminalBackend;

impl TerminalBackend {
    /// Creates a new terminal backend.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl RenderingBackend for TerminalBackend {
    fn run<F>(self, presentation: Presentation, update_scene: F) -> Result<()>
    where
        F: FnMut(Delta, &mut Scene) -> bool,
    {
        let mut stdout = io::stdout();
        enable_raw_mode().context("failed to enable raw mode")?;
        if let Err(err) = execute!(stdout, EnterAlternateScreen, Hide) {
            if let Err(err) = disable_raw_mode() {
                error!(?err, "failed to disable raw mode");
            }
            return Err(err).context("failed to enter alternate screen");
        }

        let result = run_event_loop(&mut stdout, presentation, update_scene);

        if let Err(err) = disable_raw_mode() {
            error!(?err, "failed to disable raw mode");
        }
        if let Err(err) = execute!(stdout, Show, LeaveAlternateScreen) {
            error!(?err, "failed to leave alternate screen");
        }

        result
    }
}

fn run_event_loop<F>(
    stdout: &mut Stdout,
    presentation: Presentation,
    mut update_scene: F,
) -> Result<()>
where
    F: FnMut(Delta, &mut Scene) -> bool,
{
    let Presentation { title, mut scene } = presentation;
    execute!(stdout, SetTitle(&title)).context("failed to set terminal title")?;
    draw(stdout, &scene)?;

    loop {
        let Event::Key(key) = event::read().context("failed to read terminal event")? else {
            continue;
        };

        match action_for(key) {
            Some(KeyAction::Quit) => break,
            Some(KeyAction::Move(delta)) => {
                if update_scene(delta, &mut scene) {
                    draw(stdout, &scene)?;
                }
            }
            None => debug!(?key, "unbound key"),
        }
    }

    Ok(())
}

fn draw(stdout: &mut Stdout, scene: &Scene) -> Result<()> {
    queue!(stdout, Clear(ClearType::All)).context("failed to clear screen")?;
    for (row, text) in scene.text_rows().iter().enumerate() {
        let row = u16::try_from(row).context("scene has more rows than the terminal")?;
        queue!(stdout, MoveTo(0, row), Print(text)).context("failed to queue row")?;
    }
    stdout.flush().context("failed to flush frame")
}
