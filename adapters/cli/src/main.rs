#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that boots the Grid Pursuit experience.

mod layout;
mod scene;

use std::{
    fs::File,
    io,
    path::{Path, PathBuf},
    sync::Mutex,
};

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use grid_pursuit_core::Delta;
use grid_pursuit_rendering::{vi_key_delta, Presentation, RenderingBackend, Scene, TextBackend};
use grid_pursuit_rendering_terminal::TerminalBackend;
use grid_pursuit_system_pathfinding::Heuristic;
use grid_pursuit_system_turn::{Session, TurnResolver};
use grid_pursuit_world::query;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::layout::Layout;

const DEFAULT_LOG_FILTER: &str = "grid_pursuit=info";

/// Turn-based pursuit on a tile grid.
#[derive(Debug, Parser)]
#[command(name = "grid-pursuit", version)]
struct Args {
    /// TOML layout file; the built-in walled room is used when omitted.
    #[arg(long)]
    layout: Option<PathBuf>,

    /// Additional rats scattered on free cells.
    #[arg(long, default_value_t = 0)]
    extra_rats: usize,

    /// Seed for scattering extra rats.
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Headless run: one turn per `h j k l y u b n` key, then print the final frame.
    #[arg(long)]
    script: Option<String>,

    /// Distance estimate used by the path search.
    #[arg(long, value_enum, default_value_t = HeuristicArg::Manhattan)]
    heuristic: HeuristicArg,

    /// Tracing filter directives; falls back to `RUST_LOG`, then `grid_pursuit=info`.
    #[arg(long)]
    log_filter: Option<String>,

    /// Write logs to this file instead of stderr.
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum HeuristicArg {
    Manhattan,
    Chebyshev,
}

impl From<HeuristicArg> for Heuristic {
    fn from(arg: HeuristicArg) -> Self {
        match arg {
            HeuristicArg::Manhattan => Heuristic::Manhattan,
            HeuristicArg::Chebyshev => Heuristic::Chebyshev,
        }
    }
}

/// Entry point for the Grid Pursuit command-line interface.
fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.log_filter.as_deref(), args.log_file.as_deref())?;

    let layout = match &args.layout {
        Some(path) => Layout::load(path)?,
        None => Layout::built_in()?,
    };
    let mut rng = ChaCha8Rng::seed_from_u64(args.seed);
    let world = layout
        .build_world(args.extra_rats, &mut rng)
        .context("failed to build world from layout")?;

    let banner = query::welcome_banner(&world);
    info!(
        entities = query::entity_view(&world).len(),
        heuristic = ?args.heuristic,
        "{banner}"
    );
    let presentation = Presentation::new(banner, scene::scene_for(&world)?);
    let session = Session::new(world, TurnResolver::new(args.heuristic.into()));

    match args.script {
        Some(script) => {
            let inputs = parse_script(&script)?;
            run(TextBackend::new(inputs, io::stdout().lock()), presentation, session)
        }
        None => run(TerminalBackend::new(), presentation, session),
    }
}

fn run<B: RenderingBackend>(
    backend: B,
    presentation: Presentation,
    mut session: Session,
) -> Result<()> {
    backend.run(presentation, |delta, scene: &mut Scene| {
        let Some(report) = session.submit_input(delta) else {
            return false;
        };
        if !report.world_changed() {
            return false;
        }
        scene.glyphs = scene::glyphs_for(session.world());
        true
    })?;

    info!(turns = session.turns_resolved(), "session ended");
    Ok(())
}

fn parse_script(script: &str) -> Result<Vec<Delta>> {
    script
        .chars()
        .filter(|key| !key.is_whitespace())
        .map(|key| match vi_key_delta(key) {
            Some(delta) => Ok(delta),
            None => bail!("unsupported script key {key:?}"),
        })
        .collect()
}

fn init_tracing(filter: Option<&str>, log_file: Option<&Path>) -> Result<()> {
    let filter = match filter {
        Some(directives) => EnvFilter::try_new(directives)
            .with_context(|| format!("invalid log filter {directives:?}"))?,
        None => EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(DEFAULT_LOG_FILTER))
            .context("invalid default log filter")?,
    };
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create log file {}", path.display()))?;
            builder.with_ansi(false).with_writer(Mutex::new(file)).init();
        }
        None => builder.with_writer(io::stderr).init(),
    }

    Ok(())
}
