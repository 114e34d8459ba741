//! Turn-synchronous driver that owns the world and the resolver.

use grid_pursuit_core::{Command, Delta, Event};
use grid_pursuit_world::{self as world, query, World};
use tracing::debug;

use crate::TurnResolver;

/// Coarse state of the engine.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum EngineState {
    /// No turn is pending; the engine waits for a nonzero input delta.
    #[default]
    AwaitingInput,
    /// A turn is being planned and applied.
    ResolvingTurn,
}

/// Outcome of a single resolved turn.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TurnReport {
    turn: u64,
    events: Vec<Event>,
}

impl TurnReport {
    /// One-based index of the turn.
    #[must_use]
    pub fn turn(&self) -> u64 {
        self.turn
    }

    /// Events broadcast by the world while the turn was resolved.
    #[must_use]
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Number of entities that changed cell during the turn.
    #[must_use]
    pub fn moved(&self) -> usize {
        self.events
            .iter()
            .filter(|event| matches!(event, Event::EntityMoved { .. }))
            .count()
    }

    /// Reports whether the render sink should redraw.
    #[must_use]
    pub fn world_changed(&self) -> bool {
        self.moved() > 0
    }
}

/// Owns the world and resolves one turn per nonzero input delta.
#[derive(Debug)]
pub struct Session {
    world: World,
    resolver: TurnResolver,
    state: EngineState,
    turns_resolved: u64,
}

impl Session {
    /// Creates a session awaiting its first input.
    #[must_use]
    pub fn new(world: World, resolver: TurnResolver) -> Self {
        Self {
            world,
            resolver,
            state: EngineState::AwaitingInput,
            turns_resolved: 0,
        }
    }

    /// Read-only access to the world.
    #[must_use]
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Read-only access to the resolver.
    #[must_use]
    pub fn resolver(&self) -> &TurnResolver {
        &self.resolver
    }

    /// Current engine state.
    #[must_use]
    pub fn state(&self) -> EngineState {
        self.state
    }

    /// Number of turns resolved so far.
    #[must_use]
    pub fn turns_resolved(&self) -> u64 {
        self.turns_resolved
    }

    /// Records an input delta and resolves a turn if it starts one.
    ///
    /// Returns `None` when the delta is zero or no controlled entity exists,
    /// leaving the engine idle.
    ///
    /// # Panics
    ///
    /// Panics when called while a previous turn never finished resolving.
    pub fn submit_input(&mut self, delta: Delta) -> Option<TurnReport> {
        assert_eq!(
            self.state,
            EngineState::AwaitingInput,
            "turn resolution must not overlap"
        );

        let mut events = Vec::new();
        world::apply(&mut self.world, Command::RecordInput { delta }, &mut events);
        if events.is_empty() {
            return None;
        }

        self.state = EngineState::ResolvingTurn;
        let report = self.resolve_turn(events);
        self.state = EngineState::AwaitingInput;
        Some(report)
    }

    fn resolve_turn(&mut self, mut events: Vec<Event>) -> TurnReport {
        let entity_view = query::entity_view(&self.world);
        let mut commands = Vec::new();
        self.resolver.handle(
            &events,
            &entity_view,
            query::grid(&self.world),
            &mut commands,
        );

        for command in commands {
            world::apply(&mut self.world, command, &mut events);
        }

        self.turns_resolved += 1;
        let report = TurnReport {
            turn: self.turns_resolved,
            events,
        };
        let summary = self.resolver.last_turn();
        debug!(
            turn = report.turn,
            moved = report.moved(),
            settled = summary.settled,
            unreachable = summary.unreachable,
            "turn resolved"
        );
        report
    }
}

#[cfg(test)]
mod tests {
    use grid_pursuit_core::{Cell, Creature, EntityId, EntityKind};
    use grid_pursuit_world::{EntitySeed, Grid};

    use super::*;

    fn session(seeds: &[EntitySeed]) -> Session {
        let grid = Grid::open(8, 8).expect("grid builds");
        let world = World::new(grid, seeds).expect("world builds");
        Session::new(world, TurnResolver::default())
    }

    #[test]
    fn zero_input_leaves_engine_idle() {
        let mut session = session(&[EntitySeed::new(EntityKind::Controlled, Cell::new(2, 2))]);

        assert_eq!(session.submit_input(Delta::ZERO), None);
        assert_eq!(session.turns_resolved(), 0);
        assert_eq!(session.state(), EngineState::AwaitingInput);
    }

    #[test]
    fn resolved_turn_returns_to_awaiting_input() {
        let mut session = session(&[EntitySeed::new(EntityKind::Controlled, Cell::new(2, 2))]);

        let report = session
            .submit_input(Delta::new(0, 1))
            .expect("nonzero input resolves a turn");

        assert_eq!(report.turn(), 1);
        assert_eq!(report.moved(), 1);
        assert!(report.world_changed());
        assert_eq!(
            report.events(),
            &[
                Event::InputRecorded {
                    delta: Delta::new(0, 1)
                },
                Event::EntityMoved {
                    entity: EntityId::new(0),
                    from: Cell::new(2, 2),
                    to: Cell::new(2, 3),
                },
            ]
        );
        assert_eq!(session.state(), EngineState::AwaitingInput);
    }

    #[test]
    fn turn_without_movement_reports_no_change() {
        let mut session = session(&[
            EntitySeed::new(EntityKind::Controlled, Cell::new(0, 0)),
            EntitySeed::new(EntityKind::Autonomous(Creature::Rat), Cell::new(0, 0)),
        ]);

        let report = session
            .submit_input(Delta::new(-1, 0))
            .expect("nonzero input resolves a turn");

        assert!(!report.world_changed());
        assert_eq!(session.resolver().last_turn().unreachable, 1);
        assert_eq!(session.resolver().last_turn().settled, 1);
    }
}
