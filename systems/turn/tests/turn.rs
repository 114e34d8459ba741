use grid_pursuit_core::{Cell, Creature, Delta, EntityId, EntityKind, Event};
use grid_pursuit_system_turn::{Session, TurnResolver};
use grid_pursuit_world::{query, EntitySeed, Grid, World};
use proptest::prelude::*;

const RAT: EntityKind = EntityKind::Autonomous(Creature::Rat);

fn session(grid: Grid, seeds: &[EntitySeed]) -> Session {
    let world = World::new(grid, seeds).expect("world builds");
    Session::new(world, TurnResolver::default())
}

fn cell_of(session: &Session, id: u32) -> Cell {
    query::entity_cell(session.world(), EntityId::new(id)).expect("entity exists")
}

#[test]
fn controlled_entity_follows_input_by_one_tile() {
    let mut session = session(
        Grid::open(10, 10).expect("grid builds"),
        &[EntitySeed::new(EntityKind::Controlled, Cell::new(5, 5))],
    );

    let report = session
        .submit_input(Delta::new(1, 0))
        .expect("input resolves a turn");

    assert_eq!(cell_of(&session, 0), Cell::new(6, 5));
    assert_eq!(report.moved(), 1);
}

#[test]
fn targets_are_captured_before_anyone_moves() {
    let mut session = session(
        Grid::open(5, 5).expect("grid builds"),
        &[
            EntitySeed::new(EntityKind::Controlled, Cell::new(2, 2)),
            EntitySeed::new(RAT, Cell::new(1, 2)),
        ],
    );

    let _ = session
        .submit_input(Delta::new(1, -1))
        .expect("input resolves a turn");

    assert_eq!(cell_of(&session, 0), Cell::new(3, 1));
    assert_eq!(cell_of(&session, 1), Cell::new(2, 2));
}

#[test]
fn rat_converges_onto_the_player_cell() {
    let mut session = session(
        Grid::open(3, 1).expect("grid builds"),
        &[
            EntitySeed::new(EntityKind::Controlled, Cell::new(2, 0)),
            EntitySeed::new(RAT, Cell::new(0, 0)),
        ],
    );

    for _ in 0..3 {
        let _ = session
            .submit_input(Delta::new(1, 0))
            .expect("input resolves a turn");
    }

    assert_eq!(cell_of(&session, 0), Cell::new(2, 0));
    assert_eq!(cell_of(&session, 1), Cell::new(2, 0));
    assert_eq!(session.turns_resolved(), 3);
}

#[test]
fn entities_on_their_target_are_left_alone() {
    let mut session = session(
        Grid::open(3, 3).expect("grid builds"),
        &[
            EntitySeed::new(EntityKind::Controlled, Cell::new(0, 0)),
            EntitySeed::new(RAT, Cell::new(0, 0)),
        ],
    );

    let report = session
        .submit_input(Delta::new(-1, -1))
        .expect("input resolves a turn");

    assert!(!report.world_changed());
    let summary = session.resolver().last_turn();
    assert_eq!(summary.settled, 1);
    assert_eq!(summary.searched, 1);
    assert_eq!(summary.unreachable, 1);
    assert_eq!(cell_of(&session, 1), Cell::new(0, 0));
}

#[test]
fn input_into_a_wall_holds_the_player() {
    let wall = Cell::new(2, 1);
    let mut session = session(
        Grid::new(4, 3, &[wall]).expect("grid builds"),
        &[EntitySeed::new(EntityKind::Controlled, Cell::new(1, 1))],
    );

    let report = session
        .submit_input(Delta::new(1, 0))
        .expect("input resolves a turn");

    assert_eq!(
        report.events(),
        &[Event::InputRecorded {
            delta: Delta::new(1, 0)
        }]
    );
    assert_eq!(cell_of(&session, 0), Cell::new(1, 1));
}

#[test]
fn zero_input_resolves_no_turn() {
    let mut session = session(
        Grid::open(4, 4).expect("grid builds"),
        &[
            EntitySeed::new(EntityKind::Controlled, Cell::new(0, 0)),
            EntitySeed::new(RAT, Cell::new(3, 3)),
        ],
    );

    assert!(session.submit_input(Delta::ZERO).is_none());
    assert_eq!(cell_of(&session, 1), Cell::new(3, 3));
    assert_eq!(session.turns_resolved(), 0);
}

#[derive(Clone, Debug)]
struct Setup {
    width: u32,
    height: u32,
    walls: Vec<Cell>,
    seeds: Vec<EntitySeed>,
    inputs: Vec<Delta>,
}

fn setup() -> impl Strategy<Value = Setup> {
    (2u32..9, 2u32..9)
        .prop_flat_map(|(width, height)| {
            let cell_count = (width * height) as usize;
            let cell = (0..width as i32, 0..height as i32).prop_map(|(x, y)| Cell::new(x, y));
            let kind = prop_oneof![Just(EntityKind::Controlled), Just(RAT)];
            let delta = (-1i32..=1, -1i32..=1).prop_map(|(dx, dy)| Delta::new(dx, dy));
            (
                Just(width),
                Just(height),
                prop::collection::vec(prop::bool::weighted(0.25), cell_count),
                prop::collection::vec((kind, cell), 1..4),
                prop::collection::vec(delta, 1..12),
            )
        })
        .prop_map(|(width, height, wall_mask, placements, inputs)| {
            let seeds: Vec<EntitySeed> = placements
                .into_iter()
                .map(|(kind, cell)| EntitySeed::new(kind, cell))
                .collect();
            let walls = wall_mask
                .iter()
                .enumerate()
                .filter(|(_, blocked)| **blocked)
                .map(|(index, _)| {
                    Cell::new(
                        (index as u32 % width) as i32,
                        (index as u32 / width) as i32,
                    )
                })
                .filter(|cell| seeds.iter().all(|seed| seed.cell != *cell))
                .collect();
            Setup {
                width,
                height,
                walls,
                seeds,
                inputs,
            }
        })
}

proptest! {
    #[test]
    fn steps_never_exceed_one_tile_or_enter_walls(setup in setup()) {
        let grid = Grid::new(setup.width, setup.height, &setup.walls).expect("grid builds");
        let mut session = session(grid, &setup.seeds);

        for delta in setup.inputs {
            let before = query::entity_view(session.world());
            let _ = session.submit_input(delta);
            let after = query::entity_view(session.world());

            for (old, new) in before.iter().zip(after.iter()) {
                prop_assert_eq!(old.id, new.id);
                prop_assert!(old.cell.chebyshev_distance(new.cell) <= 1);
                prop_assert!(!query::grid(session.world()).is_blocking(new.cell));
            }
        }
    }
}
