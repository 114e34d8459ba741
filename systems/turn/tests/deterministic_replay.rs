use grid_pursuit_core::{Cell, Creature, Delta, EntityId, EntityKind, Event};
use grid_pursuit_system_turn::{Session, TurnResolver};
use grid_pursuit_world::{query, EntitySeed, Grid, World};

const SCRIPT: &str = "llljjhhhhkkkkkkkll";

#[test]
fn deterministic_replay_produces_expected_positions() {
    let first = replay(SCRIPT);
    let second = replay(SCRIPT);

    assert_eq!(first, second, "replay diverged between runs");

    let expected = [
        ((21, 10), (29, 11)),
        ((22, 10), (28, 10)),
        ((23, 10), (27, 10)),
        ((23, 11), (26, 10)),
        ((23, 12), (25, 11)),
        ((22, 12), (24, 12)),
        ((21, 12), (23, 12)),
        ((20, 12), (22, 12)),
        ((19, 12), (21, 12)),
        ((19, 11), (20, 12)),
        ((19, 10), (19, 11)),
        ((19, 9), (19, 10)),
        ((19, 8), (19, 9)),
        ((19, 7), (19, 8)),
        ((19, 6), (19, 7)),
        ((19, 6), (19, 6)),
        ((20, 6), (19, 6)),
        ((21, 6), (20, 6)),
    ];
    let positions: Vec<_> = first.iter().map(|turn| turn.positions).collect();
    let expected: Vec<_> = expected
        .iter()
        .map(|&((px, py), (rx, ry))| (Cell::new(px, py), Cell::new(rx, ry)))
        .collect();
    assert_eq!(positions, expected);
    assert!(first.iter().all(|turn| turn.moves > 0));
}

#[derive(Debug, PartialEq, Eq)]
struct TurnRecord {
    positions: (Cell, Cell),
    moves: usize,
}

fn replay(script: &str) -> Vec<TurnRecord> {
    let mut session = Session::new(built_in_world(), TurnResolver::default());

    script
        .chars()
        .map(|key| {
            let report = session
                .submit_input(delta_for(key))
                .expect("every scripted key resolves a turn");
            let moves = report
                .events()
                .iter()
                .filter(|event| matches!(event, Event::EntityMoved { .. }))
                .count();
            TurnRecord {
                positions: (position(&session, 0), position(&session, 1)),
                moves,
            }
        })
        .collect()
}

fn position(session: &Session, id: u32) -> Cell {
    query::entity_cell(session.world(), EntityId::new(id)).expect("entity exists")
}

fn delta_for(key: char) -> Delta {
    match key {
        'h' => Delta::new(-1, 0),
        'j' => Delta::new(0, 1),
        'k' => Delta::new(0, -1),
        'l' => Delta::new(1, 0),
        other => panic!("unexpected script key {other:?}"),
    }
}

fn built_in_world() -> World {
    let mut walls = Vec::new();
    for x in 10..=40 {
        walls.push(Cell::new(x, 5));
        walls.push(Cell::new(x, 15));
    }
    for y in 5..=15 {
        walls.push(Cell::new(10, y));
        walls.push(Cell::new(40, y));
    }
    let grid = Grid::new(50, 20, &walls).expect("grid builds");

    World::new(
        grid,
        &[
            EntitySeed::new(EntityKind::Controlled, Cell::new(20, 10)),
            EntitySeed::new(EntityKind::Autonomous(Creature::Rat), Cell::new(30, 12)),
        ],
    )
    .expect("world builds")
}
