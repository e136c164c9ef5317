//! End-to-end session behavior against custom and built-in levels

use glam::Vec2;
use proptest::prelude::*;

use trick_or_treat::Settings;
use trick_or_treat::renderer::{CommandRecorder, DrawCommand};
use trick_or_treat::sim::level::{CostumeSpec, LevelMap, LevelRecipe, ObstacleSpec, RowTile};
use trick_or_treat::sim::{
    Cell, Color, Costume, CostumeKind, Direction, EffectKind, GameEvent, GameSession, LevelTable,
    MoveOutcome, WebStatus, autopilot,
};

fn board(cols: u32, rows: u32, start: Cell, finish: Cell) -> LevelMap {
    LevelMap {
        num_cols: cols,
        num_rows: rows,
        player_start: start,
        player_finish: finish,
        row_layout: vec![RowTile::Stone; rows as usize],
        obstacles: Vec::new(),
        costumes: Vec::new(),
        recipe: LevelRecipe::default(),
    }
}

fn session_with(levels: Vec<LevelMap>) -> GameSession {
    GameSession::new(LevelTable::new(levels).unwrap(), Settings::default()).unwrap()
}

fn builtin_session() -> GameSession {
    GameSession::new(LevelTable::builtin(), Settings::default()).unwrap()
}

#[test]
fn web_takes_two_inputs_to_escape() {
    let mut level = board(3, 3, Cell::new(1, 2), Cell::new(0, 0));
    level.obstacles.push(ObstacleSpec::Web { x: 1, y: 1 });
    let mut session = session_with(vec![level]);

    assert_eq!(session.handle_input(Direction::Up), MoveOutcome::Moved);
    assert_eq!(session.player().web, WebStatus::Trapped { attempted: false });

    assert_eq!(session.handle_input(Direction::Up), MoveOutcome::Struggled);
    assert_eq!(session.player().cell, Cell::new(1, 1));
    assert_eq!(session.animations().count(EffectKind::WebStruggle), 1);

    assert_eq!(session.handle_input(Direction::Right), MoveOutcome::Moved);
    assert_eq!(session.player().cell, Cell::new(2, 1));
    assert_eq!(session.player().web, WebStatus::Free);
}

#[test]
fn rock_is_removed_exactly_once() {
    let mut level = board(3, 2, Cell::new(0, 0), Cell::new(2, 1));
    level.obstacles.push(ObstacleSpec::Rock {
        color: Color::Red,
        x: 1,
        y: 0,
    });
    level.obstacles.push(ObstacleSpec::Web { x: 2, y: 0 });
    level.costumes.push(CostumeSpec::Dwarf {
        color: Color::Red,
        x: 0,
        y: 1,
    });
    let mut session = session_with(vec![level]);

    session.handle_input(Direction::Down);
    assert!(session.player().is_dwarf());
    session.handle_input(Direction::Up);
    assert_eq!(session.obstacles().len(), 2);

    assert_eq!(session.handle_input(Direction::Right), MoveOutcome::Moved);
    assert_eq!(session.obstacles().len(), 1);
    assert_eq!(session.animations().count(EffectKind::RockSmash), 1);
    let smashed = session
        .drain_events()
        .into_iter()
        .filter(|e| matches!(e, GameEvent::RockSmashed { .. }))
        .count();
    assert_eq!(smashed, 1);

    // Walking over the empty cell again does nothing
    session.handle_input(Direction::Left);
    session.handle_input(Direction::Right);
    assert_eq!(session.obstacles().len(), 1);
    assert_eq!(session.animations().count(EffectKind::RockSmash), 1);
    assert!(
        !session
            .drain_events()
            .iter()
            .any(|e| matches!(e, GameEvent::RockSmashed { .. }))
    );
}

#[test]
fn colored_rock_denies_entry_without_matching_dwarf() {
    let mut level = board(3, 1, Cell::new(0, 0), Cell::new(2, 0));
    level.obstacles.push(ObstacleSpec::Rock {
        color: Color::Blue,
        x: 1,
        y: 0,
    });
    let mut session = session_with(vec![level]);

    assert!(!session.player_can_occupy_location(Cell::new(1, 0)));
    assert_eq!(session.handle_input(Direction::Right), MoveOutcome::Blocked);
    assert_eq!(session.player().cell, Cell::new(0, 0));

    let mut level3 = builtin_session();
    level3.begin_level(3).unwrap();
    assert!(!level3.player_can_occupy_location(Cell::new(2, 0)));
}

#[test]
fn second_costume_of_a_kind_replaces_the_first() {
    let mut level = board(4, 2, Cell::new(0, 0), Cell::new(3, 1));
    level.costumes.push(CostumeSpec::Dwarf {
        color: Color::Red,
        x: 1,
        y: 0,
    });
    level.costumes.push(CostumeSpec::Dwarf {
        color: Color::Blue,
        x: 2,
        y: 0,
    });
    level.costumes.push(CostumeSpec::Ghost { x: 3, y: 0 });
    let mut session = session_with(vec![level]);

    session.handle_input(Direction::Right);
    session.handle_input(Direction::Right);
    let costumes = &session.player().costumes;
    assert_eq!(costumes.len(), 1);
    assert_eq!(costumes.get(CostumeKind::Dwarf), Some(Costume::Dwarf(Color::Blue)));
    assert!(session.drain_events().contains(&GameEvent::CostumePickedUp {
        costume: Costume::Dwarf(Color::Blue),
        replaced: Some(Costume::Dwarf(Color::Red)),
    }));

    // A different kind stacks
    session.handle_input(Direction::Right);
    assert_eq!(session.player().costumes.len(), 2);
    assert!(session.costumes().is_empty());
}

#[test]
fn restart_resets_enemies_without_leaking_timers() {
    let mut session = builtin_session();
    let initial: Vec<(Vec2, f32)> = session
        .enemies()
        .iter()
        .map(|e| (e.location, e.current_speed))
        .collect();
    let timers = session.spawner().active_timers();
    assert_eq!(timers, 1);

    for _ in 0..180 {
        session.update(1.0 / 60.0);
    }
    session.restart_current_level().unwrap();
    session.restart_current_level().unwrap();

    let after: Vec<(Vec2, f32)> = session
        .enemies()
        .iter()
        .map(|e| (e.location, e.current_speed))
        .collect();
    assert_eq!(after, initial);
    assert_eq!(session.spawner().active_timers(), timers);
    assert_eq!(session.player().cell, Cell::new(1, 3));

    // With one timer per rule, a single interval adds at most one enemy
    let before = session.enemies().len();
    for _ in 0..150 {
        session.update(1.0 / 60.0);
    }
    assert!(session.enemies().len() <= before + 1);
}

#[test]
fn partially_bad_level_still_plays() {
    let mut level = board(3, 2, Cell::new(0, 1), Cell::new(2, 0));
    level.obstacles.push(ObstacleSpec::Laser {
        color: Color::Gray,
        left: 0,
        right: 2,
        row: 0,
    });
    level.obstacles.push(ObstacleSpec::Web { x: 1, y: 1 });
    level.costumes.push(CostumeSpec::LaserMan {
        color: Color::Gray,
        x: 2,
        y: 1,
    });
    let mut session = session_with(vec![level]);

    assert_eq!(session.obstacles().len(), 1);
    assert!(session.costumes().is_empty());
    // The skipped beam leaves row 0 open
    assert!(session.player_can_occupy_location(Cell::new(0, 0)));
    assert_eq!(session.handle_input(Direction::Up), MoveOutcome::Moved);
    assert_eq!(session.handle_input(Direction::Right), MoveOutcome::Moved);
    assert_eq!(session.handle_input(Direction::Right), MoveOutcome::Moved);
    assert!(session.is_complete());
}

#[test]
fn restart_restores_obstacles_and_costumes() {
    let mut level = board(3, 2, Cell::new(0, 0), Cell::new(2, 1));
    level.obstacles.push(ObstacleSpec::Rock {
        color: Color::Red,
        x: 1,
        y: 0,
    });
    level.costumes.push(CostumeSpec::Dwarf {
        color: Color::Red,
        x: 0,
        y: 1,
    });
    let mut session = session_with(vec![level]);
    session.handle_input(Direction::Down);
    session.handle_input(Direction::Up);
    session.handle_input(Direction::Right);
    assert!(session.obstacles().is_empty());

    session.restart_current_level().unwrap();
    assert_eq!(session.obstacles().len(), 1);
    assert_eq!(session.costumes().len(), 1);
    assert!(session.player().costumes.is_empty());
}

#[test]
fn reaching_the_finish_advances_to_level_two() {
    let mut session = builtin_session();
    assert_eq!(session.player().cell, Cell::new(1, 3));
    for direction in [Direction::Up, Direction::Up, Direction::Up, Direction::Left] {
        assert_eq!(session.handle_input(direction), MoveOutcome::Moved);
    }
    assert_eq!(session.current_level(), 2);
    assert_eq!(session.player().cell, Cell::new(4, 2));
    let events = session.drain_events();
    assert!(events.contains(&GameEvent::LevelCompleted { level: 1 }));
    assert!(events.contains(&GameEvent::LevelStarted {
        level: 2,
        restart: false
    }));
}

#[test]
fn completed_effect_renders_one_last_time() {
    let mut level = board(3, 2, Cell::new(0, 0), Cell::new(0, 1));
    level.obstacles.push(ObstacleSpec::Rock {
        color: Color::Yellow,
        x: 2,
        y: 0,
    });
    level.costumes.push(CostumeSpec::Dwarf {
        color: Color::Yellow,
        x: 1,
        y: 0,
    });
    let mut session = session_with(vec![level]);
    session.handle_input(Direction::Right);
    session.handle_input(Direction::Right);
    assert_eq!(session.animations().count(EffectKind::RockSmash), 1);

    // Each shard draws under its own rotation
    let shards = |rec: &CommandRecorder| {
        rec.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Rotate(_)))
            .count()
    };

    // Long enough for every shard to fade
    session.update(1.0);
    let mut rec = CommandRecorder::new();
    session.render(&mut rec);
    assert_eq!(shards(&rec), 3);
    assert!(session.animations().is_empty());

    rec.clear();
    session.render(&mut rec);
    assert_eq!(shards(&rec), 0);
}

#[test]
fn autopilot_clears_the_laserman_level() {
    let settings = Settings {
        starting_level: 8,
        ..Settings::default()
    };
    let mut session = GameSession::new(LevelTable::builtin(), settings).unwrap();
    for _ in 0..200 {
        if session.current_level() != 8 {
            break;
        }
        let direction = autopilot::next_move(&session).expect("level 8 has a route");
        session.handle_input(direction);
    }
    assert_eq!(session.current_level(), 9);
    assert!(
        !session
            .drain_events()
            .iter()
            .any(|e| matches!(e, GameEvent::PlayerDied { .. }))
    );
}

proptest! {
    #[test]
    fn occupancy_query_is_pure(level in 1u32..=14, x in -2i32..9, y in -2i32..10) {
        let mut session = builtin_session();
        session.begin_level(level).unwrap();
        let obstacles = session.obstacles().to_vec();
        let cell = session.player().cell;

        let first = session.player_can_occupy_location(Cell::new(x, y));
        let second = session.player_can_occupy_location(Cell::new(x, y));
        prop_assert_eq!(first, second);
        prop_assert_eq!(session.obstacles(), &obstacles[..]);
        prop_assert_eq!(session.player().cell, cell);
    }
}
