//! The shipped level set

use super::{
    CostumeSpec, EnemySpec, LevelMap, LevelRecipe, ObstacleSpec, RowTile, SpawnRule, SpawnSide,
};
use crate::sim::color::Color::{self, Blue, Gray, Red, Yellow};
use crate::sim::enemy::{Axis, EnemyKind};
use crate::sim::grid::Cell;

use RowTile::{Grass, Stone, Water};

fn rock(color: Color, x: i32, y: i32) -> ObstacleSpec {
    ObstacleSpec::Rock { color, x, y }
}

fn jack(x: i32, y: i32) -> ObstacleSpec {
    ObstacleSpec::JackOLantern { x, y }
}

fn skull(x: i32, y: i32) -> ObstacleSpec {
    ObstacleSpec::Skull { x, y }
}

fn web(x: i32, y: i32) -> ObstacleSpec {
    ObstacleSpec::Web { x, y }
}

fn laser(color: Color, left: i32, right: i32, row: i32) -> ObstacleSpec {
    ObstacleSpec::Laser {
        color,
        left,
        right,
        row,
    }
}

fn dwarf(color: Color, x: i32, y: i32) -> CostumeSpec {
    CostumeSpec::Dwarf { color, x, y }
}

fn laser_man(color: Color, x: i32, y: i32) -> CostumeSpec {
    CostumeSpec::LaserMan { color, x, y }
}

fn zombie(x: f32, y: f32, speed: f32) -> EnemySpec {
    EnemySpec::Zombie {
        x,
        y,
        axis: Axis::Horizontal,
        speed,
    }
}

fn zombie_down(x: f32, y: f32, speed: f32) -> EnemySpec {
    EnemySpec::Zombie {
        x,
        y,
        axis: Axis::Vertical,
        speed,
    }
}

fn spider(x: f32, y: f32, axis: Axis, speed: f32, range: (f32, f32)) -> EnemySpec {
    EnemySpec::Spider {
        x,
        y,
        axis,
        speed,
        min: range.0,
        max: range.1,
        pause: 0.5,
    }
}

fn ghost(x: f32, y: f32, speed: f32) -> EnemySpec {
    EnemySpec::Ghost {
        x,
        y,
        speed,
        attack_factor: 2.5,
    }
}

fn spawn(kind: EnemyKind, interval: f32, lanes: &[i32], speed: (f32, f32), side: SpawnSide) -> SpawnRule {
    SpawnRule {
        interval,
        kind,
        axis: Axis::Horizontal,
        lanes: lanes.to_vec(),
        min_speed: speed.0,
        max_speed: speed.1,
        side,
        attack_factor: 2.5,
        pause: 0.5,
    }
}

fn spawn_down(kind: EnemyKind, interval: f32, lanes: &[i32], speed: (f32, f32)) -> SpawnRule {
    SpawnRule {
        axis: Axis::Vertical,
        ..spawn(kind, interval, lanes, speed, SpawnSide::Start)
    }
}

struct Board {
    cols: u32,
    rows: u32,
    start: (i32, i32),
    finish: (i32, i32),
    tiles: Vec<RowTile>,
}

fn level(
    board: Board,
    obstacles: Vec<ObstacleSpec>,
    costumes: Vec<CostumeSpec>,
    initial: Vec<EnemySpec>,
    spawns: Vec<SpawnRule>,
) -> LevelMap {
    LevelMap {
        num_cols: board.cols,
        num_rows: board.rows,
        player_start: Cell::new(board.start.0, board.start.1),
        player_finish: Cell::new(board.finish.0, board.finish.1),
        row_layout: board.tiles,
        obstacles,
        costumes,
        recipe: LevelRecipe { initial, spawns },
    }
}

pub(super) fn levels() -> Vec<LevelMap> {
    use EnemyKind::{Ghost, Spider, Zombie};
    use SpawnSide::{End, Either, Start};

    vec![
        // Zombies only
        level(
            Board {
                cols: 4,
                rows: 4,
                start: (1, 3),
                finish: (0, 0),
                tiles: vec![Grass, Stone, Stone, Water],
            },
            vec![],
            vec![],
            vec![zombie(-1.0, 1.0, 1.5), zombie(4.0, 2.0, -1.0)],
            vec![spawn(Zombie, 2.5, &[1, 2], (1.0, 2.0), Either)],
        ),
        // Zombies bouncing off rocks
        level(
            Board {
                cols: 5,
                rows: 5,
                start: (4, 2),
                finish: (4, 0),
                tiles: vec![Grass, Stone, Stone, Stone, Water],
            },
            vec![rock(Gray, 4, 1), rock(Gray, 3, 2)],
            vec![],
            vec![zombie(0.0, 1.0, 1.5), zombie(0.0, 2.0, 1.0), zombie(5.0, 3.0, -1.5)],
            vec![spawn(Zombie, 3.0, &[1, 2, 3], (1.0, 2.0), Start)],
        ),
        // Zombie apocalypse; the dwarf
        level(
            Board {
                cols: 5,
                rows: 5,
                start: (1, 4),
                finish: (0, 0),
                tiles: vec![Grass, Stone, Stone, Stone, Water],
            },
            vec![
                rock(Red, 2, 0),
                rock(Red, 3, 0),
                rock(Red, 4, 0),
                rock(Gray, 3, 1),
                rock(Gray, 2, 2),
                rock(Gray, 3, 4),
            ],
            vec![dwarf(Red, 4, 4)],
            vec![zombie(-1.0, 1.0, 2.0), zombie(5.0, 2.0, -1.5), zombie(-1.0, 3.0, 1.0)],
            vec![spawn(Zombie, 1.5, &[1, 2, 3], (1.0, 2.5), Either)],
        ),
        // More rock smashing
        level(
            Board {
                cols: 5,
                rows: 5,
                start: (1, 4),
                finish: (4, 0),
                tiles: vec![Stone, Grass, Stone, Stone, Water],
            },
            vec![
                rock(Red, 4, 1),
                rock(Gray, 3, 0),
                rock(Gray, 2, 3),
                rock(Gray, 2, 4),
                rock(Gray, 4, 3),
            ],
            vec![dwarf(Red, 4, 4)],
            vec![zombie(-1.0, 0.0, 1.5), zombie(-1.0, 2.0, 1.0), zombie(5.0, 3.0, -1.0)],
            vec![
                spawn(Zombie, 2.0, &[0, 2, 3], (1.0, 2.0), Either),
            ],
        ),
        // Jack-o-lanterns and skulls
        level(
            Board {
                cols: 5,
                rows: 7,
                start: (2, 6),
                finish: (2, 0),
                tiles: vec![Stone, Stone, Stone, Stone, Stone, Stone, Grass],
            },
            vec![
                rock(Gray, 0, 5),
                rock(Gray, 0, 6),
                rock(Gray, 4, 5),
                rock(Gray, 4, 6),
                jack(1, 5),
                jack(1, 3),
                jack(1, 1),
                jack(3, 5),
                jack(3, 3),
                jack(3, 1),
                skull(1, 4),
                skull(1, 2),
                skull(1, 0),
                skull(3, 4),
                skull(3, 2),
                skull(3, 0),
                web(0, 0),
                web(0, 1),
                web(0, 2),
                web(0, 3),
                web(0, 4),
                web(4, 0),
                web(4, 1),
                web(4, 2),
                web(4, 3),
                web(4, 4),
            ],
            vec![],
            vec![zombie_down(2.0, -1.0, 1.5)],
            vec![spawn_down(Zombie, 2.5, &[2], (1.0, 2.0))],
        ),
        // Spiders
        level(
            Board {
                cols: 6,
                rows: 6,
                start: (0, 5),
                finish: (5, 0),
                tiles: vec![Grass, Stone, Stone, Stone, Stone, Water],
            },
            vec![
                rock(Gray, 0, 1),
                rock(Gray, 1, 4),
                rock(Red, 0, 4),
                rock(Red, 5, 4),
                rock(Red, 4, 5),
                rock(Yellow, 1, 1),
                laser(Red, 1, 3, 3),
                laser(Red, 2, 5, 1),
                web(2, 4),
                web(3, 4),
                web(4, 4),
            ],
            vec![dwarf(Red, 0, 3), dwarf(Yellow, 5, 5)],
            vec![
                spider(1.0, 2.0, Axis::Horizontal, 1.5, (0.0, 5.0)),
                spider(4.0, 0.0, Axis::Vertical, 1.0, (0.0, 3.0)),
            ],
            vec![spawn(Zombie, 3.5, &[2], (1.0, 1.5), Either)],
        ),
        // Ghosts
        level(
            Board {
                cols: 6,
                rows: 6,
                start: (4, 5),
                finish: (0, 0),
                tiles: vec![Stone, Grass, Grass, Grass, Grass, Stone],
            },
            vec![
                rock(Gray, 0, 1),
                rock(Gray, 1, 4),
                rock(Gray, 2, 2),
                rock(Gray, 3, 2),
                rock(Gray, 5, 3),
                skull(3, 0),
                skull(1, 3),
                skull(4, 4),
                jack(1, 1),
                jack(3, 4),
            ],
            vec![],
            vec![ghost(-1.0, 1.0, 0.8), ghost(6.0, 3.0, -0.8)],
            vec![spawn(Ghost, 3.0, &[1, 2, 3, 4], (0.6, 1.0), Either)],
        ),
        // Laserman
        level(
            Board {
                cols: 7,
                rows: 6,
                start: (3, 5),
                finish: (3, 0),
                tiles: vec![Water, Stone, Stone, Stone, Stone, Grass],
            },
            vec![
                laser(Blue, 2, 4, 3),
                laser(Blue, 1, 5, 2),
                laser(Blue, 0, 6, 1),
                web(0, 2),
                web(6, 2),
                web(0, 3),
                web(1, 3),
                web(5, 3),
                web(6, 3),
                web(0, 4),
                web(1, 4),
                web(2, 4),
                web(3, 4),
                web(4, 4),
                web(5, 4),
                web(6, 4),
            ],
            vec![laser_man(Blue, 0, 2), laser_man(Blue, 6, 2)],
            vec![],
            vec![],
        ),
        // Lasers of every color
        level(
            Board {
                cols: 7,
                rows: 6,
                start: (1, 5),
                finish: (6, 0),
                tiles: vec![Water, Stone, Stone, Stone, Stone, Grass],
            },
            vec![
                laser(Yellow, 0, 2, 4),
                laser(Blue, 0, 2, 2),
                laser(Yellow, 0, 5, 0),
                laser(Yellow, 2, 4, 1),
                laser(Blue, 2, 4, 3),
                laser(Red, 4, 6, 4),
                laser(Red, 4, 6, 3),
                laser(Red, 4, 6, 2),
                jack(2, 5),
                web(1, 3),
                web(1, 1),
                web(3, 4),
                web(5, 1),
                web(6, 1),
            ],
            vec![
                laser_man(Yellow, 0, 5),
                laser_man(Blue, 0, 3),
                laser_man(Yellow, 0, 1),
                laser_man(Blue, 3, 2),
                laser_man(Red, 6, 5),
            ],
            vec![spider(5.0, 5.0, Axis::Horizontal, 1.0, (3.0, 6.0))],
            vec![],
        ),
        // Everything so far
        level(
            Board {
                cols: 7,
                rows: 7,
                start: (0, 6),
                finish: (0, 0),
                tiles: vec![Grass, Stone, Grass, Grass, Stone, Stone, Grass],
            },
            vec![
                rock(Gray, 2, 0),
                rock(Gray, 5, 2),
                rock(Gray, 4, 6),
                rock(Gray, 6, 6),
                rock(Blue, 0, 1),
                rock(Blue, 1, 0),
                laser(Yellow, 4, 6, 5),
                jack(0, 2),
                jack(2, 2),
                skull(1, 2),
                web(0, 4),
                web(1, 4),
                web(2, 4),
                web(3, 4),
                web(0, 5),
                web(1, 5),
                web(2, 5),
                web(3, 5),
            ],
            vec![laser_man(Yellow, 1, 1), dwarf(Blue, 5, 6)],
            vec![
                zombie(-1.0, 1.0, 1.5),
                spider(6.0, 0.0, Axis::Vertical, 1.0, (0.0, 4.0)),
                ghost(7.0, 3.0, -0.8),
            ],
            vec![
                spawn(Zombie, 3.0, &[1, 4], (1.0, 2.0), Either),
                spawn(Ghost, 5.0, &[3], (0.6, 0.9), End),
            ],
        ),
        // The ghost costume
        level(
            Board {
                cols: 7,
                rows: 7,
                start: (0, 0),
                finish: (5, 6),
                tiles: vec![Stone, Grass, Grass, Grass, Grass, Grass, Grass],
            },
            vec![
                rock(Gray, 2, 1),
                rock(Gray, 3, 3),
                rock(Gray, 1, 6),
                rock(Gray, 5, 4),
                rock(Gray, 4, 6),
                skull(4, 1),
                skull(6, 1),
                skull(4, 2),
                skull(5, 2),
                skull(6, 2),
                jack(0, 2),
                jack(2, 4),
                jack(5, 5),
                web(4, 0),
                web(5, 0),
                web(6, 0),
            ],
            vec![CostumeSpec::Ghost { x: 5, y: 1 }],
            vec![ghost(-1.0, 3.0, 1.0), ghost(7.0, 5.0, -1.0)],
            vec![spawn(Ghost, 1.5, &[1, 2, 3, 4, 5, 6], (0.8, 1.4), Either)],
        ),
        // All costumes
        level(
            Board {
                cols: 7,
                rows: 7,
                start: (6, 5),
                finish: (6, 3),
                tiles: vec![Grass, Grass, Stone, Stone, Stone, Stone, Grass],
            },
            vec![
                rock(Gray, 5, 2),
                rock(Gray, 6, 2),
                rock(Gray, 5, 3),
                rock(Blue, 2, 4),
                rock(Blue, 6, 3),
                jack(0, 3),
                jack(0, 5),
                jack(2, 3),
                jack(2, 5),
                skull(1, 3),
                skull(1, 5),
                skull(0, 4),
                laser(Red, 5, 7, 4),
                web(0, 2),
                web(1, 2),
                web(2, 2),
                web(3, 2),
                web(4, 2),
                web(3, 3),
                web(4, 3),
                web(3, 4),
                web(4, 4),
            ],
            vec![
                laser_man(Red, 0, 6),
                CostumeSpec::Ghost { x: 1, y: 4 },
                dwarf(Blue, 1, 0),
            ],
            vec![ghost(-1.0, 0.0, 1.0), ghost(7.0, 1.0, -1.0)],
            vec![
                spawn(Ghost, 2.0, &[0, 1], (0.8, 1.2), Either),
                spawn(Zombie, 3.0, &[6], (1.0, 2.0), Start),
            ],
        ),
        // Arachnophobia
        level(
            Board {
                cols: 7,
                rows: 8,
                start: (3, 4),
                finish: (3, 2),
                tiles: vec![Stone, Stone, Stone, Stone, Water, Stone, Stone, Stone],
            },
            vec![
                web(0, 0),
                web(1, 0),
                web(2, 0),
                web(3, 0),
                web(4, 0),
                web(5, 0),
                web(6, 0),
                web(0, 1),
                web(1, 1),
                web(5, 1),
                web(6, 1),
                web(0, 2),
                web(1, 2),
                web(5, 2),
                web(6, 2),
                web(0, 3),
                web(1, 3),
                web(5, 3),
                web(6, 3),
                web(0, 5),
                web(1, 5),
                web(0, 6),
                web(1, 6),
                web(2, 6),
                web(3, 6),
                web(4, 6),
                web(5, 6),
                web(6, 6),
                web(0, 7),
                web(1, 7),
                web(2, 7),
                web(3, 7),
                web(4, 7),
                web(5, 7),
                web(6, 7),
                laser(Red, 2, 4, 3),
                laser(Red, 2, 4, 5),
                rock(Gray, 2, 4),
                rock(Gray, 5, 5),
                rock(Gray, 6, 5),
                jack(2, 1),
                jack(4, 1),
                skull(2, 2),
                skull(3, 1),
                skull(4, 2),
            ],
            vec![laser_man(Red, 3, 6)],
            vec![
                spider(0.0, 0.0, Axis::Vertical, 1.5, (0.0, 7.0)),
                spider(6.0, 7.0, Axis::Vertical, -1.5, (0.0, 7.0)),
                spider(0.0, 6.0, Axis::Horizontal, 2.0, (0.0, 6.0)),
                spider(6.0, 0.0, Axis::Horizontal, -1.0, (0.0, 6.0)),
            ],
            vec![spawn(Spider, 6.0, &[7], (1.0, 2.0), Either)],
        ),
        // Candy
        level(
            Board {
                cols: 7,
                rows: 7,
                start: (5, 6),
                finish: (2, 4),
                tiles: vec![Water; 7],
            },
            vec![
                rock(Blue, 6, 5),
                rock(Blue, 6, 4),
                rock(Blue, 6, 3),
                rock(Blue, 6, 2),
                rock(Blue, 6, 1),
                rock(Yellow, 1, 0),
                rock(Yellow, 2, 0),
                rock(Yellow, 3, 0),
                rock(Yellow, 4, 0),
                rock(Yellow, 5, 0),
                rock(Red, 0, 1),
                rock(Red, 0, 2),
                rock(Red, 0, 3),
                rock(Red, 0, 4),
                rock(Red, 0, 5),
                rock(Red, 4, 6),
                laser(Red, 3, 5, 3),
                laser(Red, 3, 5, 4),
                laser(Red, 3, 5, 5),
                laser(Red, 1, 3, 3),
                jack(5, 1),
                jack(3, 1),
                jack(1, 1),
                jack(1, 5),
                skull(2, 1),
                skull(4, 1),
                skull(1, 2),
                skull(1, 4),
                skull(2, 5),
                skull(5, 2),
            ],
            vec![
                dwarf(Blue, 6, 6),
                dwarf(Yellow, 6, 0),
                dwarf(Red, 0, 0),
                laser_man(Red, 0, 6),
            ],
            vec![ghost(-1.0, 2.0, 0.7)],
            vec![spawn(Ghost, 4.0, &[2, 3, 4], (0.5, 0.9), Either)],
        ),
    ]
}
