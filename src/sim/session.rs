//! The game session: board manager and level lifecycle
//!
//! A [`GameSession`] owns everything mutable in a running game: the player,
//! the live enemies, the working copies of the current level's obstacles and
//! costumes, the animation queue and the spawn timers. Drivers feed it
//! directional input and frame deltas, render it into a [`RenderSurface`], and
//! drain [`GameEvent`]s for presentation.
//!
//! Frame order in [`GameSession::update`]:
//! 1. poll spawn timers into the pending buffer
//! 2. merge pending spawns into the enemy list
//! 3. enemy updates
//! 4. enemy collision checks (a player hit restarts the level)
//! 5. out-of-bounds pruning
//! 6. costume and obstacle animation
//! 7. animation queue update

use std::collections::HashSet;

use glam::Vec2;

use super::animation::{AnimationQueue, Effect, LaserShield, PlayerHit, RockSmash, WebStruggle};
use super::color::Color;
use super::costume::{Costume, CostumeKind, CostumePickup};
use super::enemy::{Enemy, EnemyContact, EnemyKind};
use super::grid::{Cell, Direction};
use super::level::{LevelMap, LevelTable};
use super::obstacle::Obstacle;
use super::player::{Player, WebGate};
use super::spawn::SpawnScheduler;
use crate::consts::{CELL_HEIGHT, CELL_WIDTH};
use crate::error::ConfigError;
use crate::renderer::{RenderSurface, SpriteId, colors};
use crate::settings::Settings;
use crate::sprite_origin;

/// Level lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Playing,
    /// The final level was finished; no further transitions
    Complete,
}

/// What killed the player
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeathCause {
    Enemy(EnemyKind),
    Laser(Color),
}

/// Notifications for the presentation layer
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    LevelStarted { level: u32, restart: bool },
    PlayerDied { level: u32, cause: DeathCause },
    LevelCompleted { level: u32 },
    RockSmashed { cell: Cell, color: Color },
    CostumePickedUp {
        costume: Costume,
        replaced: Option<Costume>,
    },
    /// First pickup of a costume kind this session
    CostumeIntroduced {
        kind: CostumeKind,
        title: &'static str,
        caption: &'static str,
    },
    SessionComplete,
}

/// Result of one directional input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    Moved,
    /// Swallowed by a web
    Struggled,
    /// Target cell is off the board or not enterable
    Blocked,
    /// Session is complete
    Ignored,
}

/// What entering a cell does, copied out of the obstacle list
enum Interaction {
    Smash(usize),
    Beam(Color),
    Web,
}

pub struct GameSession {
    levels: LevelTable,
    settings: Settings,
    state: SessionState,
    level: u32,
    map: LevelMap,
    player: Player,
    enemies: Vec<Enemy>,
    /// Spawns waiting to join `enemies`
    pending: Vec<Enemy>,
    obstacles: Vec<Obstacle>,
    costumes: Vec<CostumePickup>,
    animations: AnimationQueue,
    spawner: SpawnScheduler,
    /// Costume kinds already introduced; never reset
    introduced: HashSet<CostumeKind>,
    events: Vec<GameEvent>,
    next_enemy_id: u32,
}

impl GameSession {
    /// Start a session at `settings.starting_level`
    pub fn new(levels: LevelTable, settings: Settings) -> Result<Self, ConfigError> {
        let start = settings.starting_level;
        let map = match levels.get(start) {
            Ok(map) => map.clone(),
            Err(e) => {
                log::warn!("cannot start session: {}", e);
                return Err(e);
            }
        };
        let mut session = Self {
            player: Player::new(map.player_start),
            spawner: SpawnScheduler::new(settings.seed),
            levels,
            settings,
            state: SessionState::Playing,
            // Set by begin_level
            level: 0,
            map,
            enemies: Vec::new(),
            pending: Vec::new(),
            obstacles: Vec::new(),
            costumes: Vec::new(),
            animations: AnimationQueue::new(),
            introduced: HashSet::new(),
            events: Vec::new(),
            next_enemy_id: 0,
        };
        session.begin_level(start)?;
        Ok(session)
    }

    /// Load level `n` and reset everything on the board to its initial state.
    ///
    /// An unknown level is logged and leaves the session untouched. A completed
    /// session stays complete.
    pub fn begin_level(&mut self, n: u32) -> Result<(), ConfigError> {
        if self.state == SessionState::Complete {
            log::warn!("begin_level({}) ignored: session is complete", n);
            return Ok(());
        }
        let map = match self.levels.get(n) {
            Ok(map) => map.clone(),
            Err(e) => {
                log::warn!("begin_level: {}", e);
                return Err(e);
            }
        };
        let restart = n == self.level;

        if let Some(shield) = self.player.reset(map.player_start) {
            self.animations.finish(shield);
        }
        self.spawner.arm(n, &map.recipe.spawns);
        self.pending.clear();
        self.enemies = map.build_enemies(&mut self.next_enemy_id);
        self.obstacles = map.build_obstacles();
        self.costumes = map.build_costumes();
        self.map = map;
        self.level = n;
        self.state = SessionState::Playing;

        log::info!(
            "level {} {}: {}x{} board, {} obstacle(s), {} enemy(ies)",
            n,
            if restart { "restarted" } else { "started" },
            self.map.num_cols,
            self.map.num_rows,
            self.obstacles.len(),
            self.enemies.len()
        );
        self.events.push(GameEvent::LevelStarted { level: n, restart });
        Ok(())
    }

    pub fn restart_current_level(&mut self) -> Result<(), ConfigError> {
        if self.state == SessionState::Complete {
            return Ok(());
        }
        self.begin_level(self.level)
    }

    /// Move on to the next level, or end the session after the last one
    pub fn advance_to_next_level(&mut self) -> Result<(), ConfigError> {
        if self.state == SessionState::Complete {
            return Ok(());
        }
        if self.levels.is_final(self.level) {
            self.spawner.cancel();
            self.enemies.clear();
            self.pending.clear();
            self.state = SessionState::Complete;
            log::info!("session complete after level {}", self.level);
            self.events.push(GameEvent::SessionComplete);
            return Ok(());
        }
        self.begin_level(self.level + 1)
    }

    /// May the player stand on `cell` with the current board and costumes?
    ///
    /// Pure: safe to call speculatively.
    pub fn player_can_occupy_location(&self, cell: Cell) -> bool {
        if !cell.within(self.map.num_cols, self.map.num_rows) {
            return false;
        }
        !self.obstacles.iter().any(|obstacle| match obstacle {
            Obstacle::Rock(rock) => rock.cell == cell && !self.player.can_smash(rock),
            Obstacle::Laser(laser) => laser.is_node(cell),
            Obstacle::Web(_) => false,
        })
    }

    /// Would standing on `cell` kill the player?
    pub fn is_lethal(&self, cell: Cell) -> bool {
        self.obstacles.iter().any(|obstacle| match obstacle {
            Obstacle::Laser(laser) => {
                laser.beam_covers(cell.x, cell.y) && !self.player.is_laser_immune(laser.color)
            }
            _ => false,
        })
    }

    /// One discrete move attempt
    pub fn handle_input(&mut self, direction: Direction) -> MoveOutcome {
        if self.state == SessionState::Complete {
            return MoveOutcome::Ignored;
        }
        if self.player.attempt_move() == WebGate::Struggle {
            self.animations
                .add(Effect::WebStruggle(WebStruggle::new(self.player.cell)));
            return MoveOutcome::Struggled;
        }
        let target = self.player.cell.step(direction);
        if !self.player_can_occupy_location(target) {
            return MoveOutcome::Blocked;
        }
        self.player.cell = target;
        self.update_board_for_new_player_location();
        MoveOutcome::Moved
    }

    fn update_board_for_new_player_location(&mut self) {
        let cell = self.player.cell;

        if let Some(shield) = self.player.shield.take() {
            self.animations.finish(shield);
        }

        self.check_costume_pickup(cell);

        let interaction = self
            .obstacles
            .iter()
            .enumerate()
            .find(|(_, o)| o.interacts_at(cell))
            .map(|(index, o)| match o {
                Obstacle::Rock(_) => Interaction::Smash(index),
                Obstacle::Laser(laser) => Interaction::Beam(laser.color),
                Obstacle::Web(_) => Interaction::Web,
            });
        match interaction {
            Some(Interaction::Smash(index)) => {
                if let Obstacle::Rock(rock) = self.obstacles.remove(index) {
                    let color = rock.color.unwrap_or(Color::Gray);
                    self.animations
                        .add(Effect::RockSmash(RockSmash::new(color, cell)));
                    log::debug!("rock smashed at ({}, {})", cell.x, cell.y);
                    self.events.push(GameEvent::RockSmashed { cell, color });
                }
            }
            Some(Interaction::Beam(color)) if self.player.is_laser_immune(color) => {
                let shield = self
                    .animations
                    .add(Effect::LaserShield(LaserShield::new(color, cell)));
                self.player.shield = Some(shield);
            }
            Some(Interaction::Beam(color)) => {
                self.kill_player(DeathCause::Laser(color));
                return;
            }
            Some(Interaction::Web) => self.player.catch_in_web(),
            None => {}
        }

        if cell == self.map.player_finish {
            log::info!("level {} completed", self.level);
            self.events.push(GameEvent::LevelCompleted { level: self.level });
            if let Err(e) = self.advance_to_next_level() {
                log::warn!("could not advance: {}", e);
            }
        }
    }

    fn check_costume_pickup(&mut self, cell: Cell) {
        let Some(index) = self.costumes.iter().position(|c| c.origin == cell) else {
            return;
        };
        let costume = self.costumes.remove(index).costume;
        let replaced = self.player.costumes.wear(costume);
        log::debug!("picked up {:?} (replaced {:?})", costume, replaced);
        self.events
            .push(GameEvent::CostumePickedUp { costume, replaced });

        let kind = costume.kind();
        if self.introduced.insert(kind) {
            self.events.push(GameEvent::CostumeIntroduced {
                kind,
                title: kind.title(),
                caption: kind.caption(),
            });
        }
    }

    fn kill_player(&mut self, cause: DeathCause) {
        log::info!("player died on level {}: {:?}", self.level, cause);
        self.animations
            .add(Effect::PlayerHit(PlayerHit::new(self.player.cell)));
        self.events.push(GameEvent::PlayerDied {
            level: self.level,
            cause,
        });
        if let Err(e) = self.restart_current_level() {
            log::warn!("restart failed: {}", e);
        }
    }

    /// Advance the simulation by `dt` seconds
    pub fn update(&mut self, dt: f32) {
        if self.state == SessionState::Playing {
            let dims = (self.map.num_cols, self.map.num_rows);
            self.spawner
                .poll(dt, dims, &mut self.next_enemy_id, &mut self.pending);
            self.enemies.append(&mut self.pending);

            for enemy in &mut self.enemies {
                enemy.update(dt, &self.player);
            }

            let mut hit = None;
            for enemy in &mut self.enemies {
                if enemy.check_collisions(&self.obstacles, &self.player) == EnemyContact::Player {
                    hit = Some(enemy.kind());
                    break;
                }
            }
            if let Some(kind) = hit {
                self.kill_player(DeathCause::Enemy(kind));
            }

            let before = self.enemies.len();
            self.enemies.retain(|e| !e.is_out_of_bounds(dims.0, dims.1));
            if self.enemies.len() != before {
                log::debug!("pruned {} enemy(ies)", before - self.enemies.len());
            }
        }

        for costume in &mut self.costumes {
            costume.update(dt);
        }
        for obstacle in &mut self.obstacles {
            obstacle.update(dt);
        }
        self.animations.update_all(dt);
    }

    /// Draw the board, then everything on it, then the effects
    pub fn render(&mut self, surface: &mut dyn RenderSurface) {
        for (y, tile) in self.map.row_layout.iter().enumerate() {
            for x in 0..self.map.num_cols {
                let origin = Vec2::new(x as f32 * CELL_WIDTH, y as f32 * CELL_HEIGHT);
                surface.draw_image(SpriteId::Tile(*tile), origin);
            }
        }
        for obstacle in &self.obstacles {
            obstacle.render(surface);
        }
        if self.levels.is_final(self.level) {
            surface.draw_image(SpriteId::Candy, sprite_origin(self.map.player_finish.as_vec2()));
        }
        for enemy in &self.enemies {
            enemy.render(surface);
        }
        self.player.render(surface);
        for costume in &self.costumes {
            costume.render(surface);
        }
        if self.settings.show_collision_boxes {
            self.render_collision_boxes(surface);
        }
        self.animations.render_all(surface);
    }

    fn render_collision_boxes(&self, surface: &mut dyn RenderSurface) {
        let boxes = self
            .obstacles
            .iter()
            .flat_map(Obstacle::collision_boxes)
            .chain(self.enemies.iter().map(|e| e.collision_box))
            .chain(std::iter::once(self.player.collision_box()));
        for b in boxes {
            surface.stroke_rect(b.origin(), b.size(), colors::DEBUG_BOX, 2.0);
        }
    }

    /// Take all events raised since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_complete(&self) -> bool {
        self.state == SessionState::Complete
    }

    pub fn current_level(&self) -> u32 {
        self.level
    }

    pub fn level_map(&self) -> &LevelMap {
        &self.map
    }

    pub fn levels(&self) -> &LevelTable {
        &self.levels
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn enemies(&self) -> &[Enemy] {
        &self.enemies
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn costumes(&self) -> &[CostumePickup] {
        &self.costumes
    }

    pub fn animations(&self) -> &AnimationQueue {
        &self.animations
    }

    pub fn spawner(&self) -> &SpawnScheduler {
        &self.spawner
    }

    /// Has this costume kind been introduced yet?
    pub fn is_introduced(&self, kind: CostumeKind) -> bool {
        self.introduced.contains(&kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::CommandRecorder;
    use crate::sim::animation::EffectKind;
    use crate::sim::level::{CostumeSpec, EnemySpec, LevelRecipe, ObstacleSpec, RowTile};

    fn open_level(cols: u32, rows: u32, start: Cell, finish: Cell) -> LevelMap {
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
        let table = LevelTable::new(levels).unwrap();
        GameSession::new(table, Settings::default()).unwrap()
    }

    #[test]
    fn test_begin_level_places_player() {
        let session = GameSession::new(LevelTable::builtin(), Settings::default()).unwrap();
        assert_eq!(session.current_level(), 1);
        assert_eq!(session.player().cell, Cell::new(1, 3));
        assert_eq!(session.state(), SessionState::Playing);
        assert_eq!(session.enemies().len(), 2);
    }

    #[test]
    fn test_unknown_level_leaves_session_alone() {
        let mut session = GameSession::new(LevelTable::builtin(), Settings::default()).unwrap();
        assert_eq!(session.begin_level(99), Err(ConfigError::UnknownLevel(99)));
        assert_eq!(session.current_level(), 1);

        let settings = Settings {
            starting_level: 0,
            ..Settings::default()
        };
        assert!(GameSession::new(LevelTable::builtin(), settings).is_err());
    }

    #[test]
    fn test_laser_node_blocks_and_beam_kills() {
        let mut level = open_level(5, 2, Cell::new(2, 1), Cell::new(4, 1));
        level.obstacles.push(ObstacleSpec::Laser {
            color: Color::Red,
            left: 1,
            right: 3,
            row: 0,
        });
        let mut session = session_with(vec![level]);
        assert!(!session.player_can_occupy_location(Cell::new(1, 0)));
        assert!(!session.player_can_occupy_location(Cell::new(3, 0)));
        assert!(session.player_can_occupy_location(Cell::new(2, 0)));
        assert!(session.is_lethal(Cell::new(2, 0)));

        session.player.cell = Cell::new(1, 1);
        session.drain_events();
        assert_eq!(session.handle_input(Direction::Right), MoveOutcome::Moved);
        assert_eq!(session.handle_input(Direction::Up), MoveOutcome::Moved);
        let events = session.drain_events();
        assert!(events.contains(&GameEvent::PlayerDied {
            level: 1,
            cause: DeathCause::Laser(Color::Red)
        }));
        assert_eq!(session.player().cell, Cell::new(2, 1));
        assert_eq!(session.animations().count(EffectKind::PlayerHit), 1);
    }

    #[test]
    fn test_laserman_crosses_with_shield() {
        let mut level = open_level(5, 3, Cell::new(2, 2), Cell::new(4, 2));
        level.obstacles.push(ObstacleSpec::Laser {
            color: Color::Blue,
            left: 0,
            right: 4,
            row: 1,
        });
        level.costumes.push(CostumeSpec::LaserMan {
            color: Color::Blue,
            x: 1,
            y: 2,
        });
        let mut session = session_with(vec![level]);

        session.handle_input(Direction::Left);
        assert!(session.player().is_laser_man());
        session.handle_input(Direction::Up);
        let shield = session.player().shield.unwrap();
        assert!(session.animations().contains(shield));

        // Leaving the beam finishes the shield; it renders once more and goes
        session.handle_input(Direction::Up);
        assert_eq!(session.player().shield, None);
        assert!(session.animations().contains(shield));
        let mut rec = CommandRecorder::new();
        session.render(&mut rec);
        assert!(!session.animations().contains(shield));
    }

    #[test]
    fn test_first_pickup_introduces_once() {
        let mut level = open_level(4, 1, Cell::new(0, 0), Cell::new(3, 0));
        level.costumes.push(CostumeSpec::Ghost { x: 1, y: 0 });
        let mut session = session_with(vec![level.clone(), level]);

        session.handle_input(Direction::Right);
        let events = session.drain_events();
        assert!(events.iter().any(|e| matches!(
            e,
            GameEvent::CostumeIntroduced {
                kind: CostumeKind::Ghost,
                ..
            }
        )));

        // Finish level 1 and pick the ghost up again on level 2
        session.handle_input(Direction::Right);
        session.handle_input(Direction::Right);
        assert_eq!(session.current_level(), 2);
        session.handle_input(Direction::Right);
        let events = session.drain_events();
        assert!(events.iter().any(|e| matches!(e, GameEvent::CostumePickedUp { .. })));
        assert!(!events.iter().any(|e| matches!(e, GameEvent::CostumeIntroduced { .. })));
        assert!(session.is_introduced(CostumeKind::Ghost));
    }

    #[test]
    fn test_enemy_hit_restarts_level() {
        let mut level = open_level(4, 2, Cell::new(2, 1), Cell::new(0, 0));
        level.recipe.initial.push(EnemySpec::Zombie {
            x: 0.0,
            y: 1.0,
            axis: Default::default(),
            speed: 3.0,
        });
        let mut session = session_with(vec![level]);
        session.handle_input(Direction::Left);
        session.drain_events();

        let mut died = false;
        for _ in 0..30 {
            session.update(1.0 / 60.0);
            if session
                .drain_events()
                .iter()
                .any(|e| matches!(e, GameEvent::PlayerDied { .. }))
            {
                died = true;
                break;
            }
        }
        assert!(died);
        assert_eq!(session.player().cell, Cell::new(2, 1));
        assert_eq!(session.enemies().len(), 1);
        assert_eq!(session.enemies()[0].location, Vec2::new(0.0, 1.0));
    }

    #[test]
    fn test_enemies_pruned_off_board() {
        let mut level = open_level(3, 2, Cell::new(0, 0), Cell::new(2, 0));
        level.recipe.initial.push(EnemySpec::Zombie {
            x: 2.9,
            y: 1.0,
            axis: Default::default(),
            speed: 2.0,
        });
        let mut session = session_with(vec![level]);
        session.update(0.1);
        assert!(session.enemies().is_empty());
    }

    #[test]
    fn test_final_level_completes_session() {
        let level = open_level(2, 1, Cell::new(0, 0), Cell::new(1, 0));
        let mut session = session_with(vec![level]);
        assert_eq!(session.handle_input(Direction::Right), MoveOutcome::Moved);
        assert!(session.is_complete());
        assert!(session.drain_events().contains(&GameEvent::SessionComplete));
        assert_eq!(session.handle_input(Direction::Left), MoveOutcome::Ignored);
        assert_eq!(session.spawner().active_timers(), 0);
        // Terminal: no way back into play
        assert_eq!(session.advance_to_next_level(), Ok(()));
        assert_eq!(session.restart_current_level(), Ok(()));
        assert!(session.is_complete());
    }

    #[test]
    fn test_begin_level_cannot_leave_complete() {
        let level = open_level(2, 1, Cell::new(0, 0), Cell::new(1, 0));
        let mut session = session_with(vec![level]);
        session.handle_input(Direction::Right);
        assert!(session.is_complete());
        session.drain_events();

        assert_eq!(session.begin_level(1), Ok(()));
        assert_eq!(session.state(), SessionState::Complete);
        assert_eq!(session.player().cell, Cell::new(1, 0));
        assert_eq!(session.spawner().active_timers(), 0);
        assert!(session.drain_events().is_empty());
        assert_eq!(session.handle_input(Direction::Left), MoveOutcome::Ignored);
    }

    #[test]
    fn test_huge_frame_delta_returns() {
        let mut session = GameSession::new(LevelTable::builtin(), Settings::default()).unwrap();
        session.update(1.0e8);
        // Everything that spawned has walked off the board and been pruned
        assert!(session.enemies().is_empty());
        session.update(1.0 / 60.0);
        assert_eq!(session.state(), SessionState::Playing);
    }

    #[test]
    fn test_render_order_and_candy() {
        let level = open_level(2, 2, Cell::new(0, 1), Cell::new(1, 0));
        let mut session = session_with(vec![level]);
        let mut rec = CommandRecorder::new();
        session.render(&mut rec);
        assert_eq!(rec.count_sprite(SpriteId::Tile(RowTile::Stone)), 4);
        assert_eq!(rec.count_sprite(SpriteId::Candy), 1);
        assert_eq!(rec.count_sprite(SpriteId::Player), 1);
        assert!(rec.is_balanced());
    }

    #[test]
    fn test_debug_boxes_drawn_when_enabled() {
        let mut level = open_level(3, 1, Cell::new(0, 0), Cell::new(2, 0));
        level.obstacles.push(ObstacleSpec::Skull { x: 1, y: 0 });
        let table = LevelTable::new(vec![level]).unwrap();
        let settings = Settings {
            show_collision_boxes: true,
            ..Settings::default()
        };
        let mut session = GameSession::new(table, settings).unwrap();
        let mut rec = CommandRecorder::new();
        session.render(&mut rec);
        let strokes = rec
            .commands
            .iter()
            .filter(|c| matches!(c, crate::renderer::DrawCommand::StrokeRect { .. }))
            .count();
        assert_eq!(strokes, 2);
    }
}
