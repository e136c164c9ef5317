//! Timed enemy spawning
//!
//! Each level arms one timer per [`SpawnRule`]. Timers run on accumulated
//! frame time; every full interval produces one enemy in a pending buffer that
//! the session merges into the live enemy list at a fixed point in the frame.
//! Arming always cancels the previous level's timers first.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::enemy::{Axis, Enemy, EnemyKind};
use super::level::{SpawnRule, SpawnSide};

/// Catch-up limit per timer per poll; longer stalls drop the missed spawns
const MAX_SPAWNS_PER_POLL: u32 = 4;

#[derive(Debug, Clone)]
struct SpawnTimer {
    rule: SpawnRule,
    accumulator: f32,
}

/// Owner of the current level's spawn timers
#[derive(Debug, Clone)]
pub struct SpawnScheduler {
    rng: Pcg32,
    timers: Vec<SpawnTimer>,
    /// Bumped on every arm/cancel so stale state is detectable
    generation: u64,
}

impl SpawnScheduler {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            timers: Vec::new(),
            generation: 0,
        }
    }

    /// Replace all timers with those of `level`. Invalid rules are logged and skipped.
    pub fn arm(&mut self, level: u32, rules: &[SpawnRule]) {
        self.cancel();
        for rule in rules {
            if let Err(e) = rule.validate() {
                log::warn!("level {}: skipping spawn rule: {}", level, e);
                continue;
            }
            self.timers.push(SpawnTimer {
                rule: rule.clone(),
                accumulator: 0.0,
            });
        }
        log::debug!(
            "level {}: armed {} spawn timer(s), generation {}",
            level,
            self.timers.len(),
            self.generation
        );
    }

    /// Drop every timer; returns how many were active
    pub fn cancel(&mut self) -> usize {
        let cancelled = self.timers.len();
        self.timers.clear();
        self.generation += 1;
        cancelled
    }

    pub fn active_timers(&self) -> usize {
        self.timers.len()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Advance every timer by `dt` and push due enemies into `out`.
    ///
    /// `next_id` supplies enemy ids and is advanced for each spawn.
    pub fn poll(&mut self, dt: f32, (cols, rows): (u32, u32), next_id: &mut u32, out: &mut Vec<Enemy>) {
        if dt <= 0.0 {
            return;
        }
        let Self { rng, timers, .. } = self;
        for timer in timers.iter_mut() {
            timer.accumulator += dt;
            let mut fired = 0;
            while timer.accumulator >= timer.rule.interval {
                if fired == MAX_SPAWNS_PER_POLL {
                    log::debug!("spawn timer fell behind; dropping missed intervals");
                    timer.accumulator %= timer.rule.interval;
                    break;
                }
                fired += 1;
                timer.accumulator -= timer.rule.interval;
                let enemy = spawn_enemy(rng, &timer.rule, *next_id, (cols, rows));
                log::debug!(
                    "spawned {:?} #{} at ({:.1}, {:.1}) speed {:.2}",
                    enemy.kind(),
                    enemy.id,
                    enemy.location.x,
                    enemy.location.y,
                    enemy.current_speed
                );
                *next_id += 1;
                out.push(enemy);
            }
        }
    }
}

fn spawn_enemy(rng: &mut Pcg32, rule: &SpawnRule, id: u32, (cols, rows): (u32, u32)) -> Enemy {
    let lane = rule.lanes[rng.random_range(0..rule.lanes.len())] as f32;
    let speed = if rule.min_speed < rule.max_speed {
        rng.random_range(rule.min_speed..=rule.max_speed)
    } else {
        rule.min_speed
    };
    let from_start = match rule.side {
        SpawnSide::Start => true,
        SpawnSide::End => false,
        SpawnSide::Either => rng.random_bool(0.5),
    };
    let speed = if from_start { speed } else { -speed };
    let extent = match rule.axis {
        Axis::Horizontal => cols,
        Axis::Vertical => rows,
    } as f32;

    // Walkers enter from just off the board; spiders stay on it
    let along = match (rule.kind, from_start) {
        (EnemyKind::Spider, true) => 0.0,
        (EnemyKind::Spider, false) => extent - 1.0,
        (_, true) => -1.0,
        (_, false) => extent,
    };
    let location = match rule.axis {
        Axis::Horizontal => Vec2::new(along, lane),
        Axis::Vertical => Vec2::new(lane, along),
    };

    match rule.kind {
        EnemyKind::Zombie => Enemy::zombie(id, location, rule.axis, speed),
        EnemyKind::Spider => Enemy::spider(id, location, rule.axis, speed, (0.0, extent - 1.0), rule.pause),
        EnemyKind::Ghost => Enemy::ghost(id, location, speed, rule.attack_factor),
    }
}
