//! Transient visual effects and the queue that owns them
//!
//! Effects are small state structs with a step function; the queue stores them
//! by id and decides when they leave. An effect reports `is_complete`, gets
//! rendered one final time, and is then removed by the queue after the whole
//! render pass. Effects never remove themselves.

use std::f32::consts::{PI, TAU};

use glam::Vec2;

use super::color::Color;
use super::grid::Cell;
use crate::cell_center;
use crate::consts::EFFECT_Y_ADJUST;
use crate::renderer::{RenderSurface, colors};

/// Queue-assigned effect identity
pub type EffectId = u64;

/// Effect type tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EffectKind {
    RockSmash,
    LaserShield,
    WebStruggle,
    PlayerHit,
}

fn effect_origin(cell: Cell) -> Vec2 {
    cell_center(cell.as_vec2(), EFFECT_Y_ADJUST)
}

/// A spinning, fading square thrown out of a smashed rock
#[derive(Debug, Clone, PartialEq)]
struct Shard {
    pos: Vec2,
    width: f32,
    alpha: f32,
    rotation: f32,
    /// Displacement per unit of `speed * dt`
    heading: Vec2,
    speed: f32,
    fade: f32,
    spin: f32,
}

impl Shard {
    fn step(&mut self, dt: f32) {
        let ds = self.speed * dt;
        self.pos += self.heading * ds;
        self.alpha = (self.alpha - self.fade * dt).max(0.0);
        self.rotation += self.spin * dt;
    }
}

/// Rock shards flying apart
#[derive(Debug, Clone, PartialEq)]
pub struct RockSmash {
    color: Color,
    shards: [Shard; 3],
}

impl RockSmash {
    pub fn new(color: Color, cell: Cell) -> Self {
        let origin = effect_origin(cell);
        let shard = |width, heading, speed, fade, spin| Shard {
            pos: origin,
            width,
            alpha: 1.0,
            rotation: 0.0,
            heading,
            speed,
            fade,
            spin,
        };
        Self {
            color,
            shards: [
                shard(50.0, Vec2::new(-50.0, 50.0), 2.0, 4.0, TAU),
                shard(80.0, Vec2::new(50.0, 20.0), 2.0, 3.0, PI),
                shard(60.0, Vec2::new(-5.0, -20.0), 10.0, 2.0, 3.0 * PI),
            ],
        }
    }

    fn update(&mut self, dt: f32) {
        for shard in &mut self.shards {
            shard.step(dt);
        }
    }

    /// Done once every shard has faded out
    fn is_complete(&self) -> bool {
        self.shards.iter().all(|s| s.alpha == 0.0)
    }

    fn render(&self, surface: &mut dyn RenderSurface) {
        surface.save();
        for shard in &self.shards {
            surface.save();
            surface.translate(shard.pos);
            surface.rotate(shard.rotation);
            let half = Vec2::splat(shard.width / 2.0);
            let size = Vec2::splat(shard.width);
            surface.fill_rect(-half, size, colors::shade(self.color).with_alpha(shard.alpha));
            surface.stroke_rect(
                -half,
                size,
                colors::highlight(self.color).with_alpha(shard.alpha),
                20.0,
            );
            surface.restore();
        }
        surface.restore();
    }
}

/// Looping bubble around a player standing in a beam
#[derive(Debug, Clone, PartialEq)]
pub struct LaserShield {
    color: Color,
    origin: Vec2,
    ring_radius: f32,
    ring_width: f32,
    orbit_rotation: f32,
}

impl LaserShield {
    const BACKGROUND_RADIUS: f32 = 70.0;
    const RING_MAX_RADIUS: f32 = 100.0;
    const RING_START_WIDTH: f32 = 20.0;
    const RING_SPEED: f32 = 100.0;
    const ORBIT_RADIUS: f32 = 45.0;
    const ORBIT_SIZE: f32 = 8.0;
    const ORBIT_SPEED: f32 = 2.0;

    pub fn new(color: Color, cell: Cell) -> Self {
        Self {
            color,
            origin: effect_origin(cell),
            ring_radius: 0.0,
            ring_width: Self::RING_START_WIDTH,
            orbit_rotation: 0.0,
        }
    }

    fn update(&mut self, dt: f32) {
        let ds = Self::RING_SPEED * dt;
        self.ring_radius = (self.ring_radius + ds).min(Self::RING_MAX_RADIUS);
        self.ring_width = (self.ring_width - 0.5 * ds).max(0.0);
        if self.ring_radius == Self::RING_MAX_RADIUS || self.ring_width == 0.0 {
            self.ring_radius = 0.0;
            self.ring_width = Self::RING_START_WIDTH;
        }
        self.orbit_rotation = (self.orbit_rotation + TAU * Self::ORBIT_SPEED * dt) % TAU;
    }

    fn render(&self, surface: &mut dyn RenderSurface) {
        surface.save();
        surface.fill_arc(
            self.origin,
            Self::BACKGROUND_RADIUS,
            0.0,
            TAU,
            colors::shade(self.color).with_alpha(0.8),
        );
        surface.stroke_arc(
            self.origin,
            self.ring_radius,
            0.0,
            TAU,
            colors::highlight(self.color),
            self.ring_width,
        );
        surface.translate(self.origin);
        surface.rotate(self.orbit_rotation);
        let size = Vec2::splat(Self::ORBIT_SIZE);
        surface.fill_rect(
            Vec2::new(-size.x / 2.0, -size.y / 2.0 - Self::ORBIT_RADIUS),
            size,
            colors::WHITE,
        );
        surface.restore();
    }
}

/// One of the struggle diamonds
#[derive(Debug, Clone, PartialEq)]
struct Diamond {
    width: f32,
    line_width: f32,
    alpha: f32,
    speed: f32,
    done: bool,
}

/// Two diamonds snapping tight while the player fights a web
#[derive(Debug, Clone, PartialEq)]
pub struct WebStruggle {
    origin: Vec2,
    outer: Diamond,
    inner: Diamond,
}

impl WebStruggle {
    const MAX_INNER_WIDTH: f32 = 50.0;

    pub fn new(cell: Cell) -> Self {
        Self {
            origin: effect_origin(cell),
            outer: Diamond {
                width: 80.0,
                line_width: 20.0,
                alpha: 0.0,
                speed: 150.0,
                done: false,
            },
            inner: Diamond {
                width: Self::MAX_INNER_WIDTH,
                line_width: 20.0,
                alpha: 1.0,
                speed: 100.0,
                done: false,
            },
        }
    }

    fn update(&mut self, dt: f32) {
        let outer = &mut self.outer;
        let ds = outer.speed * dt;
        outer.line_width = (outer.line_width - ds).max(0.0);
        outer.alpha = (outer.alpha + ds).min(1.0);
        if outer.line_width == 0.0 && outer.alpha == 1.0 {
            outer.done = true;
        }

        let inner = &mut self.inner;
        let ds = inner.speed * dt;
        inner.width = (inner.width + 2.0 * ds).min(Self::MAX_INNER_WIDTH);
        inner.line_width = (inner.line_width - ds).max(0.0);
        if inner.line_width == 0.0 && inner.width == Self::MAX_INNER_WIDTH {
            inner.done = true;
        }
    }

    fn is_complete(&self) -> bool {
        self.outer.done && self.inner.done
    }

    fn render(&self, surface: &mut dyn RenderSurface) {
        surface.save();
        surface.translate(self.origin);
        surface.rotate(PI / 4.0);
        for (diamond, color) in [
            (&self.outer, colors::WHITE),
            (&self.inner, colors::STRUGGLE_INNER),
        ] {
            let half = Vec2::splat(diamond.width / 2.0);
            surface.stroke_rect(
                -half,
                Vec2::splat(diamond.width),
                color.with_alpha(diamond.alpha),
                diamond.line_width,
            );
        }
        surface.restore();
    }
}

/// Flash where the player was caught
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerHit {
    origin: Vec2,
    radius: f32,
    alpha: f32,
}

impl PlayerHit {
    const GROWTH: f32 = 200.0;
    const FADE: f32 = 2.5;

    pub fn new(cell: Cell) -> Self {
        Self {
            origin: effect_origin(cell),
            radius: 10.0,
            alpha: 1.0,
        }
    }

    fn update(&mut self, dt: f32) {
        self.radius += Self::GROWTH * dt;
        self.alpha = (self.alpha - Self::FADE * dt).max(0.0);
    }

    fn is_complete(&self) -> bool {
        self.alpha == 0.0
    }

    fn render(&self, surface: &mut dyn RenderSurface) {
        let color = colors::PLAYER_HIT.with_alpha(self.alpha);
        surface.fill_arc(self.origin, self.radius * 0.5, 0.0, TAU, color.with_alpha(self.alpha * 0.5));
        surface.stroke_arc(self.origin, self.radius, 0.0, TAU, color, 8.0);
    }
}

/// A transient effect
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    RockSmash(RockSmash),
    LaserShield(LaserShield),
    WebStruggle(WebStruggle),
    PlayerHit(PlayerHit),
}

impl Effect {
    pub fn kind(&self) -> EffectKind {
        match self {
            Effect::RockSmash(_) => EffectKind::RockSmash,
            Effect::LaserShield(_) => EffectKind::LaserShield,
            Effect::WebStruggle(_) => EffectKind::WebStruggle,
            Effect::PlayerHit(_) => EffectKind::PlayerHit,
        }
    }

    pub fn update(&mut self, dt: f32) {
        match self {
            Effect::RockSmash(e) => e.update(dt),
            Effect::LaserShield(e) => e.update(dt),
            Effect::WebStruggle(e) => e.update(dt),
            Effect::PlayerHit(e) => e.update(dt),
        }
    }

    /// The shield loops until the queue finishes it
    pub fn is_complete(&self) -> bool {
        match self {
            Effect::RockSmash(e) => e.is_complete(),
            Effect::LaserShield(_) => false,
            Effect::WebStruggle(e) => e.is_complete(),
            Effect::PlayerHit(e) => e.is_complete(),
        }
    }

    pub fn render(&self, surface: &mut dyn RenderSurface) {
        match self {
            Effect::RockSmash(e) => e.render(surface),
            Effect::LaserShield(e) => e.render(surface),
            Effect::WebStruggle(e) => e.render(surface),
            Effect::PlayerHit(e) => e.render(surface),
        }
    }
}

#[derive(Debug)]
struct Entry {
    id: EffectId,
    effect: Effect,
    /// Set by `finish`; counts as complete regardless of the effect's own state
    finished: bool,
}

impl Entry {
    fn is_complete(&self) -> bool {
        self.finished || self.effect.is_complete()
    }
}

/// Owner of every live effect
#[derive(Debug, Default)]
pub struct AnimationQueue {
    entries: Vec<Entry>,
    next_id: EffectId,
}

impl AnimationQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take ownership of `effect` and hand back its id
    pub fn add(&mut self, effect: Effect) -> EffectId {
        let id = self.next_id;
        self.next_id += 1;
        log::debug!("effect {} added ({:?})", id, effect.kind());
        self.entries.push(Entry {
            id,
            effect,
            finished: false,
        });
        id
    }

    /// Mark an effect complete; it renders once more and is then dropped.
    ///
    /// Returns false if no live effect has this id.
    pub fn finish(&mut self, id: EffectId) -> bool {
        match self.entries.iter_mut().find(|e| e.id == id) {
            Some(entry) => {
                entry.finished = true;
                true
            }
            None => false,
        }
    }

    pub fn update_all(&mut self, dt: f32) {
        for entry in &mut self.entries {
            entry.effect.update(dt);
        }
    }

    /// Render every effect, then drop the ones that are complete
    pub fn render_all(&mut self, surface: &mut dyn RenderSurface) {
        let mut completed = Vec::new();
        for entry in &self.entries {
            entry.effect.render(surface);
            if entry.is_complete() {
                completed.push(entry.id);
            }
        }
        if !completed.is_empty() {
            self.entries.retain(|e| !completed.contains(&e.id));
            log::debug!("effects {:?} removed", completed);
        }
    }

    pub fn get(&self, id: EffectId) -> Option<&Effect> {
        self.entries.iter().find(|e| e.id == id).map(|e| &e.effect)
    }

    pub fn contains(&self, id: EffectId) -> bool {
        self.get(id).is_some()
    }

    /// Number of live effects of `kind`
    pub fn count(&self, kind: EffectKind) -> usize {
        self.entries.iter().filter(|e| e.effect.kind() == kind).count()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
