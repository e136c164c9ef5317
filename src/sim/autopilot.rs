//! Idle/demo mode: pick moves for the player
//!
//! Breadth-first search over the board using the session's own occupancy gate,
//! skipping beams that would kill the player in the current costumes. When the
//! finish is out of reach the autopilot heads for the nearest pickup it is not
//! already wearing. It holds still while an enemy is about to cross the next
//! cell.

use std::collections::{HashMap, VecDeque};

use super::grid::{Cell, Direction};
use super::session::GameSession;

/// Enemies closer than this (in cells) to the next step make the autopilot wait
const DANGER_RADIUS: f32 = 1.2;

/// Shortest safe route from the player to the nearest cell accepted by `is_goal`
pub fn route_to(session: &GameSession, is_goal: impl Fn(Cell) -> bool) -> Option<Vec<Direction>> {
    let start = session.player().cell;
    let mut came_from: HashMap<Cell, (Cell, Direction)> = HashMap::new();
    let mut frontier = VecDeque::from([start]);

    while let Some(cell) = frontier.pop_front() {
        if cell != start && is_goal(cell) {
            let mut route = Vec::new();
            let mut cursor = cell;
            while let Some(&(prev, dir)) = came_from.get(&cursor) {
                route.push(dir);
                cursor = prev;
            }
            route.reverse();
            return Some(route);
        }
        for dir in Direction::ALL {
            let next = cell.step(dir);
            if next == start
                || came_from.contains_key(&next)
                || !session.player_can_occupy_location(next)
                || session.is_lethal(next)
            {
                continue;
            }
            came_from.insert(next, (cell, dir));
            frontier.push_back(next);
        }
    }
    None
}

/// Route to the finish, or failing that to a pickup worth wearing
pub fn plan(session: &GameSession) -> Option<Vec<Direction>> {
    let finish = session.level_map().player_finish;
    route_to(session, |cell| cell == finish).or_else(|| {
        let worn = &session.player().costumes;
        let wanted: Vec<Cell> = session
            .costumes()
            .iter()
            .filter(|pickup| worn.get(pickup.costume.kind()) != Some(pickup.costume))
            .map(|pickup| pickup.origin)
            .collect();
        route_to(session, |cell| wanted.contains(&cell))
    })
}

/// Is an enemy about to pass through `cell`?
pub fn is_threatened(session: &GameSession, cell: Cell) -> bool {
    let center = cell.as_vec2();
    session
        .enemies()
        .iter()
        .any(|enemy| enemy.location.distance(center) < DANGER_RADIUS)
}

/// Next move for the autopilot, or `None` to wait this turn
pub fn next_move(session: &GameSession) -> Option<Direction> {
    if session.is_complete() {
        return None;
    }
    let step = plan(session)?.into_iter().next()?;
    if is_threatened(session, session.player().cell.step(step)) {
        return None;
    }
    Some(step)
}
