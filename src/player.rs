use log::{debug, trace};
use std::collections::VecDeque;
use std::error::Error;
use std::fmt;

use crate::geometry::{Bounds, Position, Rect};
use crate::pathing::{self, SearchSpace, SearchSpaceError};

/// Movement key states sampled for one tick.
#[derive(Eq, PartialEq, Copy, Clone, Debug, Default)]
pub struct Keys {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl Keys {
    #[inline]
    pub fn any(&self) -> bool {
        self.up || self.down || self.left || self.right
    }
}

/// What a `Player::update` tick did.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum PlayerStep {
    Idle,
    /// Manual keys moved the player.
    Moved(Position),
    /// Manual keys were pressed but the move failed the validity gate.
    Blocked,
    /// Autopilot jumped to the next waypoint of the current path.
    Followed(Position),
    /// Autopilot computed a fresh path of this many waypoints, taking effect next tick.
    Planned(usize),
    /// Autopilot found no route to the target; the player stays put.
    NoPath,
}

/// A square mover that is either steered by keys or sent along breadth first search paths
/// towards a target.
#[derive(Debug, Clone)]
pub struct Player {
    position: Position,
    space: SearchSpace,
    manual: bool,
    target: Option<Rect>,
    path: VecDeque<Position>,
}

impl Player {
    /// `speed` is both the manual movement per tick and the autopilot search step.
    pub fn new(position: Position,
               size: i32,
               speed: i32,
               bounds: Bounds)
               -> Result<Player, SearchSpaceError> {
        Ok(Player {
            position,
            space: SearchSpace::new(bounds, size, speed)?,
            manual: true,
            target: None,
            path: VecDeque::new(),
        })
    }

    #[inline]
    pub fn position(&self) -> Position {
        self.position
    }

    #[inline]
    pub fn rect(&self) -> Rect {
        self.space.footprint_at(self.position)
    }

    #[inline]
    pub fn is_manual(&self) -> bool {
        self.manual
    }

    pub fn toggle_manual(&mut self) {
        self.manual = !self.manual;
        debug!("player control is now {}", if self.manual { "manual" } else { "autopilot" });
    }

    #[inline]
    pub fn target(&self) -> Option<Rect> {
        self.target
    }

    pub fn set_target(&mut self, target: Option<Rect>) {
        self.target = target;
        self.path.clear();
    }

    /// Waypoints still to be followed, next first.
    pub fn pending_path(&self) -> impl Iterator<Item = &Position> {
        self.path.iter()
    }

    pub fn distance_to_target(&self) -> Option<f64> {
        self.target.map(|t| self.position.distance_to(t.position()))
    }

    pub fn reached_target(&self) -> bool {
        self.target.map_or(false, |t| self.rect().intersects(&t))
    }

    /// Where the keys would take the player, before validation. Down, left, right, up are
    /// applied in that order, so up wins over down and right wins over left.
    pub fn proposed_move(&self, keys: Keys) -> Position {
        let speed = self.space.step();
        let (mut new_x, mut new_y) = (self.position.x, self.position.y);
        if keys.down {
            new_y = self.position.y.saturating_add(speed);
        }
        if keys.left {
            new_x = self.position.x.saturating_sub(speed);
        }
        if keys.right {
            new_x = self.position.x.saturating_add(speed);
        }
        if keys.up {
            new_y = self.position.y.saturating_sub(speed);
        }
        Position::new(new_x, new_y)
    }

    /// Move by keys if the destination passes the validity gate; an invalid move is dropped.
    pub fn move_by_keys(&mut self, keys: Keys, obstacles: &[Rect]) -> bool {
        let proposed = self.proposed_move(keys);
        if self.space.is_valid(proposed, obstacles) {
            self.position = proposed;
            true
        } else {
            trace!("rejected move to {}", proposed);
            false
        }
    }

    /// Advance one tick.
    ///
    /// Under manual control pressed keys drop any pending path and move the player. Under
    /// autopilot with a target, the next waypoint is jumped to, or a new search is run when the
    /// path is used up or its next waypoint no longer passes the validity gate.
    pub fn update(&mut self, keys: Keys, obstacles: &[Rect]) -> PlayerStep {
        if self.manual {
            if !keys.any() {
                return PlayerStep::Idle;
            }
            self.path.clear();
            return if self.move_by_keys(keys, obstacles) {
                PlayerStep::Moved(self.position)
            } else {
                PlayerStep::Blocked
            };
        }

        let target = match self.target {
            Some(target) => target,
            None => return PlayerStep::Idle,
        };

        if let Some(next) = self.path.pop_front() {
            if self.space.is_valid(next, obstacles) {
                self.position = next;
                return PlayerStep::Followed(next);
            }
            debug!("waypoint {} is now blocked, planning again", next);
            self.path.clear();
        }

        match pathing::shortest_path(&self.space, self.position, &target, obstacles) {
            Some(path) => {
                let waypoints = path.len();
                self.path = path.into();
                PlayerStep::Planned(waypoints)
            }
            None => PlayerStep::NoPath,
        }
    }
}

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum ObstacleError {
    NonPositiveBlockSize,
}

impl fmt::Display for ObstacleError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            ObstacleError::NonPositiveBlockSize => write!(f, "obstacle block size must be positive"),
        }
    }
}

impl Error for ObstacleError {}

/// Square blocks placed by pointer clicks, snapped to a `block_size` lattice.
#[derive(Debug, Clone)]
pub struct Obstacles {
    block_size: i32,
    blocks: Vec<Rect>,
}

impl Obstacles {
    pub fn new(block_size: i32) -> Result<Obstacles, ObstacleError> {
        if block_size <= 0 {
            return Err(ObstacleError::NonPositiveBlockSize);
        }
        Ok(Obstacles { block_size, blocks: vec![] })
    }

    #[inline]
    pub fn block_size(&self) -> i32 {
        self.block_size
    }

    #[inline]
    pub fn as_slice(&self) -> &[Rect] {
        &self.blocks
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// The block that a click at `(x, y)` refers to.
    pub fn snapped_block(&self, x: i32, y: i32) -> Rect {
        let size = self.block_size;
        Rect::new(x - x.rem_euclid(size), y - y.rem_euclid(size), size, size)
    }

    /// A click removes every block overlapping the clicked lattice square, or places a new one
    /// if there were none. Returns true if a block was placed.
    pub fn toggle_at(&mut self, x: i32, y: i32) -> bool {
        let candidate = self.snapped_block(x, y);
        let before = self.blocks.len();
        self.blocks.retain(|block| !block.intersects(&candidate));

        if self.blocks.len() == before {
            self.blocks.push(candidate);
            debug!("placed obstacle {:?}", candidate);
            true
        } else {
            debug!("removed {} obstacle(s) at {:?}", before - self.blocks.len(), candidate);
            false
        }
    }
}
