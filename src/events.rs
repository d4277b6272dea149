//! Tick driven state for the two demos. A host loop (window, input polling, drawing) feeds
//! `Event`s in and calls `tick` once per frame; everything it needs to draw is readable here.

use log::info;
use rand::Rng;
use std::error::Error;
use std::fmt;

use crate::generators::{MazeWalker, WalkStep};
use crate::geometry::{Position, Rect};
use crate::grid::{CarveError, Grid, GridError};
use crate::pathing::SearchSpaceError;
use crate::player::{Keys, ObstacleError, Obstacles, Player, PlayerStep};
use crate::settings::Settings;

/// Discrete input from the host loop.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum Event {
    Quit,
    /// Pause or resume the maze walker.
    ToggleWalk,
    /// Pointer click: add or remove the obstacle block under the position.
    PlaceObstacle(Position),
    /// Switch the player between manual and autopilot control.
    ToggleManual,
}

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum Flow {
    Continue,
    Quit,
}

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum DemoError {
    Grid(GridError),
    Carve(CarveError),
    Search(SearchSpaceError),
    Obstacle(ObstacleError),
}

impl fmt::Display for DemoError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            DemoError::Grid(ref e) => write!(f, "invalid maze grid: {}", e),
            DemoError::Carve(ref e) => write!(f, "invalid maze walk: {}", e),
            DemoError::Search(ref e) => write!(f, "invalid player: {}", e),
            DemoError::Obstacle(ref e) => write!(f, "invalid obstacles: {}", e),
        }
    }
}

impl Error for DemoError {}

impl From<GridError> for DemoError {
    fn from(e: GridError) -> DemoError {
        DemoError::Grid(e)
    }
}

impl From<CarveError> for DemoError {
    fn from(e: CarveError) -> DemoError {
        DemoError::Carve(e)
    }
}

impl From<SearchSpaceError> for DemoError {
    fn from(e: SearchSpaceError) -> DemoError {
        DemoError::Search(e)
    }
}

impl From<ObstacleError> for DemoError {
    fn from(e: ObstacleError) -> DemoError {
        DemoError::Obstacle(e)
    }
}

/// The maze generation demo: a walker on a grid, paused until toggled.
///
/// When a walk completes the traversed flags are cleared and the walker pauses, so toggling
/// again replays a walk from where it finished over the already carved grid.
pub struct MazeDemo<R: Rng> {
    grid: Grid,
    walker: MazeWalker,
    rng: R,
    finished: bool,
}

impl<R: Rng> MazeDemo<R> {
    pub fn new(settings: &Settings, mut rng: R) -> Result<MazeDemo<R>, DemoError> {
        let (row_length, column_length, cell_size) = settings.maze_dimensions();
        let mut grid = Grid::new(row_length, column_length, cell_size)?;
        let start = grid.random_cell(&mut rng);
        let mut walker = MazeWalker::new();
        walker.set_start(&mut grid, start)?;

        Ok(MazeDemo {
            grid,
            walker,
            rng,
            finished: false,
        })
    }

    #[inline]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[inline]
    pub fn walker(&self) -> &MazeWalker {
        &self.walker
    }

    /// Has the most recent walk run to completion?
    #[inline]
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn handle(&mut self, event: Event) -> Result<Flow, DemoError> {
        match event {
            Event::Quit => return Ok(Flow::Quit),
            Event::ToggleWalk => {
                if self.finished && !self.walker.is_walking() {
                    if let Some(from) = self.walker.current() {
                        self.walker.set_start(&mut self.grid, from)?;
                    }
                    self.finished = false;
                }
                self.walker.toggle_walking();
            }
            Event::PlaceObstacle(_) | Event::ToggleManual => {}
        }
        Ok(Flow::Continue)
    }

    /// One step of the walker if it is walking.
    pub fn tick(&mut self) -> Option<WalkStep> {
        if !self.walker.is_walking() {
            return None;
        }
        let step = self.walker.advance(&mut self.grid, &mut self.rng);
        if step == WalkStep::Terminated {
            self.grid.reset_traversed();
            self.walker.pause();
            self.finished = true;
        }
        Some(step)
    }
}

/// The pathfinding demo: a player, a fixed target and click placed obstacles.
#[derive(Debug, Clone)]
pub struct PathfinderDemo {
    player: Player,
    obstacles: Obstacles,
}

impl PathfinderDemo {
    pub fn new(settings: &Settings) -> Result<PathfinderDemo, DemoError> {
        let mut player = Player::new(settings.player_start,
                                     settings.player_size,
                                     settings.player_speed,
                                     settings.bounds())?;
        player.set_target(Some(settings.default_target()));
        Ok(PathfinderDemo {
            player,
            obstacles: Obstacles::new(settings.block_size)?,
        })
    }

    #[inline]
    pub fn player(&self) -> &Player {
        &self.player
    }

    #[inline]
    pub fn obstacles(&self) -> &[Rect] {
        self.obstacles.as_slice()
    }

    pub fn set_target(&mut self, target: Option<Rect>) {
        self.player.set_target(target);
    }

    pub fn handle(&mut self, event: Event) -> Flow {
        match event {
            Event::Quit => return Flow::Quit,
            Event::PlaceObstacle(pos) => {
                let placed = self.obstacles.toggle_at(pos.x, pos.y);
                info!("obstacle {} at {}", if placed { "placed" } else { "removed" }, pos);
            }
            Event::ToggleManual => self.player.toggle_manual(),
            Event::ToggleWalk => {}
        }
        Flow::Continue
    }

    pub fn tick(&mut self, keys: Keys) -> PlayerStep {
        self.player.update(keys, self.obstacles.as_slice())
    }
}
