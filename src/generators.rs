use log::{debug, info, trace};
use rand::Rng;
use rand::seq::SliceRandom;
use smallvec::SmallVec;

use crate::grid::{CarveError, Grid};

/// What a single `MazeWalker::advance` did.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum WalkStep {
    /// Moved into an unvisited neighbour, knocking down the wall between.
    Carved { from: usize, to: usize },
    /// Dead end, stepped back one cell along the visitation stack.
    Backtracked { to: usize },
    /// Unwound to the start cell and it has no unvisited neighbour left: the maze is complete.
    Terminated,
}

impl WalkStep {
    #[inline]
    pub fn progressed(&self) -> bool {
        *self != WalkStep::Terminated
    }
}

/// The recursive backtracker maze generation algorithm, taken one step at a time.
///
/// The walker wanders into a random unvisited neighbour carving a passage as it goes, and when
/// stuck retreats along the stack of cells it walked to until it finds a cell with an unvisited
/// neighbour again. It has a strong bias towards long winding corridors.
///
/// It only ever holds cell indices into the `Grid` it is advanced over.
#[derive(Debug, Default, Clone)]
pub struct MazeWalker {
    start: Option<usize>,
    current: Option<usize>,
    path: Vec<usize>,
    walking: bool,
}

impl MazeWalker {
    pub fn new() -> MazeWalker {
        MazeWalker::default()
    }

    #[inline]
    pub fn current(&self) -> Option<usize> {
        self.current
    }

    #[inline]
    pub fn start(&self) -> Option<usize> {
        self.start
    }

    /// The cells walked to since `set_start`, most recent last. The start cell itself is not on it.
    #[inline]
    pub fn path(&self) -> &[usize] {
        &self.path
    }

    #[inline]
    pub fn is_walking(&self) -> bool {
        self.walking
    }

    pub fn pause(&mut self) {
        self.walking = false;
    }

    pub fn unpause(&mut self) {
        self.walking = true;
    }

    pub fn toggle_walking(&mut self) {
        self.walking = !self.walking;
    }

    /// Bind the walker to its starting cell, marking it occupied and traversed.
    pub fn set_start(&mut self, grid: &mut Grid, start: usize) -> Result<(), CarveError> {
        if let Some(previous) = self.current.and_then(|index| grid.cell_mut(index)) {
            previous.occupied = false;
        }
        let cell = grid.cell_mut(start).ok_or(CarveError::InvalidCell)?;
        cell.occupied = true;
        cell.traversed = true;

        self.start = Some(start);
        self.current = Some(start);
        self.path.clear();
        debug!("walker starting at cell {}", start);
        Ok(())
    }

    /// Take one step of the walk.
    ///
    /// A walker that was never given a start cell has nothing to do and reports `Terminated`.
    pub fn advance<R: Rng>(&mut self, grid: &mut Grid, rng: &mut R) -> WalkStep {
        let current = match self.current {
            Some(index) => index,
            None => return WalkStep::Terminated,
        };

        let candidates: SmallVec<[usize; 4]> = grid.neighbours(current)
            .iter()
            .cloned()
            .filter(|&n| grid.cell(n).map_or(false, |cell| !cell.traversed))
            .collect();

        if let Some(&next) = candidates.choose(rng) {
            // Candidates come from the neighbour list, so the carve cannot fail.
            if self.walk_to(grid, next).is_ok() {
                return WalkStep::Carved { from: current, to: next };
            }
        }

        if let Some(back_to) = self.walk_back(grid) {
            WalkStep::Backtracked { to: back_to }
        } else {
            info!("maze walk complete after {} cells, {} passages",
                  grid.iter().filter(|cell| cell.traversed).count(),
                  grid.passages_count());
            WalkStep::Terminated
        }
    }

    /// Carve into an adjacent cell and make it the current one.
    pub fn walk_to(&mut self, grid: &mut Grid, next: usize) -> Result<(), CarveError> {
        let current = self.current.ok_or(CarveError::InvalidCell)?;
        grid.remove_walls(current, next)?;

        if let Some(cell) = grid.cell_mut(current) {
            cell.occupied = false;
        }
        if let Some(cell) = grid.cell_mut(next) {
            cell.occupied = true;
            cell.traversed = true;
        }
        self.current = Some(next);
        self.path.push(next);
        trace!("carved {} -> {}", current, next);
        Ok(())
    }

    /// Retreat one cell. The current cell is the top of the stack (or the start cell when the
    /// stack is empty), so pop it and move to whatever is now on top.
    ///
    /// Returns None when already back at the start with nothing left to pop.
    pub fn walk_back(&mut self, grid: &mut Grid) -> Option<usize> {
        let _ = self.path.pop()?;
        let back_to = self.path.last().cloned().or(self.start)?;

        if let Some(cell) = self.current.and_then(|index| grid.cell_mut(index)) {
            cell.occupied = false;
        }
        if let Some(cell) = grid.cell_mut(back_to) {
            cell.occupied = true;
        }
        self.current = Some(back_to);
        trace!("backtracked to {}", back_to);
        Some(back_to)
    }
}

/// Run a `MazeWalker` from `start` until it terminates, carving a perfect maze over every cell
/// reachable from `start`. Returns the number of steps taken.
pub fn recursive_backtracker<R: Rng>(grid: &mut Grid,
                                     start: usize,
                                     rng: &mut R)
                                     -> Result<usize, CarveError> {
    let mut walker = MazeWalker::new();
    walker.set_start(grid, start)?;
    let mut steps = 0;
    while walker.advance(grid, rng).progressed() {
        steps += 1;
    }
    Ok(steps)
}
