// Breadth first search over positions reachable by fixed size steps.
//
// Nothing here materialises the movement graph. A search starts with one point, expands each
// dequeued point's eight candidate steps on demand and remembers which positions have been seen.
// Every step costs the same, so the first point to reach the target ends a fewest-steps path.
// The points found are held in an arena for the duration of one search, each naming its parent
// by arena index, and the arena is dropped with the search.
//
// Cost grows with the reachable area divided by step squared. That is fine for a screen sized
// demo but searching a large area with a small step will be slow.

use log::{debug, trace};
use std::collections::VecDeque;
use std::error::Error;
use std::fmt;

use crate::geometry::{self, Bounds, Position, Rect};
use crate::utils;

/// Unit step directions in the order candidates are generated, which is also the tie break
/// between equally short paths. `y` grows downwards.
pub const STEPS: [(i32, i32); 8] = [
    (0, -1), (0, 1),
    (-1, 0), (1, 0),
    (-1, -1), (1, 1),
    (-1, 1), (1, -1),
];

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum SearchSpaceError {
    NonPositiveFootprint,
    NonPositiveStep,
}

impl fmt::Display for SearchSpaceError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            SearchSpaceError::NonPositiveFootprint => write!(f, "footprint size must be positive"),
            SearchSpaceError::NonPositiveStep => write!(f, "step size must be positive"),
        }
    }
}

impl Error for SearchSpaceError {}

/// One sampled position in a search, linked back towards the search root.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct PathPoint {
    pub position: Position,
    /// Arena index of the point this one was reached from. Only the root has none.
    pub parent: Option<usize>,
}

/// Where a mover of a given square footprint may go, and how far one step takes it.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct SearchSpace {
    bounds: Bounds,
    footprint: i32,
    step: i32,
}

impl SearchSpace {
    pub fn new(bounds: Bounds, footprint: i32, step: i32) -> Result<SearchSpace, SearchSpaceError> {
        if footprint <= 0 {
            return Err(SearchSpaceError::NonPositiveFootprint);
        }
        if step <= 0 {
            return Err(SearchSpaceError::NonPositiveStep);
        }
        Ok(SearchSpace { bounds, footprint, step })
    }

    #[inline]
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    #[inline]
    pub fn footprint(&self) -> i32 {
        self.footprint
    }

    #[inline]
    pub fn step(&self) -> i32 {
        self.step
    }

    /// The rectangle the mover covers when at `pos`.
    #[inline]
    pub fn footprint_at(&self, pos: Position) -> Rect {
        Rect::square(pos, self.footprint)
    }

    #[inline]
    pub fn is_valid(&self, pos: Position, obstacles: &[Rect]) -> bool {
        geometry::is_valid_position(pos, self.footprint, self.bounds, obstacles)
    }

    /// The positions one step away from `from` in `STEPS` order, unfiltered apart from steps
    /// that would leave the `i32` coordinate range.
    pub fn steps_from(&self, from: Position) -> impl Iterator<Item = Position> {
        let step = self.step;
        STEPS.iter().filter_map(move |&(dx, dy)| from.checked_offset(dx * step, dy * step))
    }

    /// The positions one step away from `from` that pass the validity gate, in `STEPS` order.
    pub fn candidates<'a>(&'a self,
                          from: Position,
                          obstacles: &'a [Rect])
                          -> impl Iterator<Item = Position> + 'a {
        self.steps_from(from).filter(move |&pos| self.is_valid(pos, obstacles))
    }
}

/// Find a fewest-steps route from `start` to any position whose footprint overlaps `target`.
///
/// The returned waypoints exclude `start` and end with the first position touching the target.
/// An empty path means `start` already touches it. None means the target cannot be reached.
pub fn shortest_path(space: &SearchSpace,
                     start: Position,
                     target: &Rect,
                     obstacles: &[Rect])
                     -> Option<Vec<Position>> {

    let mut points = vec![PathPoint { position: start, parent: None }];
    let mut visited = utils::fnv_hashset(64);
    visited.insert(start);
    let mut frontier = VecDeque::new();
    frontier.push_back(0);

    while let Some(current_index) = frontier.pop_front() {
        let current = points[current_index];

        if space.footprint_at(current.position).intersects(target) {
            let path = reconstruct(&points, current_index);
            debug!("path from {} to {:?} found: {} waypoints, {} points searched",
                   start, target, path.len(), points.len());
            return Some(path);
        }

        for next in space.candidates(current.position, obstacles) {
            if visited.insert(next) {
                points.push(PathPoint { position: next, parent: Some(current_index) });
                frontier.push_back(points.len() - 1);
            }
        }
    }

    debug!("no path from {} to {:?}, exhausted {} points", start, target, points.len());
    None
}

fn reconstruct(points: &[PathPoint], end_index: usize) -> Vec<Position> {
    let mut path = vec![];
    let mut index = end_index;
    while let Some(parent) = points[index].parent {
        path.push(points[index].position);
        index = parent;
    }
    path.reverse();
    trace!("reconstructed path {:?}", path);
    path
}

#[cfg(test)]
mod tests {
    use quickcheck::{quickcheck, TestResult};
    use std::cmp;

    use super::*;

    fn space(width: i32, height: i32, footprint: i32, step: i32) -> SearchSpace {
        SearchSpace::new(Bounds::new(width, height), footprint, step).expect("valid search space")
    }

    fn pos(x: i32, y: i32) -> Position {
        Position::new(x, y)
    }

    #[test]
    fn search_space_rejects_non_positive_sizes() {
        let b = Bounds::new(100, 100);
        assert_eq!(SearchSpace::new(b, 0, 3), Err(SearchSpaceError::NonPositiveFootprint));
        assert_eq!(SearchSpace::new(b, 20, 0), Err(SearchSpaceError::NonPositiveStep));
        assert_eq!(SearchSpace::new(b, 20, -3), Err(SearchSpaceError::NonPositiveStep));
    }

    #[test]
    fn steps_follow_the_fixed_direction_order() {
        let s = space(200, 200, 20, 10);
        let steps = s.steps_from(pos(50, 50)).collect::<Vec<_>>();
        assert_eq!(steps, vec![pos(50, 40), pos(50, 60), pos(40, 50), pos(60, 50),
                               pos(40, 40), pos(60, 60), pos(40, 60), pos(60, 40)]);
    }

    #[test]
    fn steps_past_the_coordinate_range_are_skipped() {
        let s = space(i32::MAX, i32::MAX, 1, 1 << 30);
        let steps = s.steps_from(pos(i32::MAX - 1, 0)).collect::<Vec<_>>();
        assert_eq!(steps, vec![pos(i32::MAX - 1, -(1 << 30)), pos(i32::MAX - 1, 1 << 30),
                               pos(i32::MAX - 1 - (1 << 30), 0),
                               pos(i32::MAX - 1 - (1 << 30), -(1 << 30)),
                               pos(i32::MAX - 1 - (1 << 30), 1 << 30)]);
    }

    #[test]
    fn search_over_a_huge_area_with_a_huge_step() {
        let s = space(i32::MAX, i32::MAX, 1, 1 << 30);
        let target = Rect::new(i32::MAX - 1, i32::MAX - 1, 1, 1);
        assert_eq!(shortest_path(&s, pos(0, 0), &target, &[]), None);

        let reachable = Rect::new(1 << 30, 1 << 30, 1, 1);
        assert_eq!(shortest_path(&s, pos(0, 0), &reachable, &[]), Some(vec![pos(1 << 30, 1 << 30)]));
    }

    #[test]
    fn candidates_drop_out_of_bounds_and_blocked_steps() {
        let s = space(200, 200, 20, 20);
        let obstacles = [Rect::new(20, 0, 20, 20)];
        let candidates = s.candidates(pos(0, 0), &obstacles).collect::<Vec<_>>();
        assert_eq!(candidates, vec![pos(0, 20), pos(20, 20)]);
    }

    #[test]
    fn diagonal_path_to_target() {
        let s = space(200, 200, 20, 20);
        let path = shortest_path(&s, pos(0, 0), &Rect::new(40, 40, 20, 20), &[]);
        assert_eq!(path, Some(vec![pos(20, 20), pos(40, 40)]));
    }

    #[test]
    fn already_touching_the_target_is_an_empty_path() {
        let s = space(200, 200, 20, 20);
        let path = shortest_path(&s, pos(30, 30), &Rect::new(40, 40, 20, 20), &[]);
        assert_eq!(path, Some(vec![]));
    }

    #[test]
    fn equal_length_ties_prefer_earlier_directions() {
        // (0,0) to the cell directly below: straight down wins over any diagonal detour.
        let s = space(200, 200, 20, 20);
        let path = shortest_path(&s, pos(0, 0), &Rect::new(0, 40, 20, 20), &[]);
        assert_eq!(path, Some(vec![pos(0, 20), pos(0, 40)]));
    }

    #[test]
    fn path_goes_around_a_wall() {
        let s = space(100, 100, 20, 20);
        // A wall down the middle column with a gap at the bottom row only.
        let wall = [Rect::new(40, 0, 20, 80)];
        let target = Rect::new(80, 0, 20, 20);
        let path = shortest_path(&s, pos(0, 0), &target, &wall).expect("a route exists");

        assert_eq!(path.len(), 8);
        assert!(path.contains(&pos(40, 80)));
        assert_eq!(*path.last().unwrap(), pos(80, 0));
        for waypoint in &path {
            assert!(s.is_valid(*waypoint, &wall));
        }
    }

    #[test]
    fn enclosed_target_has_no_path() {
        let s = space(200, 200, 20, 20);
        let target = Rect::new(100, 100, 20, 20);
        let enclosure = [Rect::new(80, 80, 60, 10),
                         Rect::new(80, 130, 60, 10),
                         Rect::new(80, 80, 10, 60),
                         Rect::new(130, 80, 10, 60)];
        assert_eq!(shortest_path(&s, pos(0, 0), &target, &enclosure), None);
    }

    #[test]
    fn target_outside_reachable_lattice_has_no_path() {
        // With step 20 from (0,0) only multiples of 20 are reachable, and the footprint of 5
        // never reaches back into the target.
        let s = space(100, 100, 5, 20);
        assert_eq!(shortest_path(&s, pos(0, 0), &Rect::new(6, 6, 2, 2), &[]), None);
    }

    #[test]
    fn quickcheck_clear_grid_path_length_is_chebyshev_distance() {
        fn p(sx: u8, sy: u8, tx: u8, ty: u8) -> bool {
            let (sx, sy, tx, ty) = (sx as i32 % 10, sy as i32 % 10, tx as i32 % 10, ty as i32 % 10);
            let s = space(200, 200, 20, 20);
            let target = Rect::new(tx * 20, ty * 20, 20, 20);
            let path = shortest_path(&s, pos(sx * 20, sy * 20), &target, &[])
                .expect("clear grid is fully connected");
            let chebyshev = cmp::max((tx - sx).abs(), (ty - sy).abs()) as usize;
            path.len() == chebyshev &&
            path.last().map_or(true, |&last| last == target.position()) &&
            path.iter().all(|&w| s.bounds().fits(w, 20))
        }
        quickcheck(p as fn(u8, u8, u8, u8) -> bool)
    }

    #[test]
    fn quickcheck_paths_avoid_obstacles() {
        fn p(blocks: Vec<(u8, u8)>, seed_target: (u8, u8)) -> TestResult {
            let s = space(200, 200, 20, 10);
            let obstacles = blocks.iter()
                .take(12)
                .map(|&(x, y)| Rect::new((x as i32 % 8) * 25, (y as i32 % 8) * 25, 25, 25))
                .filter(|r| !r.intersects(&Rect::new(0, 0, 20, 20)))
                .collect::<Vec<_>>();
            let target = Rect::new(seed_target.0 as i32 % 180, seed_target.1 as i32 % 180, 20, 20);
            match shortest_path(&s, pos(0, 0), &target, &obstacles) {
                None => TestResult::discard(),
                Some(path) => TestResult::from_bool(path.iter().all(|&w| s.is_valid(w, &obstacles))),
            }
        }
        quickcheck(p as fn(Vec<(u8, u8)>, (u8, u8)) -> TestResult)
    }
}
