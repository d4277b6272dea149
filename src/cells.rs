use smallvec::SmallVec;
use std::fmt;

use crate::units::{CellSize, ColumnIndex, RowIndex};

/// Adjacent cell indices into the owning grid's flat cell storage.
pub type NeighbourSmallVec = SmallVec<[usize; 4]>;

#[derive(Eq, PartialEq, Copy, Clone, Debug, Hash)]
pub enum CompassPrimary {
    North,
    South,
    East,
    West,
}

impl CompassPrimary {
    /// All four directions in wall flag order.
    pub const ALL: [CompassPrimary; 4] = [CompassPrimary::North,
                                          CompassPrimary::South,
                                          CompassPrimary::East,
                                          CompassPrimary::West];

    pub fn opposite(self) -> CompassPrimary {
        match self {
            CompassPrimary::North => CompassPrimary::South,
            CompassPrimary::South => CompassPrimary::North,
            CompassPrimary::East => CompassPrimary::West,
            CompassPrimary::West => CompassPrimary::East,
        }
    }

    #[inline]
    fn wall_index(self) -> usize {
        match self {
            CompassPrimary::North => 0,
            CompassPrimary::South => 1,
            CompassPrimary::East => 2,
            CompassPrimary::West => 3,
        }
    }
}

/// The four wall flags of a cell, ordered North, South, East, West. A fresh cell is fully walled.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct Walls([bool; 4]);

impl Default for Walls {
    fn default() -> Walls {
        Walls([true; 4])
    }
}

impl Walls {
    #[inline]
    pub fn has(&self, dir: CompassPrimary) -> bool {
        self.0[dir.wall_index()]
    }

    #[inline]
    pub fn remove(&mut self, dir: CompassPrimary) {
        self.0[dir.wall_index()] = false;
    }

    #[inline]
    pub fn as_array(&self) -> [bool; 4] {
        self.0
    }

    pub fn count(&self) -> usize {
        self.0.iter().filter(|&&w| w).count()
    }
}

/// One square of the maze lattice.
///
/// Cells live in the `Grid`'s flat storage and refer to each other only by index, so carving a
/// passage between two cells never needs two live mutable borrows.
#[derive(Clone, Debug)]
pub struct Cell {
    column: ColumnIndex,
    row: RowIndex,
    size: CellSize,
    walls: Walls,
    neighbours: NeighbourSmallVec,
    pub occupied: bool,
    pub traversed: bool,
}

impl Cell {
    pub(crate) fn new(column: ColumnIndex, row: RowIndex, size: CellSize) -> Cell {
        Cell {
            column,
            row,
            size,
            walls: Walls::default(),
            neighbours: NeighbourSmallVec::new(),
            occupied: false,
            traversed: false,
        }
    }

    #[inline]
    pub fn column(&self) -> ColumnIndex {
        self.column
    }

    #[inline]
    pub fn row(&self) -> RowIndex {
        self.row
    }

    /// Pixel x of the top left corner.
    #[inline]
    pub fn x(&self) -> u32 {
        self.column.0 as u32 * self.size.0
    }

    /// Pixel y of the top left corner.
    #[inline]
    pub fn y(&self) -> u32 {
        self.row.0 as u32 * self.size.0
    }

    #[inline]
    pub fn size(&self) -> CellSize {
        self.size
    }

    #[inline]
    pub fn walls(&self) -> Walls {
        self.walls
    }

    #[inline]
    pub fn has_wall(&self, dir: CompassPrimary) -> bool {
        self.walls.has(dir)
    }

    pub(crate) fn remove_wall(&mut self, dir: CompassPrimary) {
        self.walls.remove(dir);
    }

    /// Indices of the orthogonally adjacent cells, fixed when the grid is built.
    #[inline]
    pub fn neighbours(&self) -> &[usize] {
        &self.neighbours
    }

    pub(crate) fn set_neighbours(&mut self, neighbours: NeighbourSmallVec) {
        self.neighbours = neighbours;
    }

    /// Direction of `other` as seen from this cell, if the two are orthogonally adjacent.
    pub fn direction_to(&self, other: &Cell) -> Option<CompassPrimary> {
        let (ColumnIndex(c1), RowIndex(r1)) = (self.column, self.row);
        let (ColumnIndex(c2), RowIndex(r2)) = (other.column, other.row);

        if r1 == r2 {
            if c1 + 1 == c2 {
                Some(CompassPrimary::East)
            } else if c2 + 1 == c1 {
                Some(CompassPrimary::West)
            } else {
                None
            }
        } else if c1 == c2 {
            if r1 + 1 == r2 {
                Some(CompassPrimary::South)
            } else if r2 + 1 == r1 {
                Some(CompassPrimary::North)
            } else {
                None
            }
        } else {
            None
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Cell({},{})", self.x(), self.y())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cell(c: usize, r: usize) -> Cell {
        Cell::new(ColumnIndex(c), RowIndex(r), CellSize(20))
    }

    #[test]
    fn fresh_cell_is_fully_walled() {
        let c = cell(0, 0);
        for dir in CompassPrimary::ALL.iter() {
            assert!(c.has_wall(*dir));
        }
        assert_eq!(c.walls().count(), 4);
        assert!(!c.occupied);
        assert!(!c.traversed);
    }

    #[test]
    fn pixel_position_scales_with_size() {
        let c = cell(3, 2);
        assert_eq!((c.x(), c.y()), (60, 40));
        assert_eq!(format!("{}", c), "Cell(60,40)");
    }

    #[test]
    fn direction_between_adjacent_cells() {
        let centre = cell(1, 1);
        assert_eq!(centre.direction_to(&cell(1, 0)), Some(CompassPrimary::North));
        assert_eq!(centre.direction_to(&cell(1, 2)), Some(CompassPrimary::South));
        assert_eq!(centre.direction_to(&cell(2, 1)), Some(CompassPrimary::East));
        assert_eq!(centre.direction_to(&cell(0, 1)), Some(CompassPrimary::West));
    }

    #[test]
    fn no_direction_between_distant_or_diagonal_cells() {
        let centre = cell(1, 1);
        assert_eq!(centre.direction_to(&cell(1, 1)), None);
        assert_eq!(centre.direction_to(&cell(3, 1)), None);
        assert_eq!(centre.direction_to(&cell(1, 3)), None);
        assert_eq!(centre.direction_to(&cell(2, 2)), None);
        assert_eq!(centre.direction_to(&cell(0, 0)), None);
    }

    #[test]
    fn opposite_directions() {
        for dir in CompassPrimary::ALL.iter() {
            assert_eq!(dir.opposite().opposite(), *dir);
            assert_ne!(dir.opposite(), *dir);
        }
    }

    #[test]
    fn removing_a_wall_touches_one_flag() {
        let mut w = Walls::default();
        w.remove(CompassPrimary::East);
        assert_eq!(w.as_array(), [true, true, false, true]);
        w.remove(CompassPrimary::East);
        assert_eq!(w.count(), 3);
    }
}
