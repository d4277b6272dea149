use petgraph::graph::UnGraph;
use rand::Rng;
use std::convert::TryFrom;
use std::error::Error;
use std::fmt;
use std::slice;

use crate::cells::{Cell, CompassPrimary, NeighbourSmallVec};
use crate::units::{CellSize, ColumnIndex, ColumnLength, EdgesCount, RowIndex, RowLength};
use crate::utils;

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum GridError {
    ZeroDimension,
    ZeroCellSize,
    /// The grid's pixel width or height, or its cell count, does not fit the pixel types.
    TooLarge,
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            GridError::ZeroDimension => write!(f, "grid width and height must both be at least one cell"),
            GridError::ZeroCellSize => write!(f, "grid cell size must be at least one pixel"),
            GridError::TooLarge => write!(f, "grid is too large to address in pixels"),
        }
    }
}

impl Error for GridError {}

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum CarveError {
    InvalidCell,
    SelfCarve,
    NotAdjacent,
}

impl fmt::Display for CarveError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            CarveError::InvalidCell => write!(f, "cell index is outside the grid"),
            CarveError::SelfCarve => write!(f, "cannot carve a passage from a cell to itself"),
            CarveError::NotAdjacent => write!(f, "cells are not orthogonally adjacent"),
        }
    }
}

impl Error for CarveError {}

/// A rectangular lattice of square cells stored row major in one flat `Vec`.
///
/// Every cell's neighbour list is computed once here and never changes; the maze walker treats
/// it as the only graph structure there is. All cross-cell mutation goes through cell indices.
pub struct Grid {
    cells: Vec<Cell>,
    row_length: RowLength,
    column_length: ColumnLength,
    cell_size: CellSize,
}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Grid :: rows: {:?}, columns: {:?}, cell size: {:?}, passages: {}",
               self.row_length, self.column_length, self.cell_size, self.passages_count())
    }
}

impl Grid {
    pub fn new(row_length: RowLength,
               column_length: ColumnLength,
               cell_size: CellSize)
               -> Result<Grid, GridError> {

        let (RowLength(width), ColumnLength(height)) = (row_length, column_length);
        if width == 0 || height == 0 {
            return Err(GridError::ZeroDimension);
        }
        if cell_size.0 == 0 {
            return Err(GridError::ZeroCellSize);
        }

        // Every cell's pixel corner is a `u32`, so the whole extent must be one too.
        let pixel_extent = |cells: usize| u32::try_from(cells).ok().and_then(|n| n.checked_mul(cell_size.0));
        if pixel_extent(width).is_none() || pixel_extent(height).is_none() {
            return Err(GridError::TooLarge);
        }
        let cells_count = width.checked_mul(height).ok_or(GridError::TooLarge)?;
        let mut cells = Vec::with_capacity(cells_count);
        for row in 0..height {
            for column in 0..width {
                cells.push(Cell::new(ColumnIndex(column), RowIndex(row), cell_size));
            }
        }

        // Adjacency is found by probing pixel positions one cell size away, so anything not in
        // the lookup (off the grid edges) is simply never a neighbour.
        let mut by_position = utils::fnv_hashmap(cells_count);
        for (index, cell) in cells.iter().enumerate() {
            by_position.insert((i64::from(cell.x()), i64::from(cell.y())), index);
        }
        let size = i64::from(cell_size.0);
        for cell in cells.iter_mut() {
            let (x, y) = (i64::from(cell.x()), i64::from(cell.y()));
            let neighbours: NeighbourSmallVec = [(x - size, y), (x + size, y), (x, y - size), (x, y + size)]
                .iter()
                .filter_map(|pos| by_position.get(pos).cloned())
                .collect();
            cell.set_neighbours(neighbours);
        }

        Ok(Grid {
            cells,
            row_length,
            column_length,
            cell_size,
        })
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn row_length(&self) -> RowLength {
        self.row_length
    }

    #[inline]
    pub fn column_length(&self) -> ColumnLength {
        self.column_length
    }

    #[inline]
    pub fn cell_size(&self) -> CellSize {
        self.cell_size
    }

    #[inline]
    pub fn cell(&self, index: usize) -> Option<&Cell> {
        self.cells.get(index)
    }

    #[inline]
    pub(crate) fn cell_mut(&mut self, index: usize) -> Option<&mut Cell> {
        self.cells.get_mut(index)
    }

    /// Row major index of the cell at the given column and row, None if outside the grid.
    pub fn index_of(&self, column: ColumnIndex, row: RowIndex) -> Option<usize> {
        let (ColumnIndex(c), RowIndex(r)) = (column, row);
        if c < self.row_length.0 && r < self.column_length.0 {
            Some(r * self.row_length.0 + c)
        } else {
            None
        }
    }

    pub fn random_cell<R: Rng>(&self, rng: &mut R) -> usize {
        rng.gen_range(0..self.cells.len())
    }

    /// Neighbour indices of a cell, empty for an invalid index.
    pub fn neighbours(&self, index: usize) -> &[usize] {
        self.cells.get(index).map_or(&[][..], |cell| cell.neighbours())
    }

    /// Knock down the wall between two adjacent cells, clearing the matching flag on both.
    ///
    /// Returns the direction of `b` as seen from `a`.
    pub fn remove_walls(&mut self, a: usize, b: usize) -> Result<CompassPrimary, CarveError> {
        if a == b {
            return Err(CarveError::SelfCarve);
        }
        let dir = {
            let (cell_a, cell_b) = match (self.cells.get(a), self.cells.get(b)) {
                (Some(cell_a), Some(cell_b)) => (cell_a, cell_b),
                _ => return Err(CarveError::InvalidCell),
            };
            cell_a.direction_to(cell_b).ok_or(CarveError::NotAdjacent)?
        };

        self.cells[a].remove_wall(dir);
        self.cells[b].remove_wall(dir.opposite());
        Ok(dir)
    }

    /// Is there a carved passage between two cells? Only ever true for adjacent cells.
    pub fn is_passage(&self, a: usize, b: usize) -> bool {
        match (self.cells.get(a), self.cells.get(b)) {
            (Some(cell_a), Some(cell_b)) => {
                cell_a.direction_to(cell_b).map_or(false, |dir| {
                    !cell_a.has_wall(dir) && !cell_b.has_wall(dir.opposite())
                })
            }
            _ => false,
        }
    }

    pub fn is_neighbour_open(&self, index: usize, dir: CompassPrimary) -> bool {
        self.neighbour_at_direction(index, dir)
            .map_or(false, |neighbour| self.is_passage(index, neighbour))
    }

    pub fn neighbour_at_direction(&self, index: usize, dir: CompassPrimary) -> Option<usize> {
        let cell = self.cells.get(index)?;
        let (ColumnIndex(c), RowIndex(r)) = (cell.column(), cell.row());
        let (column, row) = match dir {
            CompassPrimary::North => (Some(c), r.checked_sub(1)),
            CompassPrimary::South => (Some(c), Some(r + 1)),
            CompassPrimary::East => (Some(c + 1), Some(r)),
            CompassPrimary::West => (c.checked_sub(1), Some(r)),
        };
        match (column, row) {
            (Some(column), Some(row)) => self.index_of(ColumnIndex(column), RowIndex(row)),
            _ => None,
        }
    }

    /// Clear every `traversed` flag so another walk can replay over the grid.
    pub fn reset_traversed(&mut self) {
        for cell in self.cells.iter_mut() {
            cell.traversed = false;
        }
    }

    pub fn all_traversed(&self) -> bool {
        self.cells.iter().all(|cell| cell.traversed)
    }

    #[inline]
    pub fn iter(&self) -> slice::Iter<Cell> {
        self.cells.iter()
    }

    /// Each carved passage once, as `(from, to)` with `to` east or south of `from`.
    pub fn passages(&self) -> Vec<(usize, usize)> {
        let mut links = Vec::with_capacity(self.cells.len());
        for index in 0..self.cells.len() {
            for &dir in &[CompassPrimary::East, CompassPrimary::South] {
                if let Some(neighbour) = self.neighbour_at_direction(index, dir) {
                    if self.is_passage(index, neighbour) {
                        links.push((index, neighbour));
                    }
                }
            }
        }
        links
    }

    pub fn passages_count(&self) -> usize {
        self.passages().len()
    }

    /// Upper bound on the possible passages: every interior wall knocked down.
    pub fn max_passages(&self) -> EdgesCount {
        let (RowLength(w), ColumnLength(h)) = (self.row_length, self.column_length);
        EdgesCount((w - 1) * h + w * (h - 1))
    }

    /// The carved passages as an undirected graph, one node per cell in row major order.
    pub fn passage_graph(&self) -> UnGraph<(), ()> {
        let passages = self.passages();
        let mut graph = UnGraph::with_capacity(self.cells.len(), passages.len());
        for _ in 0..self.cells.len() {
            let _ = graph.add_node(());
        }
        graph.extend_with_edges(passages.iter().map(|&(a, b)| (a as u32, b as u32)));
        graph
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let width = self.row_length.0;

        let mut output = String::from("+");
        for _ in 0..width {
            output.push_str("---+");
        }
        output.push('\n');

        for (row_index, row) in self.cells.chunks(width).enumerate() {
            let mut middle = String::from("|");
            let mut bottom = String::from("+");
            for (column_index, cell) in row.iter().enumerate() {
                let index = row_index * width + column_index;
                let body = if cell.occupied {
                    " @ "
                } else if cell.traversed {
                    " . "
                } else {
                    "   "
                };
                middle.push_str(body);
                middle.push_str(if self.is_neighbour_open(index, CompassPrimary::East) { " " } else { "|" });
                bottom.push_str(if self.is_neighbour_open(index, CompassPrimary::South) { "   " } else { "---" });
                bottom.push('+');
            }
            output.push_str(&middle);
            output.push('\n');
            output.push_str(&bottom);
            output.push('\n');
        }

        write!(f, "{}", output)
    }
}
