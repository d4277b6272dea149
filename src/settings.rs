use crate::geometry::{Bounds, Position, Rect};
use crate::units::{CellSize, ColumnLength, RowLength};

/// Sizes for both demos, all in pixels.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Settings {
    pub width: i32,
    pub height: i32,
    /// Maze cell side length.
    pub cell_size: u32,
    /// Obstacle lattice spacing and obstacle side length.
    pub block_size: i32,
    pub player_size: i32,
    /// Manual movement per tick and autopilot search step.
    pub player_speed: i32,
    pub target_size: i32,
    /// Top left of the player when the pathfinding demo starts.
    pub player_start: Position,
}

impl Default for Settings {
    fn default() -> Settings {
        Settings {
            width: 800,
            height: 600,
            cell_size: 20,
            block_size: 50,
            player_size: 20,
            player_speed: 3,
            target_size: 20,
            player_start: Position::new(0, 0),
        }
    }
}

impl Settings {
    #[inline]
    pub fn bounds(&self) -> Bounds {
        Bounds::new(self.width, self.height)
    }

    /// Maze dimensions in cells: as many whole cells as fit on screen.
    pub fn maze_dimensions(&self) -> (RowLength, ColumnLength, CellSize) {
        // A cell size past `i32::MAX` fits no screen and gives a zero sized maze.
        let size = i64::from(self.cell_size.max(1));
        (RowLength((i64::from(self.width.max(0)) / size) as usize),
         ColumnLength((i64::from(self.height.max(0)) / size) as usize),
         CellSize(self.cell_size))
    }

    /// The default target square sits in the bottom right corner.
    pub fn default_target(&self) -> Rect {
        Rect::new(self.width - self.target_size,
                  self.height - self.target_size,
                  self.target_size,
                  self.target_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maze_fills_the_screen_with_whole_cells() {
        let s = Settings { width: 90, height: 45, cell_size: 20, ..Settings::default() };
        assert_eq!(s.maze_dimensions(), (RowLength(4), ColumnLength(2), CellSize(20)));
    }

    #[test]
    fn cells_wider_than_any_screen_give_an_empty_maze() {
        let s = Settings { cell_size: u32::MAX, ..Settings::default() };
        assert_eq!(s.maze_dimensions(), (RowLength(0), ColumnLength(0), CellSize(u32::MAX)));
        let s = Settings { width: -40, cell_size: 20, ..Settings::default() };
        assert_eq!(s.maze_dimensions().0, RowLength(0));
    }

    #[test]
    fn default_target_is_bottom_right() {
        let s = Settings::default();
        assert_eq!(s.default_target(), Rect::new(780, 580, 20, 20));
    }
}
