//! Pixel space primitives shared by the pathfinder and the player movement checks.

use std::fmt;

/// Top left corner of an entity in pixels. Integer so positions can key the search's visited set.
#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug, Ord, PartialOrd, Default)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Position {
        Position { x, y }
    }

    /// The position moved by `(dx, dy)`, None if either coordinate leaves the `i32` range.
    #[inline]
    pub fn checked_offset(self, dx: i32, dy: i32) -> Option<Position> {
        Some(Position::new(self.x.checked_add(dx)?, self.y.checked_add(dy)?))
    }

    pub fn distance_to(self, other: Position) -> f64 {
        let dx = f64::from(other.x) - f64::from(self.x);
        let dy = f64::from(other.y) - f64::from(self.y);
        (dx * dx + dy * dy).sqrt()
    }
}

impl From<(i32, i32)> for Position {
    fn from(x_y_pair: (i32, i32)) -> Position {
        Position::new(x_y_pair.0, x_y_pair.1)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Axis aligned rectangle covering the pixels `x..x+width` by `y..y+height`.
#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Rect {
        Rect { x, y, width, height }
    }

    /// A `size` by `size` square with its top left at `pos`.
    pub fn square(pos: Position, size: i32) -> Rect {
        Rect::new(pos.x, pos.y, size, size)
    }

    #[inline]
    pub fn position(&self) -> Position {
        Position::new(self.x, self.y)
    }

    /// One past the last covered column. Widened so rectangles near `i32::MAX` cannot overflow.
    #[inline]
    pub fn right(&self) -> i64 {
        i64::from(self.x) + i64::from(self.width)
    }

    #[inline]
    pub fn bottom(&self) -> i64 {
        i64::from(self.y) + i64::from(self.height)
    }

    /// Do the rectangles share at least one pixel? Rectangles that only touch along an edge do
    /// not, and an empty rectangle never intersects anything.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.width > 0 && self.height > 0 && other.width > 0 && other.height > 0 &&
        i64::from(self.x) < other.right() && i64::from(other.x) < self.right() &&
        i64::from(self.y) < other.bottom() && i64::from(other.y) < self.bottom()
    }
}

/// The playing area, `width` by `height` pixels with its origin at `(0, 0)`.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct Bounds {
    pub width: i32,
    pub height: i32,
}

impl Bounds {
    pub fn new(width: i32, height: i32) -> Bounds {
        Bounds { width, height }
    }

    /// Does a `footprint` square placed with its top left at `pos` lie wholly inside?
    #[inline]
    pub fn fits(&self, pos: Position, footprint: i32) -> bool {
        let max_x = i64::from(self.width) - i64::from(footprint);
        let max_y = i64::from(self.height) - i64::from(footprint);
        pos.x >= 0 && i64::from(pos.x) <= max_x && pos.y >= 0 && i64::from(pos.y) <= max_y
    }
}

/// Would a `footprint` square at `pos` overlap any of the `obstacles`?
pub fn collides(pos: Position, footprint: i32, obstacles: &[Rect]) -> bool {
    let candidate = Rect::square(pos, footprint);
    obstacles.iter().any(|obstacle| candidate.intersects(obstacle))
}

/// The movement validity gate: in bounds and touching no obstacle.
#[inline]
pub fn is_valid_position(pos: Position, footprint: i32, bounds: Bounds, obstacles: &[Rect]) -> bool {
    bounds.fits(pos, footprint) && !collides(pos, footprint, obstacles)
}
