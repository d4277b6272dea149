/// Number of cells along one row of a grid (the grid width in cells).
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct RowLength(pub usize);
/// Number of cells along one column of a grid (the grid height in cells).
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct ColumnLength(pub usize);

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct RowIndex(pub usize);
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct ColumnIndex(pub usize);

/// Side length of one square cell in pixels.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct CellSize(pub u32);

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct EdgesCount(pub usize);
