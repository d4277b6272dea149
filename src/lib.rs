//! **mazes** holds two small grid demonstrations: a maze carved one step at a time by a
//! backtracking walker, and a player that finds its way to a target around placed obstacles
//! with a breadth first search.
//!
//! Both are driven a tick at a time so a host loop can draw every intermediate state. Windowing,
//! input polling and drawing are left to that host.

pub mod cells;
pub mod events;
pub mod generators;
pub mod geometry;
pub mod grid;
pub mod pathing;
pub mod player;
pub mod settings;
pub mod units;
mod utils;
