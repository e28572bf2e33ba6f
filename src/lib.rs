//! **mazerun** is a small timed maze game: random maze generation on a fixed grid, a
//! player walking from the top-left corner to the bottom-right goal, and a best time
//! kept across retries.
//!
//! The game logic (`generators`, `session`, `input`) does not draw anything or read any
//! device itself. A frame loop feeds it `input::GameEvent`s and `clock::Timestamp`s and
//! reads the state back to draw it. The SDL frame loop lives in `renderers` behind the
//! `sdl` feature.

pub mod cells;
pub mod clock;
pub mod errors;
pub mod generators;
pub mod geometry;
pub mod grid;
pub mod grid_displays;
pub mod grid_iterators;
pub mod input;
pub mod pathing;
pub mod renderers;
pub mod session;
pub mod units;
#[cfg(feature = "sdl")]
mod sdl;
