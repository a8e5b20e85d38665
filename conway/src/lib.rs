//! Conway's Game of Life on a fixed, non-wrapping board.
//!
//! [`Board`] owns the cells and computes generations; [`GameConfig`] carries the
//! board layout and timing read from a properties file.

pub mod board;
pub mod cell;
pub mod config;
pub mod error;

pub use board::Board;
pub use cell::Cell;
pub use config::GameConfig;
pub use error::{Error, Result};
