//! Error types for the board and its configuration.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid dimension: {name} must be greater than zero")]
    InvalidDimension { name: &'static str },

    #[error("Invalid dimension: {name} times the cell size does not fit in u32 pixels")]
    TooLarge { name: &'static str },

    #[error("Invalid value for '{key}': {value:?}")]
    InvalidValue { key: String, value: String },
}
