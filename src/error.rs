//! Error type shared by the simulation and the terminal front end.
//!
//! The simulation has no external failure surface; every variant except
//! `Io` is a violated precondition and the failing call leaves state
//! untouched.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GameError {
    /// Frame time must be finite and non-negative.
    #[error("invalid elapsed time: {0}")]
    InvalidElapsed(f64),

    #[error("image variant {index} out of range (have {available})")]
    InvalidVariant { index: usize, available: usize },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),
}
