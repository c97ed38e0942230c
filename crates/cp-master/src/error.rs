//! Controller error type.

use thiserror::Error;

/// Errors surfaced to the host by the controller and configuration loader.
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid cluster id {0} (expected 1-10)")]
    InvalidCluster(u8),

    #[error("Input {0} is out of range")]
    InputOutOfRange(usize),
}
