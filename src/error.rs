//! Error types for frontier_set
//!
//! The trie and Merkle tree never fail. Errors only come from the edges of
//! the crate: reading input, parsing configuration and decoding hex.

use thiserror::Error;

/// Result type alias for frontier_set operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur around a frontier
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid hex: {0}")]
    InvalidHex(#[from] hex::FromHexError),

    #[error("Config error: {0}")]
    Config(String),
}
