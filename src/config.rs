//! Configuration for building frontiers from files
//!
//! Values come from a JSON file, by default
//! `~/.config/frontier/config.json` when it exists; command-line flags
//! override them.

use crate::merkle::HashAlgorithm;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default size of the chunks input files are split into
pub const DEFAULT_CHUNK_SIZE: usize = 256;

/// Settings for turning input files into exclusions
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Bytes per excluded chunk; the last chunk of a file may be shorter
    pub chunk_size: usize,
    /// Exclude the leaf hash of each chunk instead of the chunk itself
    pub hash_chunks: bool,
    /// Hash primitive for Merkle trees and chunk hashing
    pub algorithm: HashAlgorithm,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            chunk_size: DEFAULT_CHUNK_SIZE,
            hash_chunks: false,
            algorithm: HashAlgorithm::default(),
        }
    }
}

impl Config {
    /// Default config file location (`~/.config/frontier/config.json`)
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("frontier").join("config.json"))
    }

    /// Load from `path`
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        let config: Config = serde_json::from_str(&content).map_err(|e| {
            Error::Config(format!("Failed to parse {}: {}", path.display(), e))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `path` if given, else from the default location if a file
    /// exists there, else fall back to defaults
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::load(path);
        }
        match Self::default_path() {
            Some(path) if path.exists() => {
                tracing::debug!(path = %path.display(), "loading config");
                Self::load(&path)
            }
            _ => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.chunk_size == 0 {
            return Err(Error::Config("chunk_size must be at least 1".into()));
        }
        Ok(())
    }
}
