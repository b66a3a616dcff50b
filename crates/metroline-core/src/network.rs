//! Network configuration: the JSON document describing stations and their
//! connections.
//!
//! The document is forgiving by design: duplicate names and connections to
//! unknown stations are warned and skipped during construction, and a
//! missing or unreadable file degrades to an empty network rather than
//! aborting startup.

use std::fs;
use std::path::Path;

use serde::Deserialize;

/// One station entry in the network document.
#[derive(Debug, Clone, Deserialize)]
pub struct StationSpec {
    pub name: String,
    /// Names of stations this one connects to (directed edges).
    #[serde(default)]
    pub connections: Vec<String>,
}

/// Root of the network document.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NetworkConfig {
    #[serde(default)]
    pub stations: Vec<StationSpec>,
}

/// Errors reading the network document.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Json(serde_json::Error),
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Json(e)
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "could not read network document: {}", e),
            ConfigError::Json(e) => write!(f, "malformed network document: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {}

impl NetworkConfig {
    /// Parse a network document from JSON text.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a network document from disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Read a document, or fall back to an empty network, logging why.
    pub fn load_or_empty(path: impl AsRef<Path>) -> Self {
        match Self::from_path(&path) {
            Ok(config) => config,
            Err(e) => {
                log::error!(
                    "{} ({}); starting with an empty network",
                    e,
                    path.as_ref().display()
                );
                Self::default()
            }
        }
    }
}
