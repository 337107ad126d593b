//! The persisted favorites set.
//!
//! Favorites are keyed by display name and persisted as a plain JSON string
//! array, the same shape the original browser storage used, so existing
//! artifacts load unchanged. A missing file is simply an empty set.

use std::collections::BTreeSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ArtifactError;

/// Icon names the user has starred.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Favorites {
    names: BTreeSet<String>,
}

impl Favorites {
    /// An empty favorites set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Flips the favorite state for a name; returns the new state.
    pub fn toggle(&mut self, name: &str) -> bool {
        if self.names.remove(name) {
            false
        } else {
            self.names.insert(name.to_string());
            true
        }
    }

    /// Whether a name is starred.
    pub fn is_favorite(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// Unstars everything.
    pub fn clear(&mut self) {
        self.names.clear();
    }

    /// Number of starred names.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// True when nothing is starred.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Iterates the starred names in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    /// Serializes as a JSON string array.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Deserializes from a JSON string array.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Reads the set from disk; a missing file yields an empty set.
    pub fn load(path: &Path) -> Result<Self, ArtifactError> {
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Self::default());
            }
            Err(err) => {
                return Err(ArtifactError::Io { path: path.to_path_buf(), source: err });
            }
        };
        Self::from_json(&json)
            .map_err(|source| ArtifactError::Malformed { path: path.to_path_buf(), source })
    }

    /// Writes the set to disk.
    pub fn save(&self, path: &Path) -> Result<(), ArtifactError> {
        let json = self
            .to_json()
            .map_err(|source| ArtifactError::Malformed { path: path.to_path_buf(), source })?;
        std::fs::write(path, json)
            .map_err(|source| ArtifactError::Io { path: path.to_path_buf(), source })
    }
}
