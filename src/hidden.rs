//! The hidden-list artifact.
//!
//! A small JSON record, maintained by hand outside the running program,
//! that names icons excluded from the catalog by source path:
//!
//! ```json
//! {
//!   "hiddenIcons": ["icons/azure/00028-icon-service-home_32_regular.svg"],
//!   "lastUpdated": "2025-11-02T10:14:00Z"
//! }
//! ```
//!
//! The program consumes this at load time and can *suggest* an updated
//! version (see [`HiddenConfig::with_hidden`]) for an operator to commit,
//! but it never writes the artifact back into the source tree itself.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ArtifactError;

/// The hidden-list: source paths to exclude from the catalog, plus an
/// opaque caller-supplied timestamp of the last manual edit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HiddenConfig {
    /// Source paths of hidden icons, matched exactly against
    /// [`IconRecord::file_path`](crate::IconRecord::file_path).
    #[serde(default)]
    pub hidden_icons: Vec<String>,

    /// When the artifact was last edited. Opaque to this crate: the value
    /// is carried through serialization untouched and never parsed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<String>,
}

impl HiddenConfig {
    /// An empty hidden-list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if the given source path is hidden.
    pub fn contains(&self, file_path: &str) -> bool {
        self.hidden_icons.iter().any(|p| p == file_path)
    }

    /// Number of hidden paths.
    pub fn len(&self) -> usize {
        self.hidden_icons.len()
    }

    /// Returns true if nothing is hidden.
    pub fn is_empty(&self) -> bool {
        self.hidden_icons.is_empty()
    }

    /// Produces the suggested artifact that would hide `file_path`.
    ///
    /// Hiding an already-hidden path is a no-op: the returned config equals
    /// `self`, timestamp included.
    pub fn with_hidden(&self, file_path: &str, last_updated: impl Into<String>) -> Self {
        if self.contains(file_path) {
            return self.clone();
        }
        let mut hidden_icons = self.hidden_icons.clone();
        hidden_icons.push(file_path.to_string());
        Self {
            hidden_icons,
            last_updated: Some(last_updated.into()),
        }
    }

    /// Produces the suggested artifact that would unhide `file_path`.
    ///
    /// Unhiding an absent path is a no-op, like [`with_hidden`](Self::with_hidden).
    pub fn without_hidden(&self, file_path: &str, last_updated: impl Into<String>) -> Self {
        if !self.contains(file_path) {
            return self.clone();
        }
        Self {
            hidden_icons: self
                .hidden_icons
                .iter()
                .filter(|p| *p != file_path)
                .cloned()
                .collect(),
            last_updated: Some(last_updated.into()),
        }
    }

    /// Serializes to compact JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Serializes to pretty-printed JSON, the shape operators edit by hand.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserializes from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Reads the artifact from disk. A missing file yields the empty list,
    /// since a catalog without a hidden-list is simply unfiltered.
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

    /// Writes the artifact to a caller-chosen location (never the source
    /// tree) so an operator can pick it up.
    pub fn save(&self, path: &Path) -> Result<(), ArtifactError> {
        let json = self
            .to_json_pretty()
            .map_err(|source| ArtifactError::Malformed { path: path.to_path_buf(), source })?;
        std::fs::write(path, json)
            .map_err(|source| ArtifactError::Io { path: path.to_path_buf(), source })
    }
}
