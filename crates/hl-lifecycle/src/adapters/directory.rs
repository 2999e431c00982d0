use crate::domain::{Affiliation, LifecycleError};
use crate::ports::IdentityResolver;
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

/// Errors loading an identity directory document.
#[derive(Debug, Error)]
pub enum DirectoryError {
    /// Directory file could not be read.
    #[error("Failed to read identity directory {path}: {reason}")]
    Io {
        /// File that was read.
        path: String,
        /// Underlying I/O error.
        reason: String,
    },

    /// Document is not a JSON object of name to role strings.
    #[error("Malformed identity directory: {0}")]
    Parse(String),

    /// An entry names a role outside the vocabulary.
    #[error("Identity directory entry {name:?}: {source}")]
    Affiliation {
        /// Identity whose role was rejected.
        name: String,
        /// `InvalidAffiliation` for the rejected role.
        #[source]
        source: LifecycleError,
    },
}

/// Static name-to-affiliation directory.
///
/// Stands in for the host's certificate attributes: the node loads it from a
/// JSON file, tests build it in code.
#[derive(Debug, Clone, Default)]
pub struct DirectoryResolver {
    entries: HashMap<String, Affiliation>,
}

impl DirectoryResolver {
    /// Create an empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with_entry(mut self, name: impl Into<String>, affiliation: Affiliation) -> Self {
        self.insert(name, affiliation);
        self
    }

    /// Add or replace an entry.
    pub fn insert(&mut self, name: impl Into<String>, affiliation: Affiliation) {
        self.entries.insert(name.into(), affiliation);
    }

    /// Number of known identities.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Parse a directory document: `{"alice": "house_owner", ...}`.
    pub fn from_json_str(json: &str) -> Result<Self, DirectoryError> {
        let raw: HashMap<String, String> =
            serde_json::from_str(json).map_err(|e| DirectoryError::Parse(e.to_string()))?;

        let mut directory = Self::new();
        for (name, role) in raw {
            match role.parse::<Affiliation>() {
                Ok(affiliation) => directory.insert(name, affiliation),
                Err(source) => return Err(DirectoryError::Affiliation { name, source }),
            }
        }
        Ok(directory)
    }

    /// Load a directory document from disk.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, DirectoryError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| DirectoryError::Io {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Self::from_json_str(&json)
    }
}

impl IdentityResolver for DirectoryResolver {
    fn affiliation_of(&self, name: &str) -> Result<Affiliation, LifecycleError> {
        self.entries
            .get(name)
            .copied()
            .ok_or_else(|| LifecycleError::UnknownIdentity(name.to_string()))
    }
}
