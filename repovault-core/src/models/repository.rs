//! Repository types.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A repository as returned by the forge API.
///
/// Identifies the unit of backup work. The same shape is used for the
/// account's own repositories and for the starred list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Repository {
    /// Repository name (without the owner prefix).
    pub name: String,
    /// Owning account.
    pub owner: RepositoryOwner,
    /// All remaining API fields, preserved verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The owning account of a repository.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepositoryOwner {
    /// Account login name.
    pub login: String,
    /// All remaining API fields, preserved verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Repository {
    /// Creates a repository with just the identifying fields set.
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            owner: RepositoryOwner {
                login: owner.into(),
                extra: Map::new(),
            },
            extra: Map::new(),
        }
    }

    /// Returns the `owner/name` form used in API paths.
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner.login, self.name)
    }
}
