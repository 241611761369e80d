//! Issue and comment types.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// ============================================================================
// Fetched representations
// ============================================================================

/// An issue as returned by the forge API.
///
/// `comments` is the comment *count* at this stage; the archived form
/// replaces it with the fully downloaded list before anything is persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Issue {
    /// Forge-assigned identifier.
    pub id: u64,
    /// Issue number within the repository.
    pub number: u64,
    /// Free-text body. Absent for issues created without one.
    pub body: Option<String>,
    /// Number of comments on the issue.
    pub comments: u64,
    /// API URL for the issue's comment collection.
    pub comments_url: String,
    /// All remaining API fields, preserved verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A comment as returned by the forge API. Owned by exactly one issue.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    /// Forge-assigned identifier.
    pub id: u64,
    /// Free-text body.
    pub body: Option<String>,
    /// All remaining API fields, preserved verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

// ============================================================================
// Archived representations
// ============================================================================

/// An issue ready for persistence: body rewritten to local asset paths and
/// the comment count replaced by the resolved comment list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArchivedIssue {
    /// Forge-assigned identifier.
    pub id: u64,
    /// Issue number within the repository.
    pub number: u64,
    /// Body with embedded remote asset links rewritten.
    pub body: Option<String>,
    /// API URL the comments were fetched from.
    pub comments_url: String,
    /// The full comment list. Replaces the count field of [`Issue`].
    pub comments: Vec<ArchivedComment>,
    /// All remaining API fields, preserved verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A comment ready for persistence, body rewritten to local asset paths.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArchivedComment {
    /// Forge-assigned identifier.
    pub id: u64,
    /// Body with embedded remote asset links rewritten.
    pub body: Option<String>,
    /// All remaining API fields, preserved verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Issue {
    /// Creates an issue with just the fields the backup logic touches.
    pub fn new(id: u64, number: u64, body: Option<String>) -> Self {
        Self {
            id,
            number,
            body,
            comments: 0,
            comments_url: String::new(),
            extra: Map::new(),
        }
    }

    /// Consumes the fetched issue into its archived form.
    ///
    /// `body` is the rewritten body and `comments` the fully downloaded,
    /// already-archived comment list. Pure transformation; the unresolved
    /// count never reaches disk.
    pub fn into_archived(self, body: Option<String>, comments: Vec<ArchivedComment>) -> ArchivedIssue {
        ArchivedIssue {
            id: self.id,
            number: self.number,
            body,
            comments_url: self.comments_url,
            comments,
            extra: self.extra,
        }
    }
}

impl Comment {
    /// Creates a comment with just the fields the backup logic touches.
    pub fn new(id: u64, body: Option<String>) -> Self {
        Self {
            id,
            body,
            extra: Map::new(),
        }
    }

    /// Consumes the fetched comment into its archived form with the
    /// rewritten body.
    pub fn into_archived(self, body: Option<String>) -> ArchivedComment {
        ArchivedComment {
            id: self.id,
            body,
            extra: self.extra,
        }
    }
}
