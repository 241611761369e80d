//! Authenticated user profile.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The authenticated user as returned by the forge API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Account login name.
    pub login: String,
    /// All remaining API fields, preserved verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
