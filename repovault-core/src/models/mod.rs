//! Forge API representations and archived record types.
//!
//! The fetched types mirror what the GitHub REST API returns. Only the
//! fields the backup logic touches are typed; everything else rides along
//! in a flattened extras map so snapshots keep the full API payload.
//!
//! ## Submodules
//!
//! - [`repository`] - Repository and owner
//! - [`issue`] - Issues, comments, and their archived forms
//! - [`release`] - Releases, release assets, and their archived form
//! - [`user`] - The authenticated user profile

mod issue;
mod release;
mod repository;
mod user;

// Re-export everything at the models level
pub use issue::{ArchivedComment, ArchivedIssue, Comment, Issue};
pub use release::{ArchivedRelease, Release, ReleaseAsset};
pub use repository::{Repository, RepositoryOwner};
pub use user::User;

#[cfg(test)]
mod serde_tests;
