// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # `RepoVault` Core
//!
//! Core types, models, and configuration for the `RepoVault` backup tool.
//!
//! This crate provides the foundational abstractions used across all other
//! `RepoVault` crates:
//!
//! - Forge API representations (repositories, issues, comments, releases,
//!   users), kept deliberately loose: each struct types the fields the
//!   backup needs and flattens everything else into an extras map so the
//!   persisted snapshot loses nothing.
//! - Archived record types produced by pure transformations (a fetched
//!   issue plus its downloaded comments and rewritten body become an
//!   [`ArchivedIssue`]; nothing is mutated in place).
//! - Error types and the run configuration.

pub mod config;
pub mod error;
pub mod models;

// Re-export error types
pub use error::CoreError;

// Re-export configuration
pub use config::BackupConfig;

// Re-export all model types
pub use models::{
    // Archived (post-resolution) records
    ArchivedComment,
    ArchivedIssue,
    ArchivedRelease,
    // Forge representations
    Comment,
    Issue,
    Release,
    ReleaseAsset,
    Repository,
    RepositoryOwner,
    User,
};
