// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # `RepoVault` Backup
//!
//! The backup side of `RepoVault`: everything between the request layer and
//! the snapshot on disk.
//!
//! - [`forge`] - the [`forge::Forge`] and [`forge::CloneGit`] seams the
//!   orchestrator runs against, plus their production implementations
//!   backed by `repovault-fetch`
//! - [`mirror`] - scans free-text bodies for embedded forge attachment
//!   links, downloads each one, and rewrites the text to local paths
//! - [`markdown`] - the same mirroring applied to the markdown files of a
//!   cloned working tree
//! - [`snapshot`] - JSON snapshot writing and the destructive destination
//!   reset
//! - [`run`] - the sequential backup orchestrator
//!
//! A run is strictly sequential. Every failure surfaces and halts the whole
//! backup; there is no per-resource skip-and-continue and no resume. A
//! failed run can leave the destination partially populated; the next run
//! resets it.

pub mod error;
pub mod forge;
pub mod markdown;
pub mod mirror;
pub mod run;
pub mod snapshot;

// Re-export key types at crate root
pub use error::BackupError;
pub use forge::{CloneGit, FetchAsset, Forge, GithubForge, TokenCloner};
pub use mirror::AssetMirror;
pub use run::BackupRun;
