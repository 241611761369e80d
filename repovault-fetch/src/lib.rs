// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # `RepoVault` Fetch
//!
//! The request layer for the `RepoVault` backup tool.
//!
//! Everything the backup does against the network goes through this crate,
//! one operation at a time:
//!
//! - [`client::ApiClient`] - rate-limit-aware, retrying HTTP GET against
//!   the forge API (relative paths are prefixed with the API origin)
//! - [`retry::RetryPolicy`] - bounded retry with a typed failure
//!   classification and per-class backoff
//! - [`paginate::Paginator`] - cursor pagination that accumulates pages
//!   until a short page signals end-of-data
//! - [`download::Downloader`] - streams binary responses to disk, deriving
//!   a file extension from the response content type
//! - [`git::GitCli`] - repository clone delegated to the external `git`
//!   binary as a subprocess
//!
//! There is no scheduler and no concurrency here. The crate suspends at
//! every network and disk call and never issues parallel requests; staying
//! sequential is what keeps a run under the forge's rate limit.

pub mod client;
pub mod config;
pub mod download;
pub mod error;
pub mod git;
pub mod paginate;
pub mod retry;

// Re-export key types at crate root
pub use client::ApiClient;
pub use config::FetchConfig;
pub use download::Downloader;
pub use error::{FetchError, ProcessError};
pub use git::GitCli;
pub use paginate::{FetchPages, Paginator};
pub use retry::{FailureClass, RetryPolicy};
