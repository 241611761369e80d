//! The seams the orchestrator runs against, and their production
//! implementations.
//!
//! [`Forge`] covers every API interaction of a run and [`CloneGit`] the git
//! transport; end-to-end tests drive the orchestrator with in-memory fakes
//! of both. [`FetchAsset`] is the narrow download seam the asset mirror
//! needs, so mirror tests fake only that.

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use repovault_core::{Comment, Issue, Release, Repository, User};
use repovault_fetch::{ApiClient, Downloader, FetchError, GitCli, Paginator, ProcessError};

// ============================================================================
// Seams
// ============================================================================

/// Downloads one embedded asset to a target path, returning the final path
/// (extension resolved from the response).
#[async_trait]
pub trait FetchAsset: Send + Sync {
    /// Downloads `url` to `target`.
    async fn fetch_asset(&self, url: &str, target: &Path) -> Result<PathBuf, FetchError>;
}

/// Read access to the forge API, one sequential operation at a time.
#[async_trait]
pub trait Forge: Send + Sync {
    /// Lists the account's repositories, fully paginated, in API order.
    async fn list_repositories(&self) -> Result<Vec<Repository>, FetchError>;

    /// Lists all issues of a repository (open and closed), fully paginated.
    async fn list_issues(&self, owner: &str, name: &str) -> Result<Vec<Issue>, FetchError>;

    /// Lists all comments behind an issue's `comments_url`.
    async fn list_comments(&self, comments_url: &str) -> Result<Vec<Comment>, FetchError>;

    /// Lists all releases of a repository, fully paginated.
    async fn list_releases(&self, owner: &str, name: &str) -> Result<Vec<Release>, FetchError>;

    /// Fetches the authenticated user's profile.
    async fn fetch_user(&self) -> Result<User, FetchError>;

    /// Lists the account's starred repositories, fully paginated.
    async fn list_starred(&self) -> Result<Vec<Repository>, FetchError>;

    /// Downloads binary content to `target`, returning the final path.
    ///
    /// `octet_stream` requests raw bytes from release-asset endpoints.
    async fn download_asset(
        &self,
        url: &str,
        target: &Path,
        octet_stream: bool,
    ) -> Result<PathBuf, FetchError>;
}

/// Clones one repository's full git history.
#[async_trait]
pub trait CloneGit: Send + Sync {
    /// Clones `owner/name` into `target`.
    async fn clone_repo(&self, owner: &str, name: &str, target: &Path)
        -> Result<(), ProcessError>;
}

// ============================================================================
// Production implementations
// ============================================================================

/// [`Forge`] implementation against the GitHub REST API.
#[derive(Debug, Clone)]
pub struct GithubForge {
    client: ApiClient,
    paginator: Paginator,
    downloader: Downloader,
}

impl GithubForge {
    /// Creates a forge facade over a configured client.
    pub fn new(client: ApiClient) -> Self {
        let paginator = Paginator::new(client.config().page_size);
        let downloader = Downloader::new(client.clone());
        Self {
            client,
            paginator,
            downloader,
        }
    }
}

#[async_trait]
impl Forge for GithubForge {
    async fn list_repositories(&self) -> Result<Vec<Repository>, FetchError> {
        self.paginator.collect_all_as(&self.client, "/user/repos").await
    }

    async fn list_issues(&self, owner: &str, name: &str) -> Result<Vec<Issue>, FetchError> {
        let path = format!("/repos/{owner}/{name}/issues?state=all");
        self.paginator.collect_all_as(&self.client, &path).await
    }

    async fn list_comments(&self, comments_url: &str) -> Result<Vec<Comment>, FetchError> {
        self.paginator.collect_all_as(&self.client, comments_url).await
    }

    async fn list_releases(&self, owner: &str, name: &str) -> Result<Vec<Release>, FetchError> {
        let path = format!("/repos/{owner}/{name}/releases");
        self.paginator.collect_all_as(&self.client, &path).await
    }

    async fn fetch_user(&self) -> Result<User, FetchError> {
        self.client.get_json("/user").await
    }

    async fn list_starred(&self) -> Result<Vec<Repository>, FetchError> {
        self.paginator.collect_all_as(&self.client, "/user/starred").await
    }

    async fn download_asset(
        &self,
        url: &str,
        target: &Path,
        octet_stream: bool,
    ) -> Result<PathBuf, FetchError> {
        self.downloader.download(url, target, octet_stream).await
    }
}

/// [`CloneGit`] implementation invoking the system git binary with the
/// access token embedded in the clone URL.
#[derive(Debug, Clone)]
pub struct TokenCloner {
    git: GitCli,
    token: String,
}

impl TokenCloner {
    /// Creates a cloner around a located git binary.
    pub fn new(git: GitCli, token: impl Into<String>) -> Self {
        Self {
            git,
            token: token.into(),
        }
    }
}

#[async_trait]
impl CloneGit for TokenCloner {
    async fn clone_repo(
        &self,
        owner: &str,
        name: &str,
        target: &Path,
    ) -> Result<(), ProcessError> {
        self.git.clone_repo(owner, name, &self.token, target).await
    }
}
