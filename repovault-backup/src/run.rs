//! The sequential backup orchestrator.
//!
//! One run walks: reset → repositories → per repository (issues →
//! comments → releases → release binaries → clone → markdown) → user →
//! starred. Strictly one operation at a time, in program order; any
//! failure aborts the whole run.

use std::path::Path;

use async_trait::async_trait;
use tracing::info;

use repovault_core::{ArchivedComment, ArchivedIssue, ArchivedRelease, BackupConfig, Repository};
use repovault_fetch::FetchError;

use crate::error::BackupError;
use crate::forge::{CloneGit, FetchAsset, Forge};
use crate::markdown;
use crate::mirror::AssetMirror;
use crate::snapshot;

/// Link prefix written into API bodies; the asset directory sits next to
/// the issues/releases snapshots it is referenced from.
const ASSET_LINK_PREFIX: &str = "./assets";

/// Adapts the full [`Forge`] to the narrow download seam the mirror needs.
struct ForgeAssets<'a>(&'a dyn Forge);

#[async_trait]
impl FetchAsset for ForgeAssets<'_> {
    async fn fetch_asset(
        &self,
        url: &str,
        target: &Path,
    ) -> Result<std::path::PathBuf, FetchError> {
        self.0.download_asset(url, target, false).await
    }
}

/// One full backup run.
pub struct BackupRun<'a> {
    forge: &'a dyn Forge,
    cloner: &'a dyn CloneGit,
    config: &'a BackupConfig,
}

impl<'a> BackupRun<'a> {
    /// Creates a run over the given seams and configuration.
    pub fn new(forge: &'a dyn Forge, cloner: &'a dyn CloneGit, config: &'a BackupConfig) -> Self {
        Self {
            forge,
            cloner,
            config,
        }
    }

    /// Executes the whole backup.
    pub async fn execute(&self) -> Result<(), BackupError> {
        let dest = &self.config.dest;

        snapshot::reset_dest(dest).await?;

        info!("fetching repositories");
        let repositories = self.forge.list_repositories().await?;
        snapshot::write_json(&dest.join("repositories.json"), &repositories).await?;
        info!(count = repositories.len(), "repository list saved");

        for repository in &repositories {
            self.backup_repository(repository).await?;
        }

        info!("fetching user profile");
        let user = self.forge.fetch_user().await?;
        snapshot::write_json(&dest.join("user").join("user.json"), &user).await?;

        info!("fetching starred repositories");
        let starred = self.forge.list_starred().await?;
        snapshot::write_json(&dest.join("user").join("starred.json"), &starred).await?;

        info!("backup completed");
        Ok(())
    }

    /// Backs up one repository: issues with resolved comments, releases
    /// with binaries, the git clone, and the markdown pass over it.
    async fn backup_repository(&self, repository: &Repository) -> Result<(), BackupError> {
        let owner = self.config.username.as_str();
        let name = repository.name.as_str();
        info!(repo = %repository.full_name(), "backing up repository");

        let repo_dir = self.config.dest.join("repositories").join(name);
        let asset_dir = repo_dir.join("assets");
        let assets = ForgeAssets(self.forge);
        let mirror = AssetMirror::new(&assets);

        // Issues: bodies localized and comments fully resolved before the
        // snapshot is written, so the file never holds remote links or an
        // unresolved comment count.
        let issues = self.forge.list_issues(owner, name).await?;
        let mut archived_issues: Vec<ArchivedIssue> = Vec::with_capacity(issues.len());
        for issue in issues {
            let template = format!("issue_{}_{{id}}", issue.id);
            let body = mirror
                .rewrite(issue.body.as_deref(), &asset_dir, ASSET_LINK_PREFIX, &template)
                .await?;

            let comments = if issue.comments == 0 {
                Vec::new()
            } else {
                self.forge.list_comments(&issue.comments_url).await?
            };
            let mut archived_comments: Vec<ArchivedComment> = Vec::with_capacity(comments.len());
            for comment in comments {
                let template = format!("issue_{}_comment_{}_{{id}}", issue.id, comment.id);
                let comment_body = mirror
                    .rewrite(
                        comment.body.as_deref(),
                        &asset_dir,
                        ASSET_LINK_PREFIX,
                        &template,
                    )
                    .await?;
                archived_comments.push(comment.into_archived(comment_body));
            }

            archived_issues.push(issue.into_archived(body, archived_comments));
        }
        snapshot::write_json(&repo_dir.join("issues.json"), &archived_issues).await?;

        // Releases: notes localized, binaries saved per tag.
        let releases = self.forge.list_releases(owner, name).await?;
        let mut archived_releases: Vec<ArchivedRelease> = Vec::with_capacity(releases.len());
        for release in releases {
            let template = format!("release_{}_{{id}}", release.id);
            let body = mirror
                .rewrite(release.body.as_deref(), &asset_dir, ASSET_LINK_PREFIX, &template)
                .await?;

            for asset in &release.assets {
                let tag_dir = repo_dir.join("releases").join(&release.tag_name);
                tokio::fs::create_dir_all(&tag_dir).await?;
                self.forge
                    .download_asset(&asset.url, &tag_dir.join(&asset.name), true)
                    .await?;
            }

            archived_releases.push(release.into_archived(body));
        }
        snapshot::write_json(&repo_dir.join("releases.json"), &archived_releases).await?;

        // Full git history.
        let clone_dir = repo_dir.join("repository");
        self.cloner.clone_repo(owner, name, &clone_dir).await?;

        // Localize attachment links inside the cloned markdown files.
        markdown::rewrite_markdown_tree(&assets, &clone_dir, &repo_dir.join("images")).await?;

        Ok(())
    }
}
