//! Embedded asset mirroring.
//!
//! Free-text bodies (issues, comments, release notes, markdown files) may
//! embed links to the forge's attachment host. The mirror downloads each
//! referenced asset and rewrites the text to point at the local copy, so
//! the persisted snapshot stands on its own.

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::error::BackupError;
use crate::forge::FetchAsset;

/// Matches one embedded attachment reference including its delimiter pair:
/// either the parenthesized URL of markdown image/link syntax or a bare
/// double-quoted URL.
static ASSET_LINK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"["(]https://github\.com/(.+)/assets/(.+)[)"]"#).expect("Invalid regex")
});

/// Downloads embedded assets and rewrites bodies to local paths.
pub struct AssetMirror<'a> {
    fetcher: &'a dyn FetchAsset,
}

impl<'a> AssetMirror<'a> {
    /// Creates a mirror that downloads through the given fetcher.
    pub fn new(fetcher: &'a dyn FetchAsset) -> Self {
        Self { fetcher }
    }

    /// Rewrites every embedded attachment reference in `body`.
    ///
    /// For each reference, in order of appearance: the target filename is
    /// `template` with `{id}` replaced by the 1-based position (zero-padded
    /// to the width of the match count), the asset is downloaded into
    /// `asset_dir`, and the reference is replaced by
    /// `<link_prefix>/<final name>` inside its own delimiter pair. One
    /// occurrence per match, so a URL embedded twice yields two downloads
    /// each paired with its own reference.
    ///
    /// A missing body stays missing and a body without references comes
    /// back unchanged; neither creates `asset_dir`. Every download must
    /// succeed before the body is considered final.
    pub async fn rewrite(
        &self,
        body: Option<&str>,
        asset_dir: &Path,
        link_prefix: &str,
        template: &str,
    ) -> Result<Option<String>, BackupError> {
        let Some(body) = body else {
            return Ok(None);
        };

        let matches: Vec<String> = ASSET_LINK_RE
            .find_iter(body)
            .map(|m| m.as_str().to_string())
            .collect();
        if matches.is_empty() {
            return Ok(Some(body.to_string()));
        }

        debug!(count = matches.len(), "mirroring embedded assets");
        let width = matches.len().to_string().len();
        let mut rewritten = body.to_string();
        tokio::fs::create_dir_all(asset_dir).await?;

        for (index, raw) in matches.iter().enumerate() {
            // Strip the surrounding quote or paren pair captured with the URL.
            let source_url = &raw[1..raw.len() - 1];
            let open = &raw[..1];
            let close = &raw[raw.len() - 1..];

            let position = format!("{:0width$}", index + 1);
            let target_name = template.replace("{id}", &position);
            let stored = self
                .fetcher
                .fetch_asset(source_url, &asset_dir.join(&target_name))
                .await?;
            let file_name = stored
                .file_name()
                .and_then(|n| n.to_str())
                .ok_or_else(|| BackupError::InvalidPath(stored.display().to_string()))?;

            // One occurrence per match: a repeated URL pairs each of its
            // references with its own downloaded copy.
            let local = format!("{open}{link_prefix}/{file_name}{close}");
            rewritten = rewritten.replacen(raw.as_str(), &local, 1);
        }

        Ok(Some(rewritten))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use repovault_fetch::FetchError;
    use std::path::PathBuf;
    use std::sync::Mutex;

    /// Writes a stub file per download and records the source URLs.
    struct FakeAssets {
        downloads: Mutex<Vec<String>>,
    }

    impl FakeAssets {
        fn new() -> Self {
            Self {
                downloads: Mutex::new(Vec::new()),
            }
        }

        fn downloads(&self) -> Vec<String> {
            self.downloads.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl FetchAsset for FakeAssets {
        async fn fetch_asset(&self, url: &str, target: &Path) -> Result<PathBuf, FetchError> {
            self.downloads.lock().unwrap().push(url.to_string());
            // Mimic extension resolution for an image response.
            let target = if target.extension().is_some() {
                target.to_path_buf()
            } else {
                target.with_extension("png")
            };
            tokio::fs::write(&target, b"stub").await?;
            Ok(target)
        }
    }

    fn asset_url(file: &str) -> String {
        format!("https://github.com/octocat/widget/assets/583231/{file}")
    }

    #[tokio::test]
    async fn test_missing_body_stays_missing() {
        let fake = FakeAssets::new();
        let mirror = AssetMirror::new(&fake);
        let dir = tempfile::tempdir().unwrap();

        let result = mirror
            .rewrite(None, dir.path(), "./assets", "issue_1_{id}")
            .await
            .unwrap();
        assert!(result.is_none());
        assert!(fake.downloads().is_empty());
    }

    #[tokio::test]
    async fn test_no_matches_returns_body_unchanged() {
        let fake = FakeAssets::new();
        let mirror = AssetMirror::new(&fake);
        let dir = tempfile::tempdir().unwrap();
        let asset_dir = dir.path().join("assets");

        let body = "plain text with a link to https://example.com/page";
        let result = mirror
            .rewrite(Some(body), &asset_dir, "./assets", "issue_1_{id}")
            .await
            .unwrap();
        assert_eq!(result.as_deref(), Some(body));
        assert!(fake.downloads().is_empty());
        // No match set, no directory.
        assert!(!asset_dir.exists());
    }

    #[tokio::test]
    async fn test_markdown_image_is_mirrored() {
        let fake = FakeAssets::new();
        let mirror = AssetMirror::new(&fake);
        let dir = tempfile::tempdir().unwrap();
        let asset_dir = dir.path().join("assets");

        let body = format!("before\n![screenshot]({})\nafter", asset_url("abc.png"));
        let result = mirror
            .rewrite(Some(&body), &asset_dir, "./assets", "issue_5_{id}")
            .await
            .unwrap()
            .unwrap();

        assert_eq!(result, "before\n![screenshot](./assets/issue_5_1.png)\nafter");
        assert!(!result.contains("github.com"));
        assert_eq!(fake.downloads(), vec![asset_url("abc.png")]);
        assert!(asset_dir.join("issue_5_1.png").exists());
    }

    #[tokio::test]
    async fn test_quoted_url_is_mirrored() {
        let fake = FakeAssets::new();
        let mirror = AssetMirror::new(&fake);
        let dir = tempfile::tempdir().unwrap();
        let asset_dir = dir.path().join("assets");

        let body = format!("<img src=\"{}\">", asset_url("shot.png"));
        let result = mirror
            .rewrite(Some(&body), &asset_dir, "./assets", "comment_9_{id}")
            .await
            .unwrap()
            .unwrap();

        assert_eq!(result, "<img src=\"./assets/comment_9_1.png\">");
        assert!(!result.contains("github.com"));
    }

    #[tokio::test]
    async fn test_multiple_references_are_indexed_in_order() {
        let fake = FakeAssets::new();
        let mirror = AssetMirror::new(&fake);
        let dir = tempfile::tempdir().unwrap();
        let asset_dir = dir.path().join("assets");

        let body = format!(
            "![a]({})\n![b]({})\n![c]({})",
            asset_url("a.png"),
            asset_url("b.png"),
            asset_url("c.png")
        );
        let result = mirror
            .rewrite(Some(&body), &asset_dir, "./assets", "issue_7_{id}")
            .await
            .unwrap()
            .unwrap();

        assert_eq!(
            result,
            "![a](./assets/issue_7_1.png)\n![b](./assets/issue_7_2.png)\n![c](./assets/issue_7_3.png)"
        );
        assert_eq!(
            fake.downloads(),
            vec![asset_url("a.png"), asset_url("b.png"), asset_url("c.png")]
        );
    }

    #[tokio::test]
    async fn test_repeated_url_pairs_each_reference_with_own_copy() {
        let fake = FakeAssets::new();
        let mirror = AssetMirror::new(&fake);
        let dir = tempfile::tempdir().unwrap();
        let asset_dir = dir.path().join("assets");

        // The same attachment embedded twice: each reference gets its own
        // index and its own downloaded file.
        let url = asset_url("dup.png");
        let body = format!("![a]({url})\n![b]({url})");
        let result = mirror
            .rewrite(Some(&body), &asset_dir, "./assets", "issue_7_{id}")
            .await
            .unwrap()
            .unwrap();

        assert_eq!(
            result,
            "![a](./assets/issue_7_1.png)\n![b](./assets/issue_7_2.png)"
        );
        assert_eq!(fake.downloads(), vec![url.clone(), url]);
        assert!(asset_dir.join("issue_7_1.png").exists());
        assert!(asset_dir.join("issue_7_2.png").exists());
    }

    #[tokio::test]
    async fn test_index_padding_follows_match_count() {
        let fake = FakeAssets::new();
        let mirror = AssetMirror::new(&fake);
        let dir = tempfile::tempdir().unwrap();
        let asset_dir = dir.path().join("assets");

        let body = (0..10)
            .map(|n| format!("![{n}]({})", asset_url(&format!("f{n}.png"))))
            .collect::<Vec<_>>()
            .join("\n");
        let result = mirror
            .rewrite(Some(&body), &asset_dir, "./assets", "issue_1_{id}")
            .await
            .unwrap()
            .unwrap();

        // Ten matches pad to two digits.
        assert!(result.contains("issue_1_01.png"));
        assert!(result.contains("issue_1_10.png"));
        assert!(!result.contains("github.com"));
    }
}
