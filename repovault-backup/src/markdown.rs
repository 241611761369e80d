//! Post-clone markdown rewriting.
//!
//! After a repository is cloned, its markdown files may still embed forge
//! attachment links. This pass applies the asset mirror to each `.md` file
//! in the working tree, with the repository's shared `images/` directory as
//! the download target and a link prefix computed relative to the file's
//! own location.

use std::path::Path;

use tracing::debug;
use walkdir::WalkDir;

use crate::error::BackupError;
use crate::forge::FetchAsset;
use crate::mirror::AssetMirror;

/// Relative link prefix from a markdown file to the shared images
/// directory, which sits next to the clone root.
///
/// `depth` is how many directories the file sits below the clone root: a
/// file at the root needs `../images`, one level down `../../images`, and
/// so on.
pub fn image_link_prefix(depth: usize) -> String {
    format!("{}images", "../".repeat(depth + 1))
}

/// Rewrites every markdown file under `clone_dir`, downloading referenced
/// assets into `images_dir`. Returns how many files were rewritten.
///
/// The `.git` directory is skipped. Files without references are left
/// untouched on disk.
pub async fn rewrite_markdown_tree(
    fetcher: &dyn FetchAsset,
    clone_dir: &Path,
    images_dir: &Path,
) -> Result<usize, BackupError> {
    let mirror = AssetMirror::new(fetcher);
    let mut rewritten_files = 0;

    let walker = WalkDir::new(clone_dir)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| entry.file_name() != ".git");

    for entry in walker {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) != Some("md") {
            continue;
        }

        let depth = path
            .parent()
            .and_then(|parent| parent.strip_prefix(clone_dir).ok())
            .map_or(0, |rel| rel.components().count());
        let prefix = image_link_prefix(depth);

        let stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .ok_or_else(|| BackupError::InvalidPath(path.display().to_string()))?;
        let template = format!("{stem}_{{id}}");

        // Cloned trees are not under our control; tolerate non-UTF-8 bytes
        // instead of failing the run.
        let bytes = tokio::fs::read(path).await?;
        let contents = String::from_utf8_lossy(&bytes).into_owned();

        let updated = mirror
            .rewrite(Some(&contents), images_dir, &prefix, &template)
            .await?
            .unwrap_or_default();
        if updated != contents {
            tokio::fs::write(path, &updated).await?;
            rewritten_files += 1;
            debug!(path = %path.display(), "markdown rewritten");
        }
    }

    Ok(rewritten_files)
}
