//! Streaming binary downloads.

use std::path::{Path, PathBuf};

use futures::StreamExt;
use reqwest::header::{self, HeaderMap, HeaderValue};
use tokio::io::AsyncWriteExt;
use tracing::{debug, instrument};

use crate::client::ApiClient;
use crate::error::FetchError;

/// Downloads binary content through the rate-gated client.
#[derive(Debug, Clone)]
pub struct Downloader {
    client: ApiClient,
}

impl Downloader {
    /// Creates a downloader backed by the given client.
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Downloads `url` to `target`, returning the final path.
    ///
    /// When `octet_stream` is set, the request carries an
    /// `Accept: application/octet-stream` header; the forge's release-asset
    /// endpoints require it to return raw bytes instead of metadata.
    ///
    /// If `target` has no extension, one is derived from the response
    /// content type and appended. The body is streamed to disk chunk by
    /// chunk; any stream or write error is terminal.
    #[instrument(skip(self), fields(url = %url))]
    pub async fn download(
        &self,
        url: &str,
        target: &Path,
        octet_stream: bool,
    ) -> Result<PathBuf, FetchError> {
        let mut headers = HeaderMap::new();
        if octet_stream {
            headers.insert(
                header::ACCEPT,
                HeaderValue::from_static("application/octet-stream"),
            );
        }

        let response = self.client.get_with_headers(url, headers).await?;

        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);
        let target = resolve_extension(target, content_type.as_deref());

        let mut file = tokio::fs::File::create(&target).await?;
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            file.write_all(&chunk?).await?;
        }
        file.flush().await?;

        debug!(path = %target.display(), "download complete");
        Ok(target)
    }
}

/// Appends a file extension derived from the content type, unless the
/// target already carries one.
///
/// Idempotent: a path with an extension is returned unchanged, so the same
/// content type never double-suffixes.
pub fn resolve_extension(target: &Path, content_type: Option<&str>) -> PathBuf {
    if target.extension().is_some() {
        return target.to_path_buf();
    }

    let extension = content_type
        .map(|ct| ct.split(';').next().unwrap_or(ct).trim())
        .and_then(mime_guess::get_mime_extensions_str)
        .and_then(|exts| exts.first().copied());

    match extension {
        Some(ext) => target.with_extension(ext),
        None => target.to_path_buf(),
    }
}
