//! Cursor pagination over the forge API.
//!
//! Pages are requested one at a time with an incrementing page number; a
//! page shorter than the configured page size (including an empty one)
//! signals end-of-data. No total-count header is assumed.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::client::ApiClient;
use crate::error::FetchError;

// ============================================================================
// Page Source
// ============================================================================

/// A source of pages: one paginated GET returning a JSON array.
///
/// The production implementation is [`ApiClient`]; tests drive the
/// pagination loop with an in-memory fake.
#[async_trait]
pub trait FetchPages: Send + Sync {
    /// Fetches one page at the given path (page parameters included).
    async fn fetch_page(&self, path: &str) -> Result<Vec<Value>, FetchError>;
}

#[async_trait]
impl FetchPages for ApiClient {
    async fn fetch_page(&self, path: &str) -> Result<Vec<Value>, FetchError> {
        self.get_json(path).await
    }
}

// ============================================================================
// Paginator
// ============================================================================

/// Accumulates all pages of a resource, in order.
#[derive(Debug, Clone)]
pub struct Paginator {
    page_size: usize,
}

impl Paginator {
    /// Creates a paginator with the given page size.
    pub fn new(page_size: usize) -> Self {
        Self { page_size }
    }

    /// Fetches every page of `path` and returns the concatenation.
    ///
    /// Page N's items always precede page N+1's. Any page failure is fatal
    /// to the whole operation; no partial result is returned.
    pub async fn collect_all(
        &self,
        fetcher: &dyn FetchPages,
        path: &str,
    ) -> Result<Vec<Value>, FetchError> {
        let separator = if path.contains('?') { '&' } else { '?' };
        let mut items = Vec::new();
        let mut page = 1usize;

        loop {
            let page_path = format!("{path}{separator}per_page={}&page={page}", self.page_size);
            let mut batch = fetcher.fetch_page(&page_path).await?;
            debug!(page, items = batch.len(), "fetched page");

            let short_page = batch.len() < self.page_size;
            items.append(&mut batch);
            if short_page {
                break;
            }
            page += 1;
        }

        debug!(total = items.len(), "pagination complete");
        Ok(items)
    }

    /// Like [`Self::collect_all`], deserializing each item into `T`.
    pub async fn collect_all_as<T: DeserializeOwned>(
        &self,
        fetcher: &dyn FetchPages,
        path: &str,
    ) -> Result<Vec<T>, FetchError> {
        self.collect_all(fetcher, path)
            .await?
            .into_iter()
            .map(|item| serde_json::from_value(item).map_err(FetchError::from))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::Mutex;

    /// Serves a fixed page sequence and records every requested path.
    struct FakePages {
        pages: Vec<Vec<Value>>,
        calls: Mutex<Vec<String>>,
    }

    impl FakePages {
        fn new(pages: Vec<Vec<Value>>) -> Self {
            Self {
                pages,
                calls: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl FetchPages for FakePages {
        async fn fetch_page(&self, path: &str) -> Result<Vec<Value>, FetchError> {
            let mut calls = self.calls.lock().unwrap();
            calls.push(path.to_string());
            let index = calls.len() - 1;
            self.pages
                .get(index)
                .cloned()
                .ok_or_else(|| {
                    FetchError::Io(std::io::Error::other("page past end-of-data"))
                })
        }
    }

    fn numbered(range: std::ops::Range<u64>) -> Vec<Value> {
        range.map(|n| json!(n)).collect()
    }

    #[tokio::test]
    async fn test_concatenates_pages_in_order() {
        let fake = FakePages::new(vec![numbered(0..3), numbered(3..6), numbered(6..7)]);
        let paginator = Paginator::new(3);

        let items = paginator.collect_all(&fake, "/user/repos").await.unwrap();
        assert_eq!(items, numbered(0..7));
    }

    #[tokio::test]
    async fn test_stops_after_short_page() {
        let fake = FakePages::new(vec![numbered(0..3), numbered(3..5)]);
        let paginator = Paginator::new(3);

        paginator.collect_all(&fake, "/user/repos").await.unwrap();
        // The short second page ends the loop; no third request is issued.
        assert_eq!(
            fake.calls(),
            vec![
                "/user/repos?per_page=3&page=1",
                "/user/repos?per_page=3&page=2",
            ]
        );
    }

    #[tokio::test]
    async fn test_empty_first_page() {
        let fake = FakePages::new(vec![Vec::new()]);
        let paginator = Paginator::new(3);

        let items = paginator.collect_all(&fake, "/user/repos").await.unwrap();
        assert!(items.is_empty());
        assert_eq!(fake.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_exact_multiple_requests_trailing_empty_page() {
        // A full final page cannot be distinguished from more data, so one
        // more (empty) page is requested.
        let fake = FakePages::new(vec![numbered(0..3), Vec::new()]);
        let paginator = Paginator::new(3);

        let items = paginator.collect_all(&fake, "/user/repos").await.unwrap();
        assert_eq!(items, numbered(0..3));
        assert_eq!(fake.calls().len(), 2);
    }

    #[tokio::test]
    async fn test_existing_query_string_uses_ampersand() {
        let fake = FakePages::new(vec![Vec::new()]);
        let paginator = Paginator::new(3);

        paginator
            .collect_all(&fake, "/repos/octocat/widget/issues?state=all")
            .await
            .unwrap();
        assert_eq!(
            fake.calls(),
            vec!["/repos/octocat/widget/issues?state=all&per_page=3&page=1"]
        );
    }

    #[tokio::test]
    async fn test_failure_discards_partial_result() {
        // Two full pages exist, then the fake errors out.
        let fake = FakePages::new(vec![numbered(0..3), numbered(3..6)]);
        let paginator = Paginator::new(3);

        let result = paginator.collect_all(&fake, "/user/repos").await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_typed_collection() {
        let fake = FakePages::new(vec![vec![json!({"login": "octocat"})]]);
        let paginator = Paginator::new(3);

        #[derive(serde::Deserialize)]
        struct Login {
            login: String,
        }

        let items: Vec<Login> = paginator.collect_all_as(&fake, "/user/starred").await.unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].login, "octocat");
    }
}
