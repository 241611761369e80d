//! Fetch-layer tuning.

use crate::retry::RetryPolicy;

/// Default API origin prefixed onto relative paths.
const DEFAULT_BASE_URL: &str = "https://api.github.com";

/// Default page size for paginated resources.
const DEFAULT_PAGE_SIZE: usize = 100;

/// Tuning for the request layer.
///
/// Passed into [`crate::ApiClient`] and [`crate::Paginator`] at
/// construction. Tests override the delays with millisecond values.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// API origin prefixed onto relative paths.
    pub base_url: String,
    /// Items requested per page.
    pub page_size: usize,
    /// Retry behavior for every outbound request.
    pub retry: RetryPolicy,
}

impl FetchConfig {
    /// Sets the API origin.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Sets the page size.
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Sets the retry policy.
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            retry: RetryPolicy::default(),
        }
    }
}
