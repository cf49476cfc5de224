use crate::error::ProviderError;
use crate::models::RawResult;
use async_trait::async_trait;

/// A page-oriented search backend. `start` is the 1-based rank of the first
/// result on the requested page.
#[async_trait]
pub trait ResultSource {
    async fn fetch_page(&self, query: &str, start: u32) -> Result<Vec<RawResult>, ProviderError>;
}

/// Page size the paging helper assumes, matching the provider's maximum.
pub const PAGE_SIZE: u32 = 10;

/// Deepest page the provider serves (Google caps `start` at 91).
pub const MAX_PAGES: u32 = 10;

/// Fetches `pages` consecutive pages (starts 1, 11, 21, …) and concatenates
/// them in provider order. Requests beyond `MAX_PAGES` are clamped, which
/// also keeps the start offset well inside `u32`. No retries: a failed page
/// propagates.
pub async fn fetch_results<S: ResultSource>(
    source: &S,
    query: &str,
    pages: u32,
) -> Result<Vec<RawResult>, ProviderError> {
    let mut results = Vec::new();
    for page in 0..pages.min(MAX_PAGES) {
        let start = page * PAGE_SIZE + 1;
        results.extend(source.fetch_page(query, start).await?);
    }
    Ok(results)
}
