use crate::error::ProviderError;
use crate::models::RawResult;
use crate::normalize::decode_text;
use crate::traits::ResultSource;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::sync::Arc;
use url::Url;

pub const DEFAULT_ENDPOINT: &str = "https://www.googleapis.com/customsearch/v1";

/// Client for the Google Custom Search JSON API. The core only reads the
/// ordered (title, url, snippet) triples out of each page.
pub struct GoogleCustomSearchProvider {
    client: Arc<Client>,
    endpoint: String,
    api_key: String,
    cx: String,
}

impl GoogleCustomSearchProvider {
    pub fn new(
        endpoint: impl Into<String>,
        api_key: impl Into<String>,
        cx: impl Into<String>,
    ) -> Self {
        Self {
            client: Arc::new(Client::new()),
            endpoint: endpoint.into(),
            api_key: api_key.into(),
            cx: cx.into(),
        }
    }

    fn page_url(&self, query: &str, start: u32) -> Result<Url, ProviderError> {
        Ok(Url::parse_with_params(
            &self.endpoint,
            &[
                ("key", self.api_key.as_str()),
                ("cx", self.cx.as_str()),
                ("q", query),
                ("start", &start.to_string()),
            ],
        )?)
    }
}

#[async_trait]
impl ResultSource for GoogleCustomSearchProvider {
    async fn fetch_page(&self, query: &str, start: u32) -> Result<Vec<RawResult>, ProviderError> {
        let url = self.page_url(query, start)?;
        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            return Err(ProviderError::BackendResponse {
                provider: "google".to_string(),
                details: response.status().to_string(),
            });
        }

        // Decode once at the ingestion boundary; everything downstream is
        // already-validated text.
        let bytes = response.bytes().await?;
        let body =
            decode_text(bytes.to_vec()).map_err(|error| ProviderError::Encoding(error.to_string()))?;
        let payload: Value = serde_json::from_str(&body)?;

        Ok(parse_items(&payload, start))
    }
}

/// Pulls the (title, link, snippet) triples out of a response page. Ranks are
/// `start + index`, preserving provider order. Items missing a text field are
/// dropped rather than failing the page.
fn parse_items(payload: &Value, start: u32) -> Vec<RawResult> {
    let items = payload
        .pointer("/items")
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default();

    let mut results = Vec::new();
    for (index, item) in items.iter().enumerate() {
        let title = item.pointer("/title").and_then(Value::as_str);
        let link = item.pointer("/link").and_then(Value::as_str);
        let snippet = item.pointer("/snippet").and_then(Value::as_str);

        let (Some(title), Some(link), Some(snippet)) = (title, link, snippet) else {
            continue;
        };

        results.push(RawResult {
            rank: start + index as u32,
            title: title.to_string(),
            url: link.to_string(),
            snippet: snippet.to_string(),
        });
    }

    results
}
