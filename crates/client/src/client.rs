use catalog_core::{ERROR_PREVIEW_CHARS, Item, NewItem, StatsReport};
use reqwest::Url;
use reqwest::header::CONTENT_TYPE;
use serde::Deserialize;
use serde::de::{DeserializeOwned, Deserializer};
use serde_json::Value;

use crate::error::ClientError;

/// Body of `GET /api/items` before normalization.
///
/// Older servers answer with a bare array; current ones with an envelope.
/// Pagination fields are kept as raw JSON because they are coerced
/// leniently on the client.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ListResponse {
    Bare(Vec<Item>),
    Envelope {
        #[serde(default, deserialize_with = "null_as_empty")]
        items: Vec<Item>,
        #[serde(default)]
        pagination: Option<RawPagination>,
    },
}

/// Pagination fields as sent by the server; anything may be missing or odd.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPagination {
    #[serde(default)]
    pub current_page: Option<Value>,
    #[serde(default)]
    pub items_per_page: Option<Value>,
    #[serde(default)]
    pub total_items: Option<Value>,
}

fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<Item>, D::Error> {
    Ok(Option::<Vec<Item>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Client for the catalog HTTP API.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    client: reqwest::Client,
    base_url: Url,
}

impl CatalogClient {
    /// Creates a client for the API rooted at `base_url`.
    ///
    /// # Errors
    /// Returns `ClientInit` if the URL does not parse, cannot carry a path, or
    /// the HTTP client cannot be built.
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        let base_url = Url::parse(base_url.trim_end_matches('/'))
            .map_err(|e| ClientError::ClientInit(format!("invalid base URL {base_url}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(ClientError::ClientInit(format!("{base_url} cannot be a base URL")));
        }
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .map_err(|e| ClientError::ClientInit(e.to_string()))?;
        Ok(Self { client, base_url })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    /// Fetches one page of items. An empty `q` sends no search parameter.
    ///
    /// # Errors
    /// Transport failures, non-success statuses and non-JSON bodies.
    pub async fn list_items(
        &self,
        q: &str,
        page: usize,
        limit: usize,
    ) -> Result<ListResponse, ClientError> {
        let mut request = self.client.get(self.endpoint(&["api", "items"])?);
        if !q.is_empty() {
            request = request.query(&[("q", q)]);
        }
        let response = request
            .query(&[("page", page), ("limit", limit)])
            .send()
            .await?;
        decode(response, "Failed to fetch items").await
    }

    /// # Errors
    /// `HttpStatus` with code 404 when the item does not exist.
    pub async fn get_item(&self, id: &str) -> Result<Item, ClientError> {
        let response = self.client.get(self.endpoint(&["api", "items", id])?).send().await?;
        decode(response, "Failed to fetch item").await
    }

    /// # Errors
    /// `HttpStatus` with code 400 and the server's message on validation failure.
    pub async fn create_item(&self, new: &NewItem) -> Result<Item, ClientError> {
        let response = self.client.post(self.endpoint(&["api", "items"])?).json(new).send().await?;
        decode(response, "Failed to create item").await
    }

    /// # Errors
    /// Transport failures, non-success statuses and non-JSON bodies.
    pub async fn stats(&self) -> Result<StatsReport, ClientError> {
        let response = self.client.get(self.endpoint(&["api", "stats"])?).send().await?;
        decode(response, "Failed to fetch stats").await
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, ClientError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| {
                ClientError::ClientInit(format!("{} cannot be a base URL", self.base_url))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

async fn decode<T: DeserializeOwned>(
    response: reqwest::Response,
    action: &str,
) -> Result<T, ClientError> {
    let status = response.status();
    let is_json = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.contains("application/json"));
    let body = response.text().await?;

    if !is_json {
        return Err(ClientError::Malformed(format!("{}...", preview(&body))));
    }

    if !status.is_success() {
        let message = serde_json::from_str::<Value>(&body)
            .ok()
            .and_then(|v| server_message(&v))
            .unwrap_or_else(|| format!("{action}: {status}"));
        tracing::debug!(code = status.as_u16(), %message, "catalog API returned an error");
        return Err(ClientError::HttpStatus { code: status.as_u16(), message });
    }

    serde_json::from_str(&body).map_err(|e| ClientError::Malformed(format!("{action}: {e}")))
}

fn server_message(body: &Value) -> Option<String> {
    ["message", "error"]
        .iter()
        .find_map(|key| body.get(*key).and_then(Value::as_str))
        .map(ToOwned::to_owned)
}

fn preview(body: &str) -> String {
    body.chars().take(ERROR_PREVIEW_CHARS).collect()
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "test code")]
mod tests {
    use super::*;

    #[test]
    fn endpoint_keeps_base_path_and_encodes_ids() {
        let client = CatalogClient::new("http://localhost:3001/catalog/").unwrap();
        let url = client.endpoint(&["api", "items", "a b/c"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:3001/catalog/api/items/a%20b%2Fc");
    }

    #[test]
    fn rejects_unusable_base_urls() {
        assert!(matches!(CatalogClient::new("not a url"), Err(ClientError::ClientInit(_))));
        assert!(matches!(CatalogClient::new("mailto:a@b.c"), Err(ClientError::ClientInit(_))));
    }

    #[test]
    fn default_url_points_at_local_server() {
        let client = CatalogClient::new(catalog_core::DEFAULT_API_URL).unwrap();
        assert_eq!(client.base_url(), "http://localhost:3001/");
    }

    #[test]
    fn preview_is_char_bounded() {
        let body = "é".repeat(150);
        assert_eq!(preview(&body).chars().count(), ERROR_PREVIEW_CHARS);
    }

    #[test]
    fn list_response_shapes() {
        let bare: ListResponse = serde_json::from_str(r#"[{"id":1,"name":"a"}]"#).unwrap();
        assert!(matches!(bare, ListResponse::Bare(ref items) if items.len() == 1));

        let envelope: ListResponse =
            serde_json::from_str(r#"{"items":null,"pagination":{"currentPage":"2"}}"#).unwrap();
        let ListResponse::Envelope { items, pagination } = envelope else {
            panic!("expected envelope");
        };
        assert!(items.is_empty());
        assert_eq!(pagination.unwrap().current_page, Some(Value::from("2")));
    }
}
