use crate::queries::{LIST_PAGES, PAGE_BY_SLUG};
use crate::{DataProvider, ProviderError, Result};
use acf_press_core::{BlockRecord, PageRecord, SourceConfig, slug_from_uri, slug_uri};
use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::fs;
use std::path::Path;
use url::Url;

/// Longest slice of an error body kept in [`ProviderError::Status`]
const MAX_ERROR_BODY: usize = 200;

/// Data provider backed by a WPGraphQL endpoint
#[derive(Debug, Clone)]
pub struct GraphQlProvider {
    client: reqwest::Client,
    endpoint: Url,
    namespace: String,
    page_query: String,
}

#[derive(Serialize)]
struct GraphQlRequest<'a> {
    query: &'a str,
    variables: Value,
}

/// GraphQL response envelope
#[derive(Debug, Deserialize)]
struct GraphQlResponse<T> {
    data: Option<T>,
    #[serde(default)]
    errors: Vec<GraphQlError>,
}

#[derive(Debug, Deserialize)]
struct GraphQlError {
    message: String,
}

#[derive(Debug, Deserialize)]
struct PagesData {
    pages: Option<PageConnection>,
}

#[derive(Debug, Deserialize)]
struct PageConnection {
    #[serde(default)]
    nodes: Vec<PageNode>,
}

#[derive(Debug, Deserialize)]
struct PageNode {
    uri: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PageByData {
    #[serde(rename = "pageBy")]
    page_by: Option<WirePage>,
}

#[derive(Debug, Deserialize)]
struct WirePage {
    title: Option<String>,
    content: Option<String>,
    acf: Option<WireAcf>,
}

/// Blocks stay raw so one malformed entry cannot fail the whole page
#[derive(Debug, Deserialize)]
struct WireAcf {
    #[serde(default)]
    blocks: Option<Vec<Value>>,
}

impl GraphQlProvider {
    /// Provider with default client settings and the built-in page query
    pub fn new(endpoint: Url) -> Result<Self> {
        Ok(Self::with_client(reqwest::Client::builder().build()?, endpoint))
    }

    /// Provider using a caller-supplied HTTP client
    pub fn with_client(client: reqwest::Client, endpoint: Url) -> Self {
        Self {
            client,
            endpoint,
            namespace: "acf".to_string(),
            page_query: PAGE_BY_SLUG.to_string(),
        }
    }

    /// Build from the `[source]` section of site.toml.
    ///
    /// `site_dir` anchors the optional `page_query` override file.
    pub fn from_config(source: &SourceConfig, site_dir: &Path) -> Result<Self> {
        let mut headers = HeaderMap::new();
        if let Some(token) = source.token() {
            let value = HeaderValue::from_str(&format!("Bearer {}", token))
                .map_err(|e| ProviderError::InvalidToken(e.to_string()))?;
            headers.insert(AUTHORIZATION, value);
        }

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(source.timeout)
            .user_agent(concat!("acf-press/", env!("CARGO_PKG_VERSION")))
            .build()?;

        let mut provider = Self::with_client(client, source.endpoint.clone())
            .namespace(source.namespace.clone());

        if let Some(query_path) = &source.page_query {
            let query = fs::read_to_string(site_dir.join(query_path))?;
            provider = provider.page_query(query);
        }

        Ok(provider)
    }

    /// Block tag namespace to strip (`acf` by default)
    pub fn namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    /// Replace the built-in page query
    pub fn page_query(mut self, query: impl Into<String>) -> Self {
        self.page_query = query.into();
        self
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    async fn execute<T: DeserializeOwned>(&self, query: &str, variables: Value) -> Result<T> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .json(&GraphQlRequest { query, variables })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::Status {
                status: status.as_u16(),
                body: truncate(&body, MAX_ERROR_BODY),
            });
        }

        let envelope: GraphQlResponse<T> = response.json().await?;

        if !envelope.errors.is_empty() {
            let messages: Vec<&str> = envelope.errors.iter().map(|e| e.message.as_str()).collect();
            return Err(ProviderError::GraphQl(messages.join("; ")));
        }

        envelope.data.ok_or(ProviderError::EmptyResponse)
    }
}

#[async_trait]
impl DataProvider for GraphQlProvider {
    async fn list_slugs(&self) -> Result<Vec<String>> {
        let data: PagesData = self.execute(LIST_PAGES, json!({})).await?;

        let slugs: Vec<String> = data
            .pages
            .map(|connection| connection.nodes)
            .unwrap_or_default()
            .into_iter()
            .filter_map(|node| node.uri)
            .map(|uri| slug_from_uri(&uri))
            .collect();

        tracing::debug!(count = slugs.len(), endpoint = %self.endpoint, "listed pages");
        Ok(slugs)
    }

    async fn fetch_page(&self, slug: &str) -> Result<Option<PageRecord>> {
        let uri = slug_uri(slug);
        tracing::debug!(slug, uri = %uri, "fetching page");

        let data: PageByData = self
            .execute(&self.page_query, json!({ "slug": uri }))
            .await?;

        Ok(data.page_by.map(|page| {
            let blocks = page
                .acf
                .and_then(|acf| acf.blocks)
                .unwrap_or_default()
                .into_iter()
                .filter_map(|value| {
                    let block = BlockRecord::from_value(value);
                    if block.is_none() {
                        tracing::debug!(slug, "skipping block that is not an object");
                    }
                    block
                })
                .map(|block| block.without_namespace(&self.namespace))
                .collect();

            PageRecord {
                slug: slug.to_string(),
                title: page.title.unwrap_or_default(),
                content: page.content.unwrap_or_default(),
                blocks,
            }
        }))
    }
}

fn truncate(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        Some((idx, _)) => format!("{}…", &s[..idx]),
        None => s.to_string(),
    }
}
