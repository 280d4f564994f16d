// Page data sources: WordPress GraphQL, or an in-memory fixture

pub mod graphql;
pub mod memory;
pub mod queries;

pub use graphql::GraphQlProvider;
pub use memory::MemoryProvider;

use acf_press_core::PageRecord;
use async_trait::async_trait;
use std::collections::HashSet;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("GraphQL endpoint returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("GraphQL error: {0}")]
    GraphQl(String),

    #[error("GraphQL response contained no data")]
    EmptyResponse,

    #[error("Invalid bearer token: {0}")]
    InvalidToken(String),

    #[error("Invalid fixture: {0}")]
    Fixture(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ProviderError>;

/// Source of page records, injected into build and preview.
///
/// Implementations own their own client lifetime; nothing here assumes a
/// process-wide connection.
#[async_trait]
pub trait DataProvider: Send + Sync {
    /// Every slug that should be generated, in source order
    async fn list_slugs(&self) -> Result<Vec<String>>;

    /// The page published under `slug`, or `None` if there is no such page
    async fn fetch_page(&self, slug: &str) -> Result<Option<PageRecord>>;
}

/// Drop repeated slugs, keeping the first occurrence
pub fn dedupe_slugs(slugs: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    slugs
        .into_iter()
        .filter(|slug| seen.insert(slug.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dedupe_slugs_keeps_first() {
        let slugs = vec![
            "about".to_string(),
            "".to_string(),
            "about".to_string(),
            "contact".to_string(),
            "".to_string(),
        ];
        assert_eq!(dedupe_slugs(slugs), vec!["about", "", "contact"]);
    }
}
