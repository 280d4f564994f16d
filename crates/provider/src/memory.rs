use crate::{DataProvider, ProviderError, Result};
use acf_press_core::{PageRecord, is_safe_slug};
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Pages held in memory, in the order they were given.
///
/// Backs offline builds from a JSON fixture and the tests of everything
/// downstream of a provider.
#[derive(Debug, Clone, Default)]
pub struct MemoryProvider {
    pages: Vec<PageRecord>,
}

/// Fixture file layout: `{ "pages": [ { "slug", "title", "content", "blocks" } ] }`
#[derive(Debug, Deserialize)]
struct Fixture {
    pages: Vec<PageRecord>,
}

impl MemoryProvider {
    pub fn new(pages: Vec<PageRecord>) -> Self {
        Self { pages }
    }

    /// Load a JSON fixture, stripping `namespace` from block tags
    pub fn from_json_file<P: AsRef<Path>>(path: P, namespace: &str) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_json_str(&content, namespace)
    }

    pub fn from_json_str(content: &str, namespace: &str) -> Result<Self> {
        let fixture: Fixture = serde_json::from_str(content)?;

        check_slugs(&fixture.pages)?;

        let pages = fixture
            .pages
            .into_iter()
            .map(|mut page| {
                page.blocks = page
                    .blocks
                    .into_iter()
                    .map(|block| block.without_namespace(namespace))
                    .collect();
                page
            })
            .collect();

        Ok(Self { pages })
    }

    pub fn pages(&self) -> &[PageRecord] {
        &self.pages
    }
}

fn check_slugs(pages: &[PageRecord]) -> Result<()> {
    let mut seen = HashSet::new();
    for page in pages {
        if !is_safe_slug(&page.slug) {
            return Err(ProviderError::Fixture(format!(
                "slug '{}' is not a single path segment",
                page.slug
            )));
        }
        if !seen.insert(page.slug.as_str()) {
            return Err(ProviderError::Fixture(format!(
                "duplicate slug '{}'",
                page.slug
            )));
        }
    }
    Ok(())
}

#[async_trait]
impl DataProvider for MemoryProvider {
    async fn list_slugs(&self) -> Result<Vec<String>> {
        Ok(self.pages.iter().map(|page| page.slug.clone()).collect())
    }

    async fn fetch_page(&self, slug: &str) -> Result<Option<PageRecord>> {
        Ok(self.pages.iter().find(|page| page.slug == slug).cloned())
    }
}
