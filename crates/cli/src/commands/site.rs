// Shared setup for commands that read a site directory

use acf_press_core::{CONFIG_FILE, PageRecord, SiteConfig, is_safe_slug, parse_site_toml};
use acf_press_provider::{DataProvider, GraphQlProvider, MemoryProvider, dedupe_slugs};
use anyhow::{Context, Result};
use futures::{StreamExt, TryStreamExt, stream};
use std::path::Path;
use std::sync::Arc;

/// Load site.toml from a site directory
pub fn load_config(path: &Path) -> Result<SiteConfig> {
    if !path.exists() {
        anyhow::bail!(
            "Site directory does not exist: {}\nRun 'acf-press init {}' first",
            path.display(),
            path.display()
        );
    }

    let config_path = path.join(CONFIG_FILE);
    if !config_path.exists() {
        anyhow::bail!(
            "{} not found in {}\nRun 'acf-press init {}' first",
            CONFIG_FILE,
            path.display(),
            path.display()
        );
    }

    parse_site_toml(&config_path).with_context(|| format!("Failed to parse {}", CONFIG_FILE))
}

/// Pick the page source: a JSON fixture when given, otherwise the GraphQL endpoint
pub fn make_provider(
    config: &SiteConfig,
    path: &Path,
    fixture: Option<&Path>,
) -> Result<Arc<dyn DataProvider>> {
    match fixture {
        Some(fixture) => {
            let provider = MemoryProvider::from_json_file(fixture, &config.source.namespace)
                .with_context(|| format!("Failed to load fixture {}", fixture.display()))?;
            tracing::debug!(fixture = %fixture.display(), pages = provider.pages().len(), "using fixture");
            Ok(Arc::new(provider))
        }
        None => {
            let provider = GraphQlProvider::from_config(&config.source, path)
                .context("Failed to configure GraphQL client")?;
            tracing::debug!(endpoint = %provider.endpoint(), "using GraphQL endpoint");
            Ok(Arc::new(provider))
        }
    }
}

/// Fetch every listed page, at most `concurrency` requests in flight.
///
/// Pages come back in listing order with duplicate slugs removed. A slug
/// that was listed but resolves to no page is an error, and so is one that
/// would not stay inside the output directory.
pub async fn fetch_pages(
    provider: Arc<dyn DataProvider>,
    concurrency: usize,
) -> Result<Vec<PageRecord>> {
    let slugs = provider.list_slugs().await.context("Failed to list pages")?;
    let slugs = dedupe_slugs(slugs);
    if let Some(slug) = slugs.iter().find(|slug| !is_safe_slug(slug)) {
        anyhow::bail!("Refusing page slug '{}': not a single path segment", slug);
    }
    tracing::info!(count = slugs.len(), "fetching pages");

    stream::iter(slugs)
        .map(|slug| {
            let provider = Arc::clone(&provider);
            async move {
                tracing::debug!(slug = %slug, "fetching page");
                let page = provider
                    .fetch_page(&slug)
                    .await
                    .with_context(|| format!("Failed to fetch page '{}'", slug))?;
                page.with_context(|| format!("Page '{}' was listed but not found", slug))
            }
        })
        .buffered(concurrency.max(1))
        .try_collect()
        .await
}
