use super::site::{fetch_pages, load_config, make_provider};
use acf_press_core::SiteConfig;
use acf_press_generator::default_registry;
use acf_press_provider::DataProvider;
use acf_press_validator::{ValidationReport, validate_config, validate_pages, validate_slugs};
use anyhow::Context;
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub async fn run(path: PathBuf, fixture: Option<PathBuf>) -> anyhow::Result<()> {
    println!("Validating site at: {}", path.display());

    let config = load_config(&path)?;
    println!("✓ site.toml valid");
    println!("  Site: {}", config.site.title);
    match &fixture {
        Some(fixture) => println!("  Source: {} (fixture)", fixture.display()),
        None => println!("  Source: {}", config.source.endpoint),
    }

    let provider = make_provider(&config, &path, fixture.as_deref())?;
    let report = validate_site(&config, &path, provider).await?;
    print_report(&report);

    if !report.is_ok() {
        anyhow::bail!("Validation failed with {} error(s)", report.errors.len());
    }

    println!("\n✓ Validation passed");
    Ok(())
}

/// Config checks, then the raw slug listing, then every page's blocks.
///
/// Stops before fetching pages when an earlier stage already has errors.
async fn validate_site(
    config: &SiteConfig,
    path: &Path,
    provider: Arc<dyn DataProvider>,
) -> anyhow::Result<ValidationReport> {
    let mut report = validate_config(config, path);
    if !report.is_ok() {
        return Ok(report);
    }

    let slugs = provider.list_slugs().await.context("Failed to list pages")?;
    report.merge(validate_slugs(&slugs));
    if !report.is_ok() {
        return Ok(report);
    }

    let pages = fetch_pages(provider, config.source.concurrency).await?;
    let blocks: usize = pages.iter().map(|page| page.blocks.len()).sum();
    println!("✓ Fetched {} page(s), {} block(s)", pages.len(), blocks);

    let registry = default_registry();
    report.merge(validate_pages(&pages, &registry));
    Ok(report)
}

fn print_report(report: &ValidationReport) {
    for message in &report.errors {
        println!("  ✗ {}", message);
    }
    for message in &report.warnings {
        println!("  ⚠ {}", message);
    }
    for message in &report.info {
        println!("  ℹ {}", message);
    }
}
