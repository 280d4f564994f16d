// Content and configuration checks run before a build

use acf_press_core::{PageRecord, SiteConfig, is_safe_slug};
use acf_press_generator::{BlockOutcome, RendererRegistry, dispatch_with_report};
use std::collections::HashMap;
use std::path::Path;

#[derive(Debug, Default)]
pub struct ValidationReport {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub info: Vec<String>,
}

impl ValidationReport {
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn merge(&mut self, other: ValidationReport) {
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
        self.info.extend(other.info);
    }
}

fn page_label(slug: &str) -> String {
    if slug.is_empty() {
        "/ (front page)".to_string()
    } else {
        format!("/{}", slug)
    }
}

/// Check files referenced by site.toml relative to `site_dir`
pub fn validate_config(config: &SiteConfig, site_dir: &Path) -> ValidationReport {
    let mut report = ValidationReport::default();

    if let Some(query) = &config.source.page_query {
        let path = site_dir.join(query);
        if !path.is_file() {
            report
                .errors
                .push(format!("source.page_query not found: {}", path.display()));
        }
    }

    if let Some(assets) = &config.build.assets {
        let path = site_dir.join(assets);
        if !path.is_dir() {
            report
                .warnings
                .push(format!("build.assets directory not found: {}", path.display()));
        }
    }

    if let Some(var) = &config.source.token_env
        && config.source.token().is_none()
    {
        report.warnings.push(format!(
            "source.token_env is set but ${} is empty; requests will be anonymous",
            var
        ));
    }

    report
}

/// Check the slugs a provider lists, before any page is fetched.
///
/// Duplicates are errors because two pages would claim the same output path.
/// Slugs that are not a single path segment are errors because their output
/// would land outside the build directory.
pub fn validate_slugs(slugs: &[String]) -> ValidationReport {
    let mut report = ValidationReport::default();
    let mut slug_counts: HashMap<&str, usize> = HashMap::new();

    for slug in slugs {
        *slug_counts.entry(slug.as_str()).or_default() += 1;
        if !is_safe_slug(slug) {
            report
                .errors
                .push(format!("/{}: slug is not a single path segment", slug));
        }
    }

    let mut duplicates: Vec<&str> = slug_counts
        .into_iter()
        .filter(|(_, count)| *count > 1)
        .map(|(slug, _)| slug)
        .collect();
    duplicates.sort_unstable();
    for slug in duplicates {
        report
            .errors
            .push(format!("{}: slug appears more than once", page_label(slug)));
    }

    report
}

/// Dispatch every page's blocks and report anything that would render as a placeholder.
///
/// Unknown tags and renderer failures are warnings; the build still succeeds.
pub fn validate_pages<V>(pages: &[PageRecord], registry: &RendererRegistry<V>) -> ValidationReport {
    let mut report = ValidationReport::default();
    let mut unknown_tags: HashMap<&str, usize> = HashMap::new();

    for page in pages {
        let label = page_label(&page.slug);

        if page.blocks.is_empty() {
            report.info.push(format!("{}: page has no blocks", label));
            continue;
        }

        let outcomes = dispatch_with_report(registry, &page.blocks).outcomes;
        for (index, (block, outcome)) in page.blocks.iter().zip(outcomes).enumerate() {
            match outcome {
                BlockOutcome::Rendered => {}
                BlockOutcome::Unknown => {
                    *unknown_tags.entry(block.type_tag.as_str()).or_default() += 1;
                    report.warnings.push(format!(
                        "{}: block {} has unknown type '{}'",
                        label, index, block.type_tag
                    ));
                }
                BlockOutcome::Failed(err) => report.warnings.push(format!(
                    "{}: block {} ('{}') cannot render: {}",
                    label, index, block.type_tag, err
                )),
            }
        }
    }

    if !unknown_tags.is_empty() {
        let mut tags: Vec<_> = unknown_tags.into_iter().collect();
        tags.sort_unstable();
        let summary: Vec<String> = tags
            .into_iter()
            .map(|(tag, count)| format!("{} ({})", tag, count))
            .collect();
        report
            .info
            .push(format!("unregistered block types: {}", summary.join(", ")));
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use acf_press_core::config::parse_site_toml_str;
    use acf_press_core::{BlockRecord, Fields};
    use acf_press_generator::{Fallback, RenderError};

    struct Unit;

    impl Fallback<()> for Unit {
        fn unknown(&self, _type_tag: &str) {}
        fn failed(&self, _type_tag: &str, _error: &RenderError) {}
    }

    fn registry() -> RendererRegistry<()> {
        let mut registry: RendererRegistry<()> = RendererRegistry::new(Unit);
        registry.register("header", |fields: &Fields| {
            fields.required_str("title")?;
            Ok(())
        });
        registry
    }

    fn page(slug: &str, blocks: Vec<BlockRecord>) -> PageRecord {
        PageRecord {
            slug: slug.to_string(),
            title: slug.to_string(),
            content: String::new(),
            blocks,
        }
    }

    #[test]
    fn test_clean_pages() {
        let pages = vec![page(
            "home",
            vec![BlockRecord::new("header", Fields::new().with("title", "Hi"))],
        )];
        let report = validate_pages(&pages, &registry());
        assert!(report.is_ok());
        assert!(report.warnings.is_empty());
        assert!(report.info.is_empty());
    }

    #[test]
    fn test_unknown_and_failed_blocks_are_warnings() {
        let pages = vec![page(
            "about",
            vec![
                BlockRecord::new("carousel", Fields::new()),
                BlockRecord::new("header", Fields::new()),
                BlockRecord::new("carousel", Fields::new()),
            ],
        )];
        let report = validate_pages(&pages, &registry());

        assert!(report.is_ok());
        assert_eq!(report.warnings.len(), 3);
        assert!(report.warnings[0].contains("/about: block 0 has unknown type 'carousel'"));
        assert!(report.warnings[1].contains("missing field 'title'"));
        assert_eq!(report.info, vec!["unregistered block types: carousel (2)"]);
    }

    #[test]
    fn test_pages_without_blocks_are_info() {
        let pages = vec![page("", vec![]), page("a", vec![])];
        let report = validate_pages(&pages, &registry());
        assert!(report.is_ok());
        assert_eq!(report.info, vec!["/ (front page): page has no blocks", "/a: page has no blocks"]);
    }

    #[test]
    fn test_duplicate_slugs_are_errors() {
        let slugs: Vec<String> = ["", "a", "", "b", "a"].iter().map(|s| s.to_string()).collect();
        let report = validate_slugs(&slugs);
        assert!(!report.is_ok());
        assert_eq!(
            report.errors,
            vec![
                "/ (front page): slug appears more than once",
                "/a: slug appears more than once"
            ]
        );
    }

    #[test]
    fn test_unsafe_slugs_are_errors() {
        let slugs = vec!["ok".to_string(), "..".to_string()];
        let report = validate_slugs(&slugs);
        assert_eq!(report.errors, vec!["/..: slug is not a single path segment"]);
    }

    #[test]
    fn test_validate_config_missing_files() {
        let dir = tempfile::tempdir().unwrap();
        let config = parse_site_toml_str(
            r#"
[site]
title = "S"

[source]
endpoint = "https://example.com/graphql"
page_query = "queries/page.graphql"

[build]
assets = "static"
"#,
        )
        .unwrap();

        let report = validate_config(&config, dir.path());
        assert_eq!(report.errors.len(), 1);
        assert!(report.errors[0].contains("source.page_query"));
        assert_eq!(report.warnings.len(), 1);
        assert!(report.warnings[0].contains("build.assets"));

        std::fs::create_dir_all(dir.path().join("queries")).unwrap();
        std::fs::write(dir.path().join("queries/page.graphql"), "query {}").unwrap();
        std::fs::create_dir_all(dir.path().join("static")).unwrap();
        let report = validate_config(&config, dir.path());
        assert!(report.is_ok());
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn test_merge_reports() {
        let mut a = ValidationReport {
            errors: vec!["e".into()],
            ..Default::default()
        };
        a.merge(ValidationReport {
            warnings: vec!["w".into()],
            info: vec!["i".into()],
            ..Default::default()
        });
        assert_eq!(a.errors.len(), 1);
        assert_eq!(a.warnings.len(), 1);
        assert_eq!(a.info.len(), 1);
    }
}
