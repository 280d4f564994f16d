use acf_press_core::{CONFIG_FILE, config::parse_site_toml_str};
use acf_press_provider::queries::PAGE_BY_SLUG;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

const QUERY_FILE: &str = "queries/page.graphql";
const FIXTURE_FILE: &str = "fixtures/pages.json";
const ASSETS_DIR: &str = "assets";

/// Sample content for offline builds: one page per built-in block type,
/// plus a block no renderer knows about.
const SAMPLE_FIXTURE: &str = r#"{
  "pages": [
    {
      "slug": "",
      "title": "Home",
      "blocks": [
        { "__typename": "acf/header", "title": "Welcome", "subtitle": "Built from ACF blocks" },
        {
          "__typename": "acf/primary-banner",
          "heading": "Start here",
          "text": "A banner with a call to action.",
          "image_url": "/assets/banner.jpg",
          "cta_label": "Read more",
          "cta_url": "/about"
        },
        { "__typename": "acf/content", "body": "<p>Rich text from the editor.</p>" },
        { "__typename": "acf/testimonial", "quote": "No renderer yet" },
        {
          "__typename": "acf/footer",
          "text": "Copyright",
          "links": [ { "label": "About", "url": "/about" } ]
        }
      ]
    },
    {
      "slug": "about",
      "title": "About",
      "content": "<p>Classic editor content still renders above the blocks.</p>",
      "blocks": [
        { "__typename": "acf/secondary-banner", "heading": "About us", "text": "Who we are." }
      ]
    }
  ]
}
"#;

/// Escape a string for a TOML basic string
fn toml_escape_string(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\x08', "\\b")
        .replace('\x0C', "\\f")
        .replace('\n', "\\n")
        .replace('\r', "\\r")
        .replace('\t', "\\t")
}

/// Title used when none is given: the site directory's name
fn default_title(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().replace(['-', '_'], " "))
        .filter(|name| !name.trim().is_empty())
        .unwrap_or_else(|| "My Site".to_string())
}

/// Initialize a new site directory.
///
/// Creates the directory if needed and writes:
/// - site.toml pointing at `endpoint`
/// - queries/page.graphql, a copy of the built-in page query to customize
/// - fixtures/pages.json, sample pages for `--fixture` builds
/// - assets/, copied into the output on build
///
/// Refuses to touch an existing site.toml unless `force` is set.
pub async fn run(path: PathBuf, endpoint: String, title: Option<String>, force: bool) -> Result<()> {
    println!("Initializing site directory: {}", path.display());

    let config_path = path.join(CONFIG_FILE);
    if config_path.exists() && !force {
        anyhow::bail!(
            "{} already exists at {}\nHint: Use --force to overwrite it",
            CONFIG_FILE,
            config_path.display()
        );
    }

    let title = title.unwrap_or_else(|| default_title(&path));

    create_directory_structure(&path)?;
    generate_site_toml(&path, &title, &endpoint)?;
    write_if_missing(&path.join(QUERY_FILE), PAGE_BY_SLUG.trim_start())?;
    write_if_missing(&path.join(FIXTURE_FILE), SAMPLE_FIXTURE)?;

    println!("\n✓ Initialization complete!");
    println!("\nGenerated structure:");
    println!("  {}/", path.display());
    println!("  ├── site.toml            ← Endpoint, title, build options");
    println!("  ├── queries/");
    println!("  │   └── page.graphql     ← Page query sent to WordPress");
    println!("  ├── fixtures/");
    println!("  │   └── pages.json       ← Sample pages for offline builds");
    println!("  └── assets/              ← Copied to the output as-is");

    println!("\nNext steps:");
    println!("  1. Edit site.toml (endpoint, title)");
    println!(
        "  2. Try it offline: acf-press build {} -o dist --fixture {}",
        path.display(),
        path.join(FIXTURE_FILE).display()
    );
    println!("  3. Preview against the CMS: acf-press preview {}", path.display());

    Ok(())
}

fn create_directory_structure(base: &Path) -> Result<()> {
    fs::create_dir_all(base.join("queries"))?;
    fs::create_dir_all(base.join("fixtures"))?;
    fs::create_dir_all(base.join(ASSETS_DIR))?;
    Ok(())
}

fn write_if_missing(path: &Path, content: &str) -> Result<()> {
    if path.exists() {
        println!("  ↷ Keeping existing {}", path.display());
        return Ok(());
    }
    fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))
}

fn generate_site_toml(base: &Path, title: &str, endpoint: &str) -> Result<()> {
    let title = toml_escape_string(title);
    let endpoint = toml_escape_string(endpoint);

    let toml = format!(
        "# Generated by acf-press init\n\
\n\
[site]\n\
title = \"{title}\"\n\
lang = \"en\"\n\
\n\
[source]\n\
endpoint = \"{endpoint}\"\n\
namespace = \"acf\"\n\
# token_env = \"WP_AUTH_TOKEN\"  # Sent as a bearer token when set\n\
timeout_secs = 30\n\
concurrency = 4\n\
page_query = \"{QUERY_FILE}\"\n\
\n\
[build]\n\
revalidate_secs = 60\n\
assets = \"{ASSETS_DIR}\"\n"
    );

    parse_site_toml_str(&toml).context("Generated site.toml is invalid")?;

    fs::write(base.join(CONFIG_FILE), toml)?;

    Ok(())
}
