use super::site::{fetch_pages, load_config, make_provider};
use acf_press_generator::{MANIFEST_FILE, ShellOptions, default_registry, generate_site};
use anyhow::{Context, Result};
use std::fs;
use std::path::{Component, Path, PathBuf};
use walkdir::WalkDir;

/// Output directory that receives the site's static assets
const ASSETS_OUT: &str = "assets";

#[derive(Debug, Default, PartialEq, Eq)]
pub struct BuildSummary {
    pub pages: usize,
    pub placeholders: usize,
    pub assets: usize,
}

/// Build static site for deployment
pub async fn run(path: PathBuf, output: PathBuf, fixture: Option<PathBuf>) -> Result<()> {
    println!("🔨 Building static site...");
    println!("   Source: {}", path.display());
    println!("   Output: {}", output.display());
    println!();

    let summary = build_static_site(&path, &output, fixture.as_deref()).await?;

    println!();
    println!("✅ Build complete!");
    println!("   Pages: {}", summary.pages);
    if summary.placeholders > 0 {
        println!(
            "   ⚠ {} block(s) rendered as placeholders (run 'acf-press validate {}' for details)",
            summary.placeholders,
            path.display()
        );
    }
    println!("   Output: {}", output.display());
    println!();
    println!("To test locally:");
    println!("   cd {} && python3 -m http.server 8000", output.display());
    println!();

    Ok(())
}

pub async fn build_static_site(
    path: &Path,
    output: &Path,
    fixture: Option<&Path>,
) -> Result<BuildSummary> {
    let config = load_config(path)?;
    println!("✓ Loaded: {}", config.site.title);

    let provider = make_provider(&config, path, fixture)?;
    println!("📡 Fetching pages...");
    let pages = fetch_pages(provider, config.source.concurrency).await?;
    println!("   ✓ Fetched {} page(s)", pages.len());

    println!("📄 Rendering pages...");
    let registry = default_registry();
    let options = ShellOptions::from_config(&config);
    let site = generate_site(&pages, &registry, &options, config.build.revalidate_secs)
        .context("Failed to serialize build manifest")?;

    fs::create_dir_all(output).context("Failed to create output directory")?;

    for (page_path, html) in &site.pages {
        write_output(output, page_path, html.as_bytes())?;
        tracing::debug!(path = %page_path, "wrote page");
    }
    println!("   ✓ Generated {} page(s)", site.pages.len());

    for (asset_path, data) in &site.assets {
        write_output(output, asset_path, data)?;
    }
    println!("   ✓ Wrote {}", MANIFEST_FILE);

    let mut copied_assets = 0;
    if let Some(assets) = &config.build.assets {
        println!("🎨 Copying assets...");
        let src = path.join(assets);
        if src.is_dir() {
            copied_assets = copy_dir(&src, &output.join(ASSETS_OUT))?;
            println!("   ✓ Copied {} asset file(s)", copied_assets);
        } else {
            eprintln!("   ⚠ Warning: Assets directory not found: {}", src.display());
        }
    }

    Ok(BuildSummary {
        pages: site.pages.len(),
        placeholders: site.manifest.pages.iter().map(|p| p.placeholders).sum(),
        assets: copied_assets,
    })
}

fn write_output(output: &Path, relative: &str, data: &[u8]) -> Result<()> {
    let inside = Path::new(relative)
        .components()
        .all(|c| matches!(c, Component::Normal(_)));
    if !inside {
        anyhow::bail!("Refusing to write {} outside {}", relative, output.display());
    }

    let dest = output.join(relative);
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    fs::write(&dest, data).with_context(|| format!("Failed to write {}", dest.display()))
}

/// Recursively copy regular files, skipping hidden entries
fn copy_dir(src: &Path, dst: &Path) -> Result<usize> {
    let mut copied = 0;

    let entries = WalkDir::new(src)
        .follow_links(true)
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !e.file_name().to_string_lossy().starts_with('.'));

    for entry in entries {
        let entry = entry.with_context(|| format!("Failed to read {}", src.display()))?;
        if !entry.file_type().is_file() {
            continue;
        }

        let relative = entry
            .path()
            .strip_prefix(src)
            .context("Asset outside of assets directory")?;
        let dest = dst.join(relative);
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::copy(entry.path(), &dest)
            .with_context(|| format!("Failed to copy {}", entry.path().display()))?;
        copied += 1;
    }

    Ok(copied)
}
