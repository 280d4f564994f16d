// Static page generation with Leptos SSR

pub mod blocks;
pub mod components;
pub mod dispatch;
pub mod registry;
pub mod shell;

pub use blocks::{PlaceholderViews, default_registry};
pub use dispatch::{BlockOutcome, DispatchReport, Keyed, dispatch, dispatch_with_report};
pub use registry::{Fallback, RenderError, Renderer, RendererRegistry};
pub use shell::{RenderedPage, ShellOptions, html_escape, render_page};

use acf_press_core::PageRecord;
use chrono::{DateTime, Utc};
use leptos::prelude::AnyView;
use serde::Serialize;

pub const MANIFEST_FILE: &str = "manifest.json";

pub struct GeneratedSite {
    pub pages: Vec<(String, String)>,   // (path, html)
    pub assets: Vec<(String, Vec<u8>)>, // (path, data)
    pub manifest: Manifest,
}

/// Build metadata written next to the generated pages
#[derive(Debug, Clone, Serialize)]
pub struct Manifest {
    pub generated_at: DateTime<Utc>,
    /// How long a consumer may serve these pages before regenerating
    pub revalidate_secs: u64,
    pub pages: Vec<ManifestEntry>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ManifestEntry {
    pub slug: String,
    pub path: String,
    pub title: String,
    pub blocks: usize,
    pub placeholders: usize,
}

/// Render every page and collect the output files.
///
/// Pages keep the order they are given in. Placeholder blocks are logged
/// but never fail the build.
pub fn generate_site(
    pages: &[PageRecord],
    registry: &RendererRegistry<AnyView>,
    options: &ShellOptions,
    revalidate_secs: u64,
) -> serde_json::Result<GeneratedSite> {
    let mut rendered_pages = Vec::with_capacity(pages.len());
    let mut entries = Vec::with_capacity(pages.len());

    for page in pages {
        let rendered = render_page(page, registry, options);
        let path = page.output_path().to_string_lossy().replace('\\', "/");

        for (index, (block, outcome)) in page.blocks.iter().zip(&rendered.outcomes).enumerate() {
            match outcome {
                BlockOutcome::Rendered => {}
                BlockOutcome::Unknown => tracing::warn!(
                    slug = %page.slug,
                    index,
                    type_tag = %block.type_tag,
                    "no renderer registered, using placeholder"
                ),
                BlockOutcome::Failed(err) => tracing::warn!(
                    slug = %page.slug,
                    index,
                    type_tag = %block.type_tag,
                    error = %err,
                    "block failed to render, using error placeholder"
                ),
            }
        }

        entries.push(ManifestEntry {
            slug: page.slug.clone(),
            path: path.clone(),
            title: page.title.clone(),
            blocks: page.blocks.len(),
            placeholders: rendered.placeholder_count(),
        });
        rendered_pages.push((path, rendered.html));
    }

    let manifest = Manifest {
        generated_at: Utc::now(),
        revalidate_secs,
        pages: entries,
    };
    let manifest_json = serde_json::to_vec_pretty(&manifest)?;

    Ok(GeneratedSite {
        pages: rendered_pages,
        assets: vec![(MANIFEST_FILE.to_string(), manifest_json)],
        manifest,
    })
}
