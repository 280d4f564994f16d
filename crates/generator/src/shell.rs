use crate::dispatch::{BlockOutcome, DispatchReport, dispatch_with_report};
use crate::registry::RendererRegistry;
use acf_press_core::{PageRecord, SiteConfig};
use leptos::prelude::*;

/// Minimal stylesheet embedded in every page
const STYLESHEET: &str = r#"
* { margin: 0; padding: 0; box-sizing: border-box; }
body { font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, sans-serif; line-height: 1.6; color: #222; }
.page { max-width: 960px; margin: 0 auto; padding: 2rem; }
.page-title { font-size: 2.5rem; margin-bottom: 1rem; }
.page-content, .block { margin-bottom: 1.5rem; }
.banner { display: flex; gap: 1.5rem; align-items: center; padding: 2rem; border-radius: 6px; }
.banner--primary { background: #1a1a1f; color: #f5f5f5; }
.banner--secondary { background: #f3f3f6; }
.banner__image { max-width: 40%; border-radius: 4px; }
.banner__cta { display: inline-block; margin-top: 1rem; padding: 0.5rem 1rem; background: #00cc66; color: #000; border-radius: 4px; text-decoration: none; }
.block-footer { border-top: 1px solid #ddd; padding-top: 1rem; color: #666; font-size: 0.9rem; }
.block-footer__nav ul { display: flex; gap: 1rem; list-style: none; }
.block-placeholder { padding: 1rem; border: 2px dashed #d33; color: #a00; background: #fff4f4; }
.preview-badge { background: #00cc66; color: #000; padding: 0.5rem 1rem; font-weight: bold; text-align: center; }
"#;

/// Page chrome shared by every generated page
#[derive(Debug, Clone)]
pub struct ShellOptions {
    pub site_title: String,
    pub lang: String,
    /// Adds a preview banner; used by the local preview server
    pub preview: bool,
}

impl ShellOptions {
    pub fn from_config(config: &SiteConfig) -> Self {
        Self {
            site_title: config.site.title.clone(),
            lang: config.site.lang.clone(),
            preview: false,
        }
    }

    pub fn for_preview(mut self) -> Self {
        self.preview = true;
        self
    }
}

/// A fully rendered HTML document and how each of its blocks was resolved
#[derive(Debug, Clone)]
pub struct RenderedPage {
    pub html: String,
    pub outcomes: Vec<BlockOutcome>,
}

impl RenderedPage {
    pub fn placeholder_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_placeholder()).count()
    }
}

/// HTML-escape a string to prevent XSS attacks
///
/// Escapes: & < > " '
pub fn html_escape(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Render one page: title, CMS body, then its blocks in order.
///
/// Every block is wrapped in an element carrying `data-block-key` (its
/// position) and `data-block-type`.
pub fn render_page(
    page: &PageRecord,
    registry: &RendererRegistry<AnyView>,
    options: &ShellOptions,
) -> RenderedPage {
    let DispatchReport { views, outcomes } = dispatch_with_report(registry, &page.blocks);

    let title = page.title.clone();
    let content = page.content.clone();
    let body = view! {
        <main class="page">
            <h1 class="page-title">{title}</h1>
            {(!content.trim().is_empty())
                .then(|| view! { <div class="page-content" inner_html=content></div> })}
            <div class="blocks">
                {views
                    .into_iter()
                    .map(|keyed| {
                        view! {
                            <div
                                class="block"
                                data-block-key=keyed.key.to_string()
                                data-block-type=keyed.type_tag
                            >
                                {keyed.view}
                            </div>
                        }
                    })
                    .collect_view()}
            </div>
        </main>
    }
    .to_html();

    let document_title = if page.title.trim().is_empty() {
        html_escape(&options.site_title)
    } else {
        format!(
            "{} | {}",
            html_escape(&page.title),
            html_escape(&options.site_title)
        )
    };

    let badge = if options.preview {
        r#"<div class="preview-badge">PREVIEW - rendered live from the CMS</div>"#
    } else {
        ""
    };

    let html = format!(
        r#"<!DOCTYPE html>
<html lang="{}">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{}</title>
    <style>{}</style>
</head>
<body>
{}{}
</body>
</html>
"#,
        html_escape(&options.lang),
        document_title,
        STYLESHEET,
        badge,
        body
    );

    RenderedPage { html, outcomes }
}
