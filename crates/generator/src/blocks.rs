use crate::components::{
    BlockError, Content, Footer, Header, Link, PrimaryBanner, SecondaryBanner, UnknownBlock,
};
use crate::registry::{Fallback, RenderError, RendererRegistry};
use acf_press_core::Fields;
use leptos::prelude::*;

pub const HEADER: &str = "header";
pub const PRIMARY_BANNER: &str = "primary-banner";
pub const SECONDARY_BANNER: &str = "secondary-banner";
pub const CONTENT: &str = "content";
pub const FOOTER: &str = "footer";

/// Placeholder views for unknown tags and failed renders
#[derive(Debug, Clone, Copy, Default)]
pub struct PlaceholderViews;

impl Fallback<AnyView> for PlaceholderViews {
    fn unknown(&self, type_tag: &str) -> AnyView {
        let type_tag = type_tag.to_string();
        view! { <UnknownBlock type_tag=type_tag/> }.into_any()
    }

    fn failed(&self, type_tag: &str, error: &RenderError) -> AnyView {
        let type_tag = type_tag.to_string();
        let message = error.to_string();
        view! { <BlockError type_tag=type_tag message=message/> }.into_any()
    }
}

/// Registry with renderers for every built-in block type
pub fn default_registry() -> RendererRegistry<AnyView> {
    let mut registry = RendererRegistry::new(PlaceholderViews);
    registry
        .register(HEADER, render_header)
        .register(PRIMARY_BANNER, render_primary_banner)
        .register(SECONDARY_BANNER, render_secondary_banner)
        .register(CONTENT, render_content)
        .register(FOOTER, render_footer);
    registry
}

fn owned(value: Option<&str>) -> Option<String> {
    value.map(str::to_string)
}

/// A link needs both halves; either one missing drops the link
fn link(fields: &Fields, label_key: &str, url_key: &str) -> Option<Link> {
    Some(Link {
        label: fields.str(label_key)?.to_string(),
        url: fields.str(url_key)?.to_string(),
    })
}

fn render_header(fields: &Fields) -> Result<AnyView, RenderError> {
    let title = fields.required_str("title")?.to_string();
    let subtitle = owned(fields.str("subtitle"));
    Ok(view! { <Header title=title subtitle=subtitle/> }.into_any())
}

fn render_primary_banner(fields: &Fields) -> Result<AnyView, RenderError> {
    let heading = fields.required_str("heading")?.to_string();
    let text = owned(fields.str("text"));
    let image_url = owned(fields.str("image_url"));
    let cta = link(fields, "cta_label", "cta_url");
    Ok(view! { <PrimaryBanner heading=heading text=text image_url=image_url cta=cta/> }.into_any())
}

fn render_secondary_banner(fields: &Fields) -> Result<AnyView, RenderError> {
    let heading = fields.required_str("heading")?.to_string();
    let text = owned(fields.str("text"));
    let image_url = owned(fields.str("image_url"));
    Ok(view! { <SecondaryBanner heading=heading text=text image_url=image_url/> }.into_any())
}

fn render_content(fields: &Fields) -> Result<AnyView, RenderError> {
    let body = fields.required_str("body")?.to_string();
    Ok(view! { <Content body=body/> }.into_any())
}

fn render_footer(fields: &Fields) -> Result<AnyView, RenderError> {
    let text = owned(fields.str("text"));
    let links: Vec<Link> = fields
        .objects("links")?
        .iter()
        .filter_map(|entry| link(entry, "label", "url"))
        .collect();
    Ok(view! { <Footer text=text links=links/> }.into_any())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::{BlockOutcome, dispatch, dispatch_with_report};
    use acf_press_core::BlockRecord;
    use serde_json::json;

    fn html(view: AnyView) -> String {
        view.to_html()
    }

    #[test]
    fn test_default_registry_tags() {
        let registry = default_registry();
        assert_eq!(
            registry.tags(),
            vec![CONTENT, FOOTER, HEADER, PRIMARY_BANNER, SECONDARY_BANNER]
        );
    }

    #[test]
    fn test_header_footer_and_unknown() {
        let registry = default_registry();
        let blocks = vec![
            BlockRecord::new(HEADER, Fields::new().with("title", "Welcome")),
            BlockRecord::new("mystery", Fields::new()),
            BlockRecord::new(FOOTER, Fields::new()),
        ];

        let rendered: Vec<String> = dispatch(&registry, &blocks)
            .into_iter()
            .map(|keyed| html(keyed.view))
            .collect();

        assert_eq!(rendered.len(), 3);
        assert!(rendered[0].contains("block-header") && rendered[0].contains("Welcome"));
        assert!(rendered[1].contains("Unknown block type") && rendered[1].contains("mystery"));
        assert!(rendered[2].contains("block-footer"));
    }

    #[test]
    fn test_missing_required_field_renders_error_placeholder() {
        let registry = default_registry();
        let blocks = vec![
            BlockRecord::new(PRIMARY_BANNER, Fields::new().with("text", "no heading")),
            BlockRecord::new(CONTENT, Fields::new().with("body", "<p>still here</p>")),
        ];

        let report = dispatch_with_report(&registry, &blocks);
        assert!(matches!(report.outcomes[0], BlockOutcome::Failed(_)));
        assert_eq!(report.outcomes[1], BlockOutcome::Rendered);

        let rendered: Vec<String> = report.views.into_iter().map(|k| html(k.view)).collect();
        assert!(rendered[0].contains("block-placeholder--error"));
        assert!(rendered[0].contains("heading"));
        assert!(rendered[1].contains("<p>still here</p>"));
    }

    #[test]
    fn test_primary_banner_from_fields() {
        let fields: Fields = serde_json::from_value(json!({
            "heading": "Launch",
            "text": "It's here",
            "image_url": "https://cdn.example.com/hero.png",
            "cta_label": "Buy",
            "cta_url": "https://example.com/buy"
        }))
        .unwrap();

        let view = default_registry().get(PRIMARY_BANNER).unwrap()(&fields).unwrap();
        let html = html(view);
        assert!(html.contains("Launch"));
        assert!(html.contains("https://cdn.example.com/hero.png"));
        assert!(html.contains("https://example.com/buy"));
    }

    #[test]
    fn test_banner_cta_requires_both_parts() {
        let fields = Fields::new().with("heading", "Half").with("cta_label", "Click");
        assert!(link(&fields, "cta_label", "cta_url").is_none());

        let view = default_registry().get(PRIMARY_BANNER).unwrap()(&fields).unwrap();
        assert!(!html(view).contains("banner__cta"));
    }

    #[test]
    fn test_footer_links_from_repeater() {
        let fields: Fields = serde_json::from_value(json!({
            "text": "Fine print",
            "links": [
                { "label": "Privacy", "url": "/privacy" },
                { "label": "No url" },
                { "label": "Terms", "url": "/terms" }
            ]
        }))
        .unwrap();

        let view = default_registry().get(FOOTER).unwrap()(&fields).unwrap();
        let html = html(view);
        assert!(html.contains("/privacy"));
        assert!(html.contains("/terms"));
        assert!(!html.contains("No url"));
        assert!(html.contains("Fine print"));
    }

    #[test]
    fn test_footer_rejects_non_list_links() {
        let fields = Fields::new().with("links", "oops");
        let result = default_registry().get(FOOTER).unwrap()(&fields);
        assert!(result.is_err());
    }
}
