use leptos::prelude::*;

#[component]
pub fn Header(title: String, subtitle: Option<String>) -> impl IntoView {
    view! {
        <header class="block-header">
            <h2 class="block-header__title">{title}</h2>
            {subtitle.map(|subtitle| view! { <p class="block-header__subtitle">{subtitle}</p> })}
        </header>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_renders_title_and_subtitle() {
        let html = view! { <Header title="Welcome".to_string() subtitle=Some("Glad you came".to_string())/> }
            .to_html();
        assert!(html.contains("block-header"));
        assert!(html.contains("Welcome"));
        assert!(html.contains("Glad you came"));
    }

    #[test]
    fn test_header_without_subtitle() {
        let html = view! { <Header title="Solo".to_string() subtitle=None/> }.to_html();
        assert!(html.contains("Solo"));
        assert!(!html.contains("block-header__subtitle"));
    }

    #[test]
    fn test_header_escapes_text() {
        let html = view! { <Header title="<script>alert(1)</script>".to_string() subtitle=None/> }
            .to_html();
        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("<script>alert"));
    }
}
