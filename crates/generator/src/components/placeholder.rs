use leptos::prelude::*;

/// Shown in place of a block whose type has no registered renderer
#[component]
pub fn UnknownBlock(type_tag: String) -> impl IntoView {
    view! {
        <div class="block-placeholder block-placeholder--unknown" role="note">
            "Unknown block type: "
            <code>{type_tag}</code>
        </div>
    }
}

/// Shown in place of a block whose renderer rejected its fields
#[component]
pub fn BlockError(type_tag: String, message: String) -> impl IntoView {
    view! {
        <div class="block-placeholder block-placeholder--error" role="alert">
            "Could not render "
            <code>{type_tag}</code>
            " block: "
            {message}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_block_names_tag() {
        let html = view! { <UnknownBlock type_tag="mystery".to_string()/> }.to_html();
        assert!(html.contains("Unknown block type"));
        assert!(html.contains("mystery"));
        assert!(html.contains("block-placeholder--unknown"));
    }

    #[test]
    fn test_block_error_names_tag_and_reason() {
        let html = view! {
            <BlockError type_tag="header".to_string() message="missing field 'title'".to_string()/>
        }
        .to_html();
        assert!(html.contains("block-placeholder--error"));
        assert!(html.contains("header"));
        assert!(html.contains("missing field"));
    }
}
