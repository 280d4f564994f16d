use leptos::prelude::*;

/// Rich-text block; `body` is rendered HTML from the CMS
#[component]
pub fn Content(body: String) -> impl IntoView {
    view! { <div class="block-content" inner_html=body></div> }
}
