use super::Link;
use leptos::prelude::*;

#[component]
pub fn Footer(text: Option<String>, links: Vec<Link>) -> impl IntoView {
    view! {
        <footer class="block-footer">
            {(!links.is_empty())
                .then(|| {
                    view! {
                        <nav class="block-footer__nav">
                            <ul>
                                {links
                                    .into_iter()
                                    .map(|link| view! { <li><a href=link.url>{link.label}</a></li> })
                                    .collect_view()}
                            </ul>
                        </nav>
                    }
                })}
            {text.map(|text| view! { <p class="block-footer__text">{text}</p> })}
        </footer>
    }
}
