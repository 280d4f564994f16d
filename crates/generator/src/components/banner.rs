use super::Link;
use leptos::prelude::*;

/// Full-width hero banner with an optional call to action
#[component]
pub fn PrimaryBanner(
    heading: String,
    text: Option<String>,
    image_url: Option<String>,
    cta: Option<Link>,
) -> impl IntoView {
    view! {
        <section class="banner banner--primary">
            {image_url.map(|src| view! { <img class="banner__image" src=src alt=""/> })}
            <div class="banner__body">
                <h2 class="banner__heading">{heading}</h2>
                {text.map(|text| view! { <p class="banner__text">{text}</p> })}
                {cta.map(|cta| view! { <a class="banner__cta" href=cta.url>{cta.label}</a> })}
            </div>
        </section>
    }
}

#[component]
pub fn SecondaryBanner(
    heading: String,
    text: Option<String>,
    image_url: Option<String>,
) -> impl IntoView {
    view! {
        <section class="banner banner--secondary">
            <div class="banner__body">
                <h3 class="banner__heading">{heading}</h3>
                {text.map(|text| view! { <p class="banner__text">{text}</p> })}
            </div>
            {image_url.map(|src| view! { <img class="banner__image" src=src alt=""/> })}
        </section>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primary_banner_full() {
        let cta = Link {
            label: "Get started".to_string(),
            url: "/start".to_string(),
        };
        let html = view! {
            <PrimaryBanner
                heading="Big news".to_string()
                text=Some("Read all about it".to_string())
                image_url=Some("/img/hero.jpg".to_string())
                cta=Some(cta)
            />
        }
        .to_html();

        assert!(html.contains("banner--primary"));
        assert!(html.contains("Big news"));
        assert!(html.contains("Read all about it"));
        assert!(html.contains("/img/hero.jpg"));
        assert!(html.contains("href=\"/start\""));
        assert!(html.contains("Get started"));
    }

    #[test]
    fn test_primary_banner_minimal() {
        let html = view! {
            <PrimaryBanner heading="Only a heading".to_string() text=None image_url=None cta=None/>
        }
        .to_html();

        assert!(html.contains("Only a heading"));
        assert!(!html.contains("banner__cta"));
        assert!(!html.contains("<img"));
    }

    #[test]
    fn test_secondary_banner() {
        let html = view! {
            <SecondaryBanner heading="Aside".to_string() text=Some("More".to_string()) image_url=None/>
        }
        .to_html();

        assert!(html.contains("banner--secondary"));
        assert!(html.contains("Aside"));
        assert!(html.contains("More"));
    }
}
