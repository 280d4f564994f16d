use super::site::{load_config, make_provider};
use acf_press_generator::{RendererRegistry, ShellOptions, default_registry, html_escape, render_page};
use acf_press_provider::DataProvider;
use anyhow::{Context, Result};
use axum::{
    Router,
    extract::{Path as UrlPath, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
};
use leptos::prelude::AnyView;
use std::{net::SocketAddr, path::PathBuf, sync::Arc};
use tower_http::{services::ServeDir, trace::TraceLayer};

#[derive(Clone)]
struct AppState {
    provider: Arc<dyn DataProvider>,
    registry: Arc<RendererRegistry<AnyView>>,
    shell: Arc<ShellOptions>,
}

/// Start a preview server that renders every request live from the CMS.
///
/// Nothing is cached: each request fetches the page again, so edits in
/// WordPress show up on reload. Files under the configured assets
/// directory are served at `/assets`.
///
/// # Arguments
///
/// * `path` - Path to site directory containing site.toml
/// * `port` - Port to serve on (default: 8080)
/// * `fixture` - Serve pages from a JSON fixture instead of the endpoint
pub async fn run(path: PathBuf, port: u16, fixture: Option<PathBuf>) -> Result<()> {
    println!("🌐 Starting preview server...");
    println!("   Site: {}", path.display());

    let config = load_config(&path)?;
    println!("   ✓ Loaded: {}", config.site.title);

    let provider = make_provider(&config, &path, fixture.as_deref())?;
    let state = AppState {
        provider,
        registry: Arc::new(default_registry()),
        shell: Arc::new(ShellOptions::from_config(&config).for_preview()),
    };

    let mut app = router(state);
    if let Some(assets) = &config.build.assets {
        app = app.nest_service("/assets", ServeDir::new(path.join(assets)));
    }
    let app = app.layer(TraceLayer::new_for_http());

    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    println!("\n🚀 Preview ready at: http://localhost:{}", port);
    println!("   Press Ctrl+C to stop\n");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to port")?;

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}

fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/{slug}", get(page_handler))
        .route("/{slug}/", get(page_handler))
        .with_state(state)
}

async fn index_handler(State(state): State<AppState>) -> Response {
    render_slug(&state, "").await
}

async fn page_handler(State(state): State<AppState>, UrlPath(slug): UrlPath<String>) -> Response {
    render_slug(&state, &slug).await
}

async fn render_slug(state: &AppState, slug: &str) -> Response {
    match state.provider.fetch_page(slug).await {
        Ok(Some(page)) => {
            let rendered = render_page(&page, &state.registry, &state.shell);
            let placeholders = rendered.placeholder_count();
            if placeholders > 0 {
                tracing::warn!(slug, placeholders, "page rendered with placeholders");
            }
            Html(rendered.html).into_response()
        }
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Html(message_page(
                "Page not found",
                &format!("No page with slug '{}'", slug),
            )),
        )
            .into_response(),
        Err(e) => {
            tracing::error!(slug, error = %e, "failed to fetch page");
            (
                StatusCode::BAD_GATEWAY,
                Html(message_page("CMS request failed", &e.to_string())),
            )
                .into_response()
        }
    }
}

fn message_page(heading: &str, detail: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html><head><title>{heading}</title></head><body>
<h1>{heading}</h1>
<pre>{detail}</pre>
</body></html>"#,
        heading = html_escape(heading),
        detail = html_escape(detail),
    )
}
