use crate::error::{Error, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

/// Name of the configuration file at the root of a site directory
pub const CONFIG_FILE: &str = "site.toml";

const DEFAULT_LANG: &str = "en";
const DEFAULT_NAMESPACE: &str = "acf";
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_CONCURRENCY: usize = 4;
const DEFAULT_REVALIDATE_SECS: u64 = 60;

/// Complete site configuration
#[derive(Debug, Clone)]
pub struct SiteConfig {
    pub site: SiteMetadata,
    pub source: SourceConfig,
    pub build: BuildConfig,
}

#[derive(Debug, Clone)]
pub struct SiteMetadata {
    pub title: String,
    pub lang: String,
}

/// Where pages come from
#[derive(Debug, Clone)]
pub struct SourceConfig {
    pub endpoint: Url,
    /// Block type namespace stripped from `__typename` (e.g. `acf/header` -> `header`)
    pub namespace: String,
    /// Environment variable holding a bearer token, if the endpoint needs one
    pub token_env: Option<String>,
    pub timeout: Duration,
    /// Maximum page fetches in flight during a build
    pub concurrency: usize,
    /// Replacement for the built-in page query, relative to the site directory
    pub page_query: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct BuildConfig {
    /// Revalidation interval recorded in the build manifest
    pub revalidate_secs: u64,
    /// Static assets directory copied verbatim into the output
    pub assets: Option<PathBuf>,
}

impl SourceConfig {
    /// Read the bearer token from the configured environment variable
    pub fn token(&self) -> Option<String> {
        self.token_env
            .as_deref()
            .and_then(|name| std::env::var(name).ok())
            .filter(|token| !token.trim().is_empty())
    }
}

/// Raw TOML configuration structure
/// This matches the site.toml file structure exactly
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    site: RawSite,
    source: RawSource,
    #[serde(default)]
    build: RawBuild,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawSite {
    title: String,
    lang: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawSource {
    endpoint: String,
    namespace: Option<String>,
    token_env: Option<String>,
    timeout_secs: Option<u64>,
    concurrency: Option<usize>,
    page_query: Option<String>, // Convert to PathBuf
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawBuild {
    revalidate_secs: Option<u64>,
    assets: Option<String>, // Convert to PathBuf
}

/// Parse site.toml from a file path
pub fn parse_site_toml<P: AsRef<Path>>(path: P) -> Result<SiteConfig> {
    let content = fs::read_to_string(path)?;
    parse_site_toml_str(&content)
}

/// Parse site.toml from a string (useful for testing)
pub fn parse_site_toml_str(content: &str) -> Result<SiteConfig> {
    let raw: RawConfig = toml::from_str(content)?;

    if raw.site.title.trim().is_empty() {
        return Err(Error::ConfigParse("site.title must not be empty".to_string()));
    }

    let endpoint = parse_endpoint(&raw.source.endpoint)?;

    let namespace = raw
        .source
        .namespace
        .unwrap_or_else(|| DEFAULT_NAMESPACE.to_string());
    if namespace.contains('/') {
        return Err(Error::ConfigParse(format!(
            "source.namespace must not contain '/': '{}'",
            namespace
        )));
    }

    let timeout_secs = raw.source.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS);
    if timeout_secs == 0 {
        return Err(Error::ConfigParse(
            "source.timeout_secs must be at least 1".to_string(),
        ));
    }

    let concurrency = raw.source.concurrency.unwrap_or(DEFAULT_CONCURRENCY);
    if concurrency == 0 {
        return Err(Error::ConfigParse(
            "source.concurrency must be at least 1".to_string(),
        ));
    }

    let page_query = match raw.source.page_query {
        Some(path) => Some(validate_path(&path, "source.page_query")?),
        None => None,
    };

    let assets = match raw.build.assets {
        Some(path) => Some(validate_path(&path, "build.assets")?),
        None => None,
    };

    Ok(SiteConfig {
        site: SiteMetadata {
            title: raw.site.title,
            lang: raw.site.lang.unwrap_or_else(|| DEFAULT_LANG.to_string()),
        },
        source: SourceConfig {
            endpoint,
            namespace,
            token_env: raw.source.token_env,
            timeout: Duration::from_secs(timeout_secs),
            concurrency,
            page_query,
        },
        build: BuildConfig {
            revalidate_secs: raw.build.revalidate_secs.unwrap_or(DEFAULT_REVALIDATE_SECS),
            assets,
        },
    })
}

/// The GraphQL endpoint must be an absolute http(s) URL
fn parse_endpoint(endpoint: &str) -> Result<Url> {
    let url = Url::parse(endpoint)
        .map_err(|e| Error::ConfigParse(format!("Invalid source.endpoint '{}': {}", endpoint, e)))?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(Error::ConfigParse(format!(
            "source.endpoint must use http or https, got '{}'",
            other
        ))),
    }
}

/// Validate and convert a path string to PathBuf.
///
/// Rejects absolute paths and parent directory references (`..`) so a
/// site.toml cannot point outside its own directory.
fn validate_path(path_str: &str, field_name: &str) -> Result<PathBuf> {
    if path_str.trim().is_empty() {
        return Err(Error::ConfigParse(format!(
            "Empty path in '{}' field",
            field_name
        )));
    }

    let path = Path::new(path_str);

    if path.is_absolute() {
        return Err(Error::ConfigParse(format!(
            "Absolute paths not allowed in '{}': '{}'. Use relative paths only.",
            field_name, path_str
        )));
    }

    for component in path.components() {
        if component == std::path::Component::ParentDir {
            return Err(Error::ConfigParse(format!(
                "Parent directory references (..) not allowed in '{}': '{}'",
                field_name, path_str
            )));
        }
    }

    Ok(path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const MINIMAL: &str = r#"
[site]
title = "Test Site"

[source]
endpoint = "https://cms.example.com/graphql"
"#;

    #[test]
    fn test_parse_minimal_config() {
        let config = parse_site_toml_str(MINIMAL).unwrap();
        assert_eq!(config.site.title, "Test Site");
        assert_eq!(config.site.lang, "en");
        assert_eq!(
            config.source.endpoint.as_str(),
            "https://cms.example.com/graphql"
        );
        assert_eq!(config.source.namespace, "acf");
        assert_eq!(config.source.timeout, Duration::from_secs(30));
        assert_eq!(config.source.concurrency, 4);
        assert!(config.source.page_query.is_none());
        assert_eq!(config.build.revalidate_secs, 60);
        assert!(config.build.assets.is_none());
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
[site]
title = "Full Site"
lang = "de"

[source]
endpoint = "http://localhost:8080/graphql"
namespace = "blocks"
token_env = "WP_TOKEN"
timeout_secs = 5
concurrency = 8
page_query = "queries/page.graphql"

[build]
revalidate_secs = 300
assets = "static"
"#;
        let config = parse_site_toml_str(toml).unwrap();
        assert_eq!(config.site.lang, "de");
        assert_eq!(config.source.namespace, "blocks");
        assert_eq!(config.source.token_env.as_deref(), Some("WP_TOKEN"));
        assert_eq!(config.source.timeout, Duration::from_secs(5));
        assert_eq!(config.source.concurrency, 8);
        assert_eq!(
            config.source.page_query,
            Some(PathBuf::from("queries/page.graphql"))
        );
        assert_eq!(config.build.revalidate_secs, 300);
        assert_eq!(config.build.assets, Some(PathBuf::from("static")));
    }

    #[test]
    fn test_rejects_non_http_endpoint() {
        let toml = MINIMAL.replace("https://cms.example.com/graphql", "ftp://cms.example.com");
        let err = parse_site_toml_str(&toml).unwrap_err();
        assert!(err.to_string().contains("http or https"));
    }

    #[test]
    fn test_rejects_relative_endpoint() {
        let toml = MINIMAL.replace("https://cms.example.com/graphql", "/graphql");
        let err = parse_site_toml_str(&toml).unwrap_err();
        assert!(err.to_string().contains("Invalid source.endpoint"));
    }

    #[test]
    fn test_rejects_zero_concurrency() {
        let toml = format!("{}concurrency = 0\n", MINIMAL);
        let err = parse_site_toml_str(&toml).unwrap_err();
        assert!(err.to_string().contains("source.concurrency"));
    }

    #[test]
    fn test_rejects_zero_timeout() {
        let toml = format!("{}timeout_secs = 0\n", MINIMAL);
        let err = parse_site_toml_str(&toml).unwrap_err();
        assert!(err.to_string().contains("source.timeout_secs"));
    }

    #[test]
    fn test_rejects_namespace_with_slash() {
        let toml = format!("{}namespace = \"acf/x\"\n", MINIMAL);
        assert!(parse_site_toml_str(&toml).is_err());
    }

    #[test]
    fn test_rejects_empty_title() {
        let toml = MINIMAL.replace("Test Site", "  ");
        let err = parse_site_toml_str(&toml).unwrap_err();
        assert!(err.to_string().contains("site.title"));
    }

    #[test]
    fn test_rejects_unknown_keys() {
        let toml = format!("{}retries = 3\n", MINIMAL);
        assert!(parse_site_toml_str(&toml).is_err());
    }

    #[test]
    fn test_rejects_path_traversal_in_assets() {
        let toml = format!("{}\n[build]\nassets = \"../../etc\"\n", MINIMAL);
        let err = parse_site_toml_str(&toml).unwrap_err();
        assert!(err.to_string().contains("Parent directory references"));
    }

    #[test]
    fn test_rejects_absolute_page_query() {
        let toml = format!("{}page_query = \"/etc/passwd\"\n", MINIMAL);
        let err = parse_site_toml_str(&toml).unwrap_err();
        assert!(err.to_string().contains("Absolute paths not allowed"));
        assert!(err.to_string().contains("source.page_query"));
    }

    #[test]
    fn test_validate_path() {
        assert!(validate_path("static", "build.assets").is_ok());
        assert!(validate_path("queries/page.graphql", "source.page_query").is_ok());
        assert!(validate_path("", "build.assets").is_err());
        assert!(validate_path("   ", "build.assets").is_err());
        assert!(validate_path("static/../../x", "build.assets").is_err());
    }

    #[test]
    fn test_token_from_env() {
        let mut config = parse_site_toml_str(MINIMAL).unwrap();
        assert_eq!(config.source.token(), None);

        config.source.token_env = Some("ACF_PRESS_TEST_TOKEN_UNSET_VAR".to_string());
        assert_eq!(config.source.token(), None);
    }

    #[test]
    fn test_parse_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(MINIMAL.as_bytes()).unwrap();
        let config = parse_site_toml(file.path()).unwrap();
        assert_eq!(config.site.title, "Test Site");
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = parse_site_toml("/definitely/not/here/site.toml").unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
