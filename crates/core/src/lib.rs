pub mod config;
pub mod error;
pub mod types;

pub use config::{
    BuildConfig, CONFIG_FILE, SiteConfig, SiteMetadata, SourceConfig, parse_site_toml,
    parse_site_toml_str,
};
pub use error::{Error, Result};
pub use types::*;
