// Leptos views for the built-in block types.
//
// Text props are escaped by leptos when rendered. `Content::body` is HTML
// coming straight from the CMS and is inserted as-is.

mod banner;
mod content;
mod footer;
mod header;
mod placeholder;

pub use banner::{PrimaryBanner, SecondaryBanner};
pub use content::Content;
pub use footer::Footer;
pub use header::Header;
pub use placeholder::{BlockError, UnknownBlock};

/// A labelled hyperlink
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub label: String,
    pub url: String,
}
