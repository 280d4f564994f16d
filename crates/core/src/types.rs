use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::PathBuf;
use thiserror::Error;

/// One page as delivered by a data provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageRecord {
    /// Slug the page was fetched under (empty for the front page)
    #[serde(default)]
    pub slug: String,
    pub title: String,
    /// Rendered HTML body from the CMS
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub blocks: Vec<BlockRecord>,
}

impl PageRecord {
    /// Relative output path for this page's HTML file
    pub fn output_path(&self) -> PathBuf {
        slug_output_path(&self.slug)
    }
}

/// A single content block: a type tag plus fields whose shape depends on the tag.
///
/// The wire form is a WPGraphQL block object, where `__typename` carries the
/// tag and every other key is a field. A block without a `__typename` gets
/// an empty tag, which no renderer claims, so it renders as a placeholder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockRecord {
    #[serde(rename = "__typename", default)]
    pub type_tag: String,
    #[serde(flatten)]
    pub fields: Fields,
}

impl BlockRecord {
    pub fn new(type_tag: impl Into<String>, fields: Fields) -> Self {
        Self {
            type_tag: type_tag.into(),
            fields,
        }
    }

    /// Read one block out of a raw JSON value.
    ///
    /// Anything that is not an object yields `None`. A missing or non-string
    /// `__typename` leaves the tag empty.
    pub fn from_value(value: Value) -> Option<Self> {
        let Value::Object(mut map) = value else {
            return None;
        };
        let type_tag = match map.remove("__typename") {
            Some(Value::String(tag)) => tag,
            _ => String::new(),
        };
        Some(Self {
            type_tag,
            fields: Fields(map),
        })
    }

    /// Reduce a namespaced type tag to the registry's plain tag.
    ///
    /// Two spellings are recognised for namespace `acf`: the block name
    /// `acf/primary-banner` and the GraphQL type name `AcfPrimaryBanner`.
    /// Both become `primary-banner`. Tags in any other namespace, or
    /// without one, are returned unchanged.
    pub fn without_namespace(mut self, namespace: &str) -> Self {
        if let Some(rest) = self
            .type_tag
            .strip_prefix(namespace)
            .and_then(|rest| rest.strip_prefix('/'))
            && !rest.is_empty()
        {
            self.type_tag = rest.to_string();
        } else if !namespace.is_empty()
            && let Some(rest) = self.type_tag.strip_prefix(&type_prefix(namespace))
            && rest.starts_with(|c: char| c.is_ascii_uppercase())
        {
            self.type_tag = pascal_to_kebab(rest);
        }
        self
    }
}

/// GraphQL type-name prefix for a namespace: `acf` -> `Acf`
fn type_prefix(namespace: &str) -> String {
    let mut chars = namespace.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn pascal_to_kebab(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for (i, c) in name.chars().enumerate() {
        if c.is_ascii_uppercase() {
            if i > 0 {
                out.push('-');
            }
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

/// Problem reading a field out of a block's payload
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("missing field '{0}'")]
    Missing(String),

    #[error("field '{field}' should be {expected}")]
    WrongType {
        field: String,
        expected: &'static str,
    },
}

/// Named block fields with typed, non-panicking accessors
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fields(Map<String, Value>);

impl Fields {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert, handy for fixtures and tests
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// String value for `key`.
    ///
    /// ACF reports unset text fields as `null` or `""`; both read as `None`.
    pub fn str(&self, key: &str) -> Option<&str> {
        match self.0.get(key) {
            Some(Value::String(s)) if !s.trim().is_empty() => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn required_str(&self, key: &str) -> std::result::Result<&str, FieldError> {
        match self.0.get(key) {
            Some(Value::String(s)) if !s.trim().is_empty() => Ok(s.as_str()),
            None | Some(Value::Null) | Some(Value::String(_)) => {
                Err(FieldError::Missing(key.to_string()))
            }
            Some(_) => Err(FieldError::WrongType {
                field: key.to_string(),
                expected: "a string",
            }),
        }
    }

    /// Nested objects under `key` (ACF repeater fields).
    ///
    /// A missing or null key is an empty list; non-object entries are skipped.
    pub fn objects(&self, key: &str) -> std::result::Result<Vec<Fields>, FieldError> {
        match self.0.get(key) {
            None | Some(Value::Null) => Ok(Vec::new()),
            Some(Value::Array(items)) => Ok(items
                .iter()
                .filter_map(|item| item.as_object().cloned().map(Fields))
                .collect()),
            Some(_) => Err(FieldError::WrongType {
                field: key.to_string(),
                expected: "a list",
            }),
        }
    }
}

impl From<Map<String, Value>> for Fields {
    fn from(map: Map<String, Value>) -> Self {
        Fields(map)
    }
}

/// Turn a WordPress page URI into a slug by removing every `/`.
///
/// `/about-us/` becomes `about-us`, and the front page `/` becomes the empty slug.
pub fn slug_from_uri(uri: &str) -> String {
    uri.replace('/', "")
}

/// URI to query a page by, given its slug
pub fn slug_uri(slug: &str) -> String {
    format!("/{}", slug)
}

/// Whether a slug names exactly one directory under the output root.
///
/// The empty slug (front page) is safe. `.`, `..` and anything containing a
/// path separator or drive colon are not.
pub fn is_safe_slug(slug: &str) -> bool {
    slug.is_empty() || (slug != "." && slug != ".." && !slug.contains(['/', '\\', ':', '\0']))
}

/// Output path for a slug: `about-us/index.html`, or `index.html` for the front page
pub fn slug_output_path(slug: &str) -> PathBuf {
    if slug.is_empty() {
        PathBuf::from("index.html")
    } else {
        PathBuf::from(slug).join("index.html")
    }
}
