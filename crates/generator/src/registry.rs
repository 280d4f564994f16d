use acf_press_core::{FieldError, Fields};
use std::collections::HashMap;
use std::fmt;
use thiserror::Error;

/// Why a renderer could not turn a block's fields into a view
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    #[error(transparent)]
    Field(#[from] FieldError),

    #[error("{0}")]
    Invalid(String),
}

/// A renderer for one block type
pub type Renderer<V> = Box<dyn Fn(&Fields) -> Result<V, RenderError> + Send + Sync>;

/// Views produced when no renderer applies
pub trait Fallback<V>: Send + Sync {
    /// View for a type tag with no registered renderer
    fn unknown(&self, type_tag: &str) -> V;

    /// View for a block whose renderer returned an error
    fn failed(&self, type_tag: &str, error: &RenderError) -> V;
}

/// Mapping from block type tag to renderer.
///
/// Lookup is total: a tag either resolves to a registered renderer or
/// falls through to the registry's [`Fallback`]. Supporting a new block
/// type means one more [`register`](Self::register) call; the dispatch
/// algorithm never changes.
pub struct RendererRegistry<V> {
    renderers: HashMap<String, Renderer<V>>,
    fallback: Box<dyn Fallback<V>>,
}

impl<V> RendererRegistry<V> {
    /// Empty registry; every tag resolves to `fallback` until registered
    pub fn new(fallback: impl Fallback<V> + 'static) -> Self {
        Self {
            renderers: HashMap::new(),
            fallback: Box::new(fallback),
        }
    }

    /// Add a renderer for `type_tag`, replacing any previous one
    pub fn register<F>(&mut self, type_tag: impl Into<String>, renderer: F) -> &mut Self
    where
        F: Fn(&Fields) -> Result<V, RenderError> + Send + Sync + 'static,
    {
        self.renderers.insert(type_tag.into(), Box::new(renderer));
        self
    }

    pub fn get(&self, type_tag: &str) -> Option<&Renderer<V>> {
        self.renderers.get(type_tag)
    }

    pub fn contains(&self, type_tag: &str) -> bool {
        self.renderers.contains_key(type_tag)
    }

    pub fn fallback(&self) -> &dyn Fallback<V> {
        self.fallback.as_ref()
    }

    /// Registered tags in sorted order
    pub fn tags(&self) -> Vec<&str> {
        let mut tags: Vec<&str> = self.renderers.keys().map(String::as_str).collect();
        tags.sort_unstable();
        tags
    }

    pub fn len(&self) -> usize {
        self.renderers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.renderers.is_empty()
    }
}

impl<V> fmt::Debug for RendererRegistry<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RendererRegistry")
            .field("tags", &self.tags())
            .finish_non_exhaustive()
    }
}
