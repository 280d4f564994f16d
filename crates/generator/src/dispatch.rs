use crate::registry::{RenderError, RendererRegistry};
use acf_press_core::BlockRecord;

/// A rendered block with a stable identity derived from its position
#[derive(Debug, Clone, PartialEq)]
pub struct Keyed<V> {
    /// Index of the source block in the page's block sequence
    pub key: usize,
    pub type_tag: String,
    pub view: V,
}

/// How a single block was resolved
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockOutcome {
    Rendered,
    Unknown,
    Failed(RenderError),
}

impl BlockOutcome {
    pub fn is_placeholder(&self) -> bool {
        !matches!(self, BlockOutcome::Rendered)
    }
}

/// Views plus the per-block outcomes that produced them
#[derive(Debug)]
pub struct DispatchReport<V> {
    pub views: Vec<Keyed<V>>,
    pub outcomes: Vec<BlockOutcome>,
}

/// Render each block through the registry.
///
/// One view per input block, in input order. Unknown tags and failing
/// renderers yield placeholder views instead of aborting the sequence.
pub fn dispatch<V>(registry: &RendererRegistry<V>, blocks: &[BlockRecord]) -> Vec<Keyed<V>> {
    blocks
        .iter()
        .enumerate()
        .map(|(key, block)| {
            let (view, _) = render_block(registry, block);
            Keyed {
                key,
                type_tag: block.type_tag.clone(),
                view,
            }
        })
        .collect()
}

/// Same views as [`dispatch`], with the outcome of every block alongside
pub fn dispatch_with_report<V>(
    registry: &RendererRegistry<V>,
    blocks: &[BlockRecord],
) -> DispatchReport<V> {
    let mut views = Vec::with_capacity(blocks.len());
    let mut outcomes = Vec::with_capacity(blocks.len());

    for (key, block) in blocks.iter().enumerate() {
        let (view, outcome) = render_block(registry, block);
        views.push(Keyed {
            key,
            type_tag: block.type_tag.clone(),
            view,
        });
        outcomes.push(outcome);
    }

    DispatchReport { views, outcomes }
}

fn render_block<V>(registry: &RendererRegistry<V>, block: &BlockRecord) -> (V, BlockOutcome) {
    let fallback = registry.fallback();
    match registry.get(&block.type_tag) {
        Some(renderer) => match renderer(&block.fields) {
            Ok(view) => (view, BlockOutcome::Rendered),
            Err(err) => {
                let view = fallback.failed(&block.type_tag, &err);
                (view, BlockOutcome::Failed(err))
            }
        },
        None => (fallback.unknown(&block.type_tag), BlockOutcome::Unknown),
    }
}
