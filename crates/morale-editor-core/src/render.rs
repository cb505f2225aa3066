//! Block rendering hook.
//!
//! The host asks a `BlockRenderer` for each block before drawing it. A
//! `Some(component)` answer replaces the default editable text view with a
//! custom one; `None` keeps the default.

use serde::Serialize;

use crate::document::ContentBlock;
use crate::types::{BlockData, BlockType, WidgetKind};

/// Custom views a block can be drawn with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ComponentKind {
    ImagePlaceholder,
}

/// Descriptor for a custom block view.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BlockComponent {
    pub component: ComponentKind,
    /// Whether the host should let the caret enter the block.
    pub editable: bool,
    pub props: BlockData,
}

/// Chooses a custom view for a block.
///
/// Implementations are provided by the consuming application; the widget
/// renderer below covers the built-in widget kinds.
pub trait BlockRenderer {
    fn render_block(&self, block: &ContentBlock) -> Option<BlockComponent>;
}

/// Unit type implementation - every block uses the default view.
impl BlockRenderer for () {
    fn render_block(&self, _block: &ContentBlock) -> Option<BlockComponent> {
        None
    }
}

impl<T: BlockRenderer> BlockRenderer for &T {
    fn render_block(&self, block: &ContentBlock) -> Option<BlockComponent> {
        (*self).render_block(block)
    }
}

impl<T: BlockRenderer> BlockRenderer for Option<T> {
    fn render_block(&self, block: &ContentBlock) -> Option<BlockComponent> {
        self.as_ref().and_then(|r| r.render_block(block))
    }
}

/// Renders widget blocks as non-editable placeholders.
#[derive(Clone, Copy, Debug, Default)]
pub struct WidgetBlockRenderer;

impl BlockRenderer for WidgetBlockRenderer {
    fn render_block(&self, block: &ContentBlock) -> Option<BlockComponent> {
        match block.block_type() {
            BlockType::Widget(WidgetKind::Image) => Some(BlockComponent {
                component: ComponentKind::ImagePlaceholder,
                editable: false,
                props: block.data().clone(),
            }),
            BlockType::Text => None,
        }
    }
}

/// Wrapper element the host draws around a block of the given type. Every
/// type shares `div`; widgets differ only in their component.
pub fn block_render_element(block_type: BlockType) -> &'static str {
    match block_type {
        BlockType::Widget(_) | BlockType::Text => "div",
    }
}
