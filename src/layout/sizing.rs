use crate::config::LayoutConfig;
use crate::theme::Theme;

use super::text::{measure_label, TextBlock};
use super::{LabelFlow, RawNode, Size};

/// Supplies the content size of a node before it is positioned.
///
/// Called exactly once per node and layout run. Both dimensions must be
/// strictly positive.
pub trait NodeSizing<N> {
    fn size(&self, node: &N, flow: LabelFlow) -> Size;
}

impl<N, F> NodeSizing<N> for F
where
    F: Fn(&N, LabelFlow) -> Size,
{
    fn size(&self, node: &N, flow: LabelFlow) -> Size {
        self(node, flow)
    }
}

/// Sizes a node from its label text plus padding.
///
/// Horizontal labels are as wide as their longest line; vertical labels
/// stack one character per line. Either way a label reserves room for at
/// least `min_label_chars` characters.
#[derive(Debug, Clone)]
pub struct LabelSizer<'a> {
    theme: &'a Theme,
    config: &'a LayoutConfig,
}

impl<'a> LabelSizer<'a> {
    pub fn new(theme: &'a Theme, config: &'a LayoutConfig) -> Self {
        Self { theme, config }
    }

    pub fn measure(&self, label: &str, flow: LabelFlow) -> TextBlock {
        measure_label(label, flow, self.theme, self.config)
    }
}

impl<N: RawNode> NodeSizing<N> for LabelSizer<'_> {
    fn size(&self, node: &N, flow: LabelFlow) -> Size {
        let block = self.measure(node.label(), flow);
        Size::new(
            block.width + 2.0 * self.config.node_padding_x,
            block.height + 2.0 * self.config.node_padding_y,
        )
    }
}
