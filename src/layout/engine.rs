use tracing::{debug, trace, warn};

use crate::config::{LayerPolicy, LayoutConfig};

use super::sizing::NodeSizing;
use super::tree::{NodeState, PositionedTree};
use super::{Axis, InvalidInput, LayoutError, LayoutWarning, NodeId, RawNode, Rect};

/// Relative slack allowed by the spacing check. Pass 2 moves earlier
/// subtrees once per conflict, so rounding error grows with the magnitude
/// of the coordinates being compared.
const OVERLAP_TOLERANCE: f32 = 1e-3;

/// Size every node exactly once, in placement order.
///
/// Fails on the first non-positive or non-finite size, before any
/// coordinate has been assigned.
pub(crate) fn size_nodes<N, S>(tree: &mut PositionedTree<'_, N>, sizing: &S) -> Result<(), LayoutError>
where
    N: RawNode,
    S: NodeSizing<N> + ?Sized,
{
    for id in tree.placement_order() {
        let node = tree.node(id);
        debug_assert_eq!(node.state, NodeState::Unsized);
        let size = sizing.size(node.raw, node.label_flow);
        if !size.is_valid() {
            return Err(InvalidInput::InvalidSize {
                label: node.raw.label().to_string(),
                width: size.width,
                height: size.height,
            }
            .into());
        }
        tree.node_mut(id).rect = Rect::from_size(size);
    }
    Ok(())
}

/// Two-pass placement: Pass 1 packs each sibling group under its parent,
/// Pass 2 centers parents bottom-up and pushes earlier subtrees away.
pub(crate) struct Engine<'c> {
    config: &'c LayoutConfig,
    main: Axis,
    cross: Axis,
}

impl<'c> Engine<'c> {
    pub fn new(config: &'c LayoutConfig) -> Self {
        Self {
            config,
            main: config.orientation.main_axis(),
            cross: config.orientation.cross_axis(),
        }
    }

    /// Pass 1: provisional coordinates for every (already sized) node.
    pub fn place<N>(&self, tree: &mut PositionedTree<'_, N>) {
        debug!(nodes = tree.len(), policy = ?self.config.layer_policy, "placing nodes");
        for id in tree.placement_order() {
            let (main, cross) = match tree.parent(id) {
                None => (self.config.root_offset, 0.0),
                Some(parent) => {
                    let main = match tree.prev_sibling(id) {
                        Some(prev) => tree.rect(prev).end(self.main) + self.config.interval,
                        None => tree.rect(parent).start(self.main),
                    };
                    (main, self.layer_start(tree, id, parent))
                }
            };
            let node = tree.node_mut(id);
            node.rect.set_start(self.main, main);
            node.rect.set_start(self.cross, cross);
            node.state = NodeState::Placed;
        }
    }

    fn layer_start<N>(&self, tree: &PositionedTree<'_, N>, id: NodeId, parent: NodeId) -> f32 {
        match self.config.layer_policy {
            LayerPolicy::FixedDepth => tree.node(id).depth as f32 * self.config.layer_spacing,
            LayerPolicy::DeepestSibling => {
                let deepest = match tree.parent(parent) {
                    Some(grandparent) => tree
                        .children(grandparent)
                        .iter()
                        .map(|uncle| tree.rect(*uncle).end(self.cross))
                        .fold(f32::NEG_INFINITY, f32::max),
                    None => tree.rect(parent).end(self.cross),
                };
                deepest + self.config.layer_spacing
            }
        }
    }

    /// Pass 2: center parents and resolve sibling conflicts, children first.
    pub fn resolve<N>(&self, tree: &mut PositionedTree<'_, N>) {
        debug!("centering parents over their children");
        for id in tree.post_order() {
            debug_assert_eq!(tree.node(id).state, NodeState::Placed);
            self.finalize(tree, id);
            tree.node_mut(id).state = NodeState::Finalized;
        }
    }

    fn finalize<N>(&self, tree: &mut PositionedTree<'_, N>, id: NodeId) {
        let children = tree.children(id);
        let (Some(&first), Some(&last)) = (children.first(), children.last()) else {
            return;
        };

        let span_mid = (tree.rect(first).start(self.main) + tree.rect(last).end(self.main)) / 2.0;
        let extent = tree.rect(id).extent(self.main);
        tree.node_mut(id).rect.set_start(self.main, span_mid - extent / 2.0);

        let Some(next) = tree.next_sibling(id) else {
            return;
        };
        let offset = tree.rect(next).start(self.main)
            - self.subtree_trailing_extent(tree, id)
            - self.config.interval;
        if offset < 0.0 {
            let shifted = preceding_subtrees(tree, id);
            trace!(
                node = id.index(),
                offset,
                subtrees = shifted.len(),
                "shifting preceding subtrees"
            );
            for root in shifted {
                translate_subtree(tree, root, self.main, offset);
            }
        }
    }

    /// Largest trailing main-axis edge over the whole subtree of `id`.
    fn subtree_trailing_extent<N>(&self, tree: &PositionedTree<'_, N>, id: NodeId) -> f32 {
        tree.post_order_from(id)
            .into_iter()
            .map(|member| tree.rect(member).end(self.main))
            .fold(f32::NEG_INFINITY, f32::max)
    }

    /// Check every adjacent sibling pair against the spacing invariant and
    /// report whatever Pass 2 could not resolve.
    pub fn verify<N: RawNode>(&self, tree: &PositionedTree<'_, N>) -> Vec<LayoutWarning> {
        let mut warnings = Vec::new();
        for index in 0..tree.len() {
            let children = tree.children(NodeId(index));
            for pair in children.windows(2) {
                let (node, next) = (pair[0], pair[1]);
                let trailing = self.subtree_trailing_extent(tree, node);
                let next_start = tree.rect(next).start(self.main);
                let overlap = trailing + self.config.interval - next_start;
                if overlap > overlap_tolerance(trailing, next_start) {
                    warn!(
                        node = tree.node(node).raw.label(),
                        next = tree.node(next).raw.label(),
                        overlap,
                        "unresolved subtree overlap"
                    );
                    warnings.push(LayoutWarning::UnresolvedOverlap {
                        node,
                        next,
                        overlap,
                    });
                }
            }
        }
        warnings
    }
}

fn overlap_tolerance(trailing: f32, next_start: f32) -> f32 {
    OVERLAP_TOLERANCE * (1.0 + trailing.abs().max(next_start.abs()))
}

/// Roots of every subtree that has to move together with `id` when its
/// subtree is pushed back along the main axis.
///
/// That is `id` and its earlier siblings. For a first child the search
/// climbs to the nearest ancestor that is not a first child and adds that
/// ancestor's earlier siblings as well. When the climb ends at the root
/// nothing more is added.
pub(crate) fn preceding_subtrees<N>(tree: &PositionedTree<'_, N>, id: NodeId) -> Vec<NodeId> {
    let Some(parent) = tree.parent(id) else {
        return vec![id];
    };
    let index = tree.node(id).sibling_index;
    let mut roots = tree.children(parent)[..=index].to_vec();
    if index > 0 {
        return roots;
    }

    let mut ancestor = parent;
    while tree.node(ancestor).sibling_index == 0 {
        match tree.parent(ancestor) {
            Some(up) => ancestor = up,
            None => return roots,
        }
    }
    if let Some(up) = tree.parent(ancestor) {
        let earlier = tree.node(ancestor).sibling_index;
        roots.extend_from_slice(&tree.children(up)[..earlier]);
    }
    roots
}

pub(crate) fn translate_subtree<N>(tree: &mut PositionedTree<'_, N>, root: NodeId, axis: Axis, delta: f32) {
    for member in tree.post_order_from(root) {
        tree.node_mut(member).rect.translate(axis, delta);
    }
}
