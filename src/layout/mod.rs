mod engine;
pub mod error;
pub mod geometry;
pub mod routing;
pub mod sizing;
pub mod text;
pub mod tree;
pub mod types;

pub use error::{InvalidInput, LayoutError, LayoutWarning};
pub use geometry::{Axis, Point, Rect, Size};
pub use sizing::{LabelSizer, NodeSizing};
pub use text::TextBlock;
pub use tree::{LabelFlow, NodeId, RawNode};
pub use types::{Layout, Link, LinkKind, NodeLayout};

use crate::config::LayoutConfig;
use engine::Engine;
use tree::PositionedTree;
use tracing::debug;

/// Lay out the tree below `root`.
///
/// `sizing` is asked for every node's size exactly once. Invalid input
/// (no root, a null child, a non-positive size or an out-of-range config
/// value) fails before any node is placed. Overlaps the correction pass
/// could not close are returned in [`Layout::warnings`].
pub fn compute_layout<N, S>(
    root: Option<&N>,
    sizing: &S,
    config: &LayoutConfig,
) -> Result<Layout, LayoutError>
where
    N: RawNode,
    S: NodeSizing<N> + ?Sized,
{
    config.validate()?;
    let mut tree = PositionedTree::build(root, config.orientation)?;
    engine::size_nodes(&mut tree, sizing)?;

    let engine = Engine::new(config);
    engine.place(&mut tree);
    engine.resolve(&mut tree);
    let warnings = engine.verify(&tree);
    let links = routing::route_links(&tree, config.orientation);
    debug!(
        nodes = tree.len(),
        links = links.len(),
        warnings = warnings.len(),
        "layout complete"
    );

    Ok(collect_layout(&tree, config, links, warnings))
}

fn collect_layout<N: RawNode>(
    tree: &PositionedTree<'_, N>,
    config: &LayoutConfig,
    links: Vec<Link>,
    warnings: Vec<LayoutWarning>,
) -> Layout {
    let order = tree.post_order();
    let bounds = order
        .iter()
        .map(|id| *tree.rect(*id))
        .reduce(|acc, rect| acc.union(&rect))
        .unwrap_or_default();
    let nodes = order
        .into_iter()
        .map(|id| {
            let node = tree.node(id);
            NodeLayout {
                id,
                parent: node.parent,
                label: node.raw.label().to_string(),
                depth: node.depth,
                rect: node.rect,
                label_flow: node.label_flow,
            }
        })
        .collect();

    Layout {
        orientation: config.orientation,
        nodes,
        links,
        warnings,
        bounds,
        width: bounds.width,
        height: bounds.height,
    }
}
