use crate::config::Orientation;

use super::tree::PositionedTree;
use super::types::{Link, LinkKind};
use super::{Axis, NodeId, Point};

/// Elbow connectors for a finalized tree, emitted in post-order.
///
/// A node contributes a stub toward its parent, a stub toward its children
/// and, with two or more children, the bar joining the children's stubs.
/// The two stubs of a parent-child pair meet at the same elbow point on
/// the cross axis.
pub(crate) fn route_links<N>(tree: &PositionedTree<'_, N>, orientation: Orientation) -> Vec<Link> {
    let main = orientation.main_axis();
    let cross = orientation.cross_axis();
    let mut links = Vec::new();

    for id in tree.post_order() {
        let rect = tree.rect(id);

        if let Some(parent) = tree.parent(id) {
            links.push(Link {
                p1: rect.leading_center(cross),
                p2: elbow(tree, id, parent, main, cross),
                kind: LinkKind::ParentStub,
                node: id,
            });
        }

        let children = tree.children(id);
        if let Some(&first) = children.first() {
            let p1 = rect.trailing_center(cross);
            let from = p1.get(cross);
            let to = tree.rect(first).start(cross);
            links.push(Link {
                p1,
                p2: Point::on_axes(main, p1.get(main), from + (to - from) * 2.0 / 3.0),
                kind: LinkKind::ChildStub,
                node: id,
            });
        }

        if let (Some(&first), Some(&last)) = (children.first(), children.last())
            && first != last
        {
            links.push(Link {
                p1: elbow(tree, first, id, main, cross),
                p2: elbow(tree, last, id, main, cross),
                kind: LinkKind::Bridge,
                node: id,
            });
        }
    }
    links
}

/// Far end of `child`'s parent stub: a third of the way from its
/// parent-facing edge to the parent's child-facing edge.
fn elbow<N>(tree: &PositionedTree<'_, N>, child: NodeId, parent: NodeId, main: Axis, cross: Axis) -> Point {
    let start = tree.rect(child).leading_center(cross);
    let from = start.get(cross);
    let to = tree.rect(parent).end(cross);
    Point::on_axes(main, start.get(main), from + (to - from) / 3.0)
}
