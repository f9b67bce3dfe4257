use std::collections::VecDeque;

use crate::config::Orientation;

use super::{InvalidInput, LayoutError, Rect};

/// Read-only view of a caller's hierarchical data.
pub trait RawNode {
    fn label(&self) -> &str;

    fn child_count(&self) -> usize;

    /// Child at `index`. `None` for an index below [`child_count`] marks a
    /// null entry in the child list.
    ///
    /// [`child_count`]: RawNode::child_count
    fn child(&self, index: usize) -> Option<&Self>;
}

/// Handle to a node of one layout run, equal to its breadth-first index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Direction the label text of a node runs in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelFlow {
    Horizontal,
    /// One character per line, stacked top to bottom.
    Vertical,
}

impl LabelFlow {
    /// The root's flow is flipped relative to the rest of the tree.
    pub fn for_node(is_root: bool, orientation: Orientation) -> Self {
        match (is_root, orientation) {
            (true, Orientation::TopDown) | (false, Orientation::LeftRight) => LabelFlow::Horizontal,
            (true, Orientation::LeftRight) | (false, Orientation::TopDown) => LabelFlow::Vertical,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            LabelFlow::Horizontal => "horizontal",
            LabelFlow::Vertical => "vertical",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum NodeState {
    Unsized,
    Placed,
    Finalized,
}

#[derive(Debug)]
pub(crate) struct PositionedNode<'a, N> {
    pub raw: &'a N,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    pub sibling_index: usize,
    pub depth: usize,
    pub rect: Rect,
    pub label_flow: LabelFlow,
    pub state: NodeState,
}

/// Arena of positioned nodes in breadth-first order. The root is index 0.
#[derive(Debug)]
pub(crate) struct PositionedTree<'a, N> {
    nodes: Vec<PositionedNode<'a, N>>,
}

impl<'a, N: RawNode> PositionedTree<'a, N> {
    /// Wrap `root` breadth-first. Each queued raw node travels with its
    /// already-wrapped parent; the root travels with `None`.
    pub fn build(root: Option<&'a N>, orientation: Orientation) -> Result<Self, LayoutError> {
        let root = root.ok_or(InvalidInput::MissingRoot)?;
        let mut nodes: Vec<PositionedNode<'a, N>> = Vec::new();
        let mut queue: VecDeque<(&'a N, Option<NodeId>)> = VecDeque::new();
        queue.push_back((root, None));

        while let Some((raw, parent)) = queue.pop_front() {
            let id = NodeId(nodes.len());
            let (depth, sibling_index) = match parent {
                Some(parent_id) => {
                    let parent_node = &mut nodes[parent_id.0];
                    parent_node.children.push(id);
                    (parent_node.depth + 1, parent_node.children.len() - 1)
                }
                None => (0, 0),
            };
            nodes.push(PositionedNode {
                raw,
                parent,
                children: Vec::with_capacity(raw.child_count()),
                sibling_index,
                depth,
                rect: Rect::default(),
                label_flow: LabelFlow::for_node(parent.is_none(), orientation),
                state: NodeState::Unsized,
            });

            for index in 0..raw.child_count() {
                let child = raw.child(index).ok_or_else(|| InvalidInput::NullChild {
                    parent: raw.label().to_string(),
                    index,
                })?;
                queue.push_back((child, Some(id)));
            }
        }

        Ok(Self { nodes })
    }
}

impl<'a, N> PositionedTree<'a, N> {
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn node(&self, id: NodeId) -> &PositionedNode<'a, N> {
        &self.nodes[id.0]
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut PositionedNode<'a, N> {
        &mut self.nodes[id.0]
    }

    pub fn rect(&self, id: NodeId) -> &Rect {
        &self.nodes[id.0].rect
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    pub fn prev_sibling(&self, id: NodeId) -> Option<NodeId> {
        let node = self.node(id);
        let parent = node.parent?;
        let index = node.sibling_index.checked_sub(1)?;
        Some(self.children(parent)[index])
    }

    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        let node = self.node(id);
        let parent = node.parent?;
        self.children(parent).get(node.sibling_index + 1).copied()
    }

    /// All nodes of the subtree rooted at `start`, children before parents.
    pub fn post_order_from(&self, start: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![(start, 0usize)];
        while let Some((id, next_child)) = stack.pop() {
            let children = self.children(id);
            if let Some(&child) = children.get(next_child) {
                stack.push((id, next_child + 1));
                stack.push((child, 0));
            } else {
                out.push(id);
            }
        }
        out
    }

    pub fn post_order(&self) -> Vec<NodeId> {
        self.post_order_from(self.root())
    }

    /// Visit order of the placement pass: a node's children are placed as a
    /// group, then each child's subtree is handled in turn.
    pub fn placement_order(&self) -> Vec<NodeId> {
        let mut out = Vec::with_capacity(self.len());
        out.push(self.root());
        let mut stack = vec![self.root()];
        while let Some(id) = stack.pop() {
            let children = self.children(id);
            out.extend_from_slice(children);
            stack.extend(children.iter().rev());
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::OrgNode;

    fn sample() -> OrgNode {
        OrgNode::new("A")
            .with_child(OrgNode::new("B").with_child(OrgNode::new("D")).with_child(OrgNode::new("E")))
            .with_child(OrgNode::new("C"))
    }

    fn labels<N: RawNode>(tree: &PositionedTree<'_, N>, ids: &[NodeId]) -> Vec<String> {
        ids.iter()
            .map(|id| tree.node(*id).raw.label().to_string())
            .collect()
    }

    #[test]
    fn builds_breadth_first_with_back_references() {
        let root = sample();
        let tree = PositionedTree::build(Some(&root), Orientation::TopDown).unwrap();
        assert_eq!(tree.len(), 5);
        let all: Vec<NodeId> = (0..tree.len()).map(NodeId).collect();
        assert_eq!(labels(&tree, &all), ["A", "B", "C", "D", "E"]);

        for id in &all {
            for child in tree.children(*id) {
                assert_eq!(tree.parent(*child), Some(*id));
                assert_eq!(tree.node(*child).depth, tree.node(*id).depth + 1);
            }
        }
        assert_eq!(tree.parent(tree.root()), None);
        assert_eq!(tree.node(NodeId(4)).depth, 2);
    }

    #[test]
    fn sibling_lookups() {
        let root = sample();
        let tree = PositionedTree::build(Some(&root), Orientation::TopDown).unwrap();
        assert_eq!(tree.next_sibling(NodeId(1)), Some(NodeId(2)));
        assert_eq!(tree.prev_sibling(NodeId(2)), Some(NodeId(1)));
        assert_eq!(tree.prev_sibling(NodeId(1)), None);
        assert_eq!(tree.next_sibling(NodeId(2)), None);
        assert_eq!(tree.next_sibling(tree.root()), None);
    }

    #[test]
    fn traversal_orders() {
        let root = sample();
        let tree = PositionedTree::build(Some(&root), Orientation::TopDown).unwrap();
        assert_eq!(labels(&tree, &tree.post_order()), ["D", "E", "B", "C", "A"]);
        assert_eq!(labels(&tree, &tree.placement_order()), ["A", "B", "C", "D", "E"]);
        assert_eq!(labels(&tree, &tree.post_order_from(NodeId(1))), ["D", "E", "B"]);
    }

    #[test]
    fn label_flow_flips_at_the_root() {
        let root = sample();
        let tree = PositionedTree::build(Some(&root), Orientation::TopDown).unwrap();
        assert_eq!(tree.node(tree.root()).label_flow, LabelFlow::Horizontal);
        assert_eq!(tree.node(NodeId(1)).label_flow, LabelFlow::Vertical);

        let tree = PositionedTree::build(Some(&root), Orientation::LeftRight).unwrap();
        assert_eq!(tree.node(tree.root()).label_flow, LabelFlow::Vertical);
        assert_eq!(tree.node(NodeId(3)).label_flow, LabelFlow::Horizontal);
    }

    #[test]
    fn missing_root_is_invalid_input() {
        let err = PositionedTree::<OrgNode>::build(None, Orientation::TopDown).unwrap_err();
        assert_eq!(err, LayoutError::InvalidInput(InvalidInput::MissingRoot));
    }

    #[test]
    fn null_child_is_invalid_input() {
        let mut root = sample();
        root.children.insert(1, None);
        let err = PositionedTree::build(Some(&root), Orientation::TopDown).unwrap_err();
        assert_eq!(
            err,
            LayoutError::InvalidInput(InvalidInput::NullChild {
                parent: "A".to_string(),
                index: 1,
            })
        );
    }
}
