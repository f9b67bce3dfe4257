use crate::config::Orientation;

use super::{LabelFlow, LayoutWarning, NodeId, Point, Rect};

#[derive(Debug, Clone, PartialEq)]
pub struct NodeLayout {
    pub id: NodeId,
    pub parent: Option<NodeId>,
    pub label: String,
    pub depth: usize,
    pub rect: Rect,
    pub label_flow: LabelFlow,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkKind {
    /// From a node toward its parent, ending at the elbow.
    ParentStub,
    /// From a parent toward its children, ending at the elbow.
    ChildStub,
    /// Joins the elbows of the first and last child.
    Bridge,
}

impl LinkKind {
    pub fn as_str(self) -> &'static str {
        match self {
            LinkKind::ParentStub => "parent-stub",
            LinkKind::ChildStub => "child-stub",
            LinkKind::Bridge => "bridge",
        }
    }
}

/// Straight connector segment in layout coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Link {
    pub p1: Point,
    pub p2: Point,
    pub kind: LinkKind,
    /// Node whose visit produced the segment.
    pub node: NodeId,
}

/// Finished chart. Coordinates are not normalized: the root starts at
/// `root_offset` and earlier subtrees may extend to negative positions;
/// `bounds` covers every node.
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    pub orientation: Orientation,
    /// Children before parents.
    pub nodes: Vec<NodeLayout>,
    pub links: Vec<Link>,
    pub warnings: Vec<LayoutWarning>,
    pub bounds: Rect,
    pub width: f32,
    pub height: f32,
}

impl Layout {
    pub fn node(&self, id: NodeId) -> Option<&NodeLayout> {
        self.nodes.iter().find(|node| node.id == id)
    }

    /// First node (in post-order) carrying `label`.
    pub fn find(&self, label: &str) -> Option<&NodeLayout> {
        self.nodes.iter().find(|node| node.label == label)
    }

    pub fn root(&self) -> Option<&NodeLayout> {
        self.nodes.last()
    }
}
