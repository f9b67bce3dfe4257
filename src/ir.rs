use serde::Deserialize;

use crate::layout::RawNode;

/// One entry of an organization tree: `{ "name": ..., "children": [...] }`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct OrgNode {
    #[serde(alias = "label")]
    pub name: String,
    /// `None` entries come from JSON `null` and are rejected at layout time.
    #[serde(default)]
    pub children: Vec<Option<OrgNode>>,
}

impl OrgNode {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            children: Vec::new(),
        }
    }

    pub fn with_child(mut self, child: OrgNode) -> Self {
        self.children.push(Some(child));
        self
    }

    pub fn node_count(&self) -> usize {
        1 + self
            .children
            .iter()
            .flatten()
            .map(OrgNode::node_count)
            .sum::<usize>()
    }
}

impl RawNode for OrgNode {
    fn label(&self) -> &str {
        &self.name
    }

    fn child_count(&self) -> usize {
        self.children.len()
    }

    fn child(&self, index: usize) -> Option<&Self> {
        self.children.get(index).and_then(Option::as_ref)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ChartDocument {
    Forest(Vec<Option<OrgNode>>),
    Single(Option<OrgNode>),
}

/// Parse chart input (JSON or JSON5).
///
/// A single object yields one chart, a top-level array yields one chart per
/// element and `null` yields a chart without a root.
pub fn parse_charts(input: &str) -> anyhow::Result<Vec<Option<OrgNode>>> {
    let document: ChartDocument = json5::from_str(input)?;
    Ok(match document {
        ChartDocument::Forest(roots) => roots,
        ChartDocument::Single(root) => vec![root],
    })
}
