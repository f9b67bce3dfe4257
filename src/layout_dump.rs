use crate::layout::{Layout, LayoutWarning};
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

#[derive(Debug, Serialize)]
pub struct LayoutDump {
    pub orientation: String,
    pub width: f32,
    pub height: f32,
    /// `[x, y, width, height]` of the union of all node boxes.
    pub bounds: [f32; 4],
    pub nodes: Vec<NodeDump>,
    pub links: Vec<LinkDump>,
    pub warnings: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct NodeDump {
    pub id: usize,
    pub parent: Option<usize>,
    pub label: String,
    pub depth: usize,
    pub label_flow: String,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

#[derive(Debug, Serialize)]
pub struct LinkDump {
    pub kind: String,
    pub node: usize,
    pub points: [[f32; 2]; 2],
}

impl LayoutDump {
    pub fn from_layout(layout: &Layout) -> Self {
        let nodes = layout
            .nodes
            .iter()
            .map(|node| NodeDump {
                id: node.id.index(),
                parent: node.parent.map(|parent| parent.index()),
                label: node.label.clone(),
                depth: node.depth,
                label_flow: node.label_flow.as_str().to_string(),
                x: node.rect.x,
                y: node.rect.y,
                width: node.rect.width,
                height: node.rect.height,
            })
            .collect();

        let links = layout
            .links
            .iter()
            .map(|link| LinkDump {
                kind: link.kind.as_str().to_string(),
                node: link.node.index(),
                points: [[link.p1.x, link.p1.y], [link.p2.x, link.p2.y]],
            })
            .collect();

        let warnings = layout.warnings.iter().map(LayoutWarning::to_string).collect();

        let bounds = layout.bounds;
        LayoutDump {
            orientation: layout.orientation.as_str().to_string(),
            width: layout.width,
            height: layout.height,
            bounds: [bounds.x, bounds.y, bounds.width, bounds.height],
            nodes,
            links,
            warnings,
        }
    }
}

pub fn write_layout_dump(path: &Path, layout: &Layout) -> anyhow::Result<()> {
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, &LayoutDump::from_layout(layout))?;
    Ok(())
}

/// Pretty JSON of the dump on stdout.
pub fn print_layout_dump(layout: &Layout) -> anyhow::Result<()> {
    let stdout = std::io::stdout();
    let mut lock = stdout.lock();
    serde_json::to_writer_pretty(&mut lock, &LayoutDump::from_layout(layout))?;
    writeln!(lock)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LayoutConfig;
    use crate::ir::OrgNode;
    use crate::layout::{LabelFlow, Size, compute_layout};

    #[test]
    fn dump_mirrors_layout() {
        let root = OrgNode::new("root").with_child(OrgNode::new("a")).with_child(OrgNode::new("b"));
        let sizing = |_: &OrgNode, _: LabelFlow| Size::new(40.0, 20.0);
        let layout = compute_layout(Some(&root), &sizing, &LayoutConfig::default()).unwrap();
        let dump = LayoutDump::from_layout(&layout);

        assert_eq!(dump.orientation, "top-down");
        assert_eq!(dump.nodes.len(), 3);
        assert_eq!(dump.nodes[2].label, "root");
        assert_eq!(dump.nodes[2].parent, None);
        assert_eq!(dump.nodes[0].parent, Some(0));
        assert_eq!(dump.links.len(), layout.links.len());
        assert!(dump.warnings.is_empty());

        let json = serde_json::to_value(&dump).unwrap();
        assert_eq!(json["nodes"][0]["label_flow"], "vertical");
        assert_eq!(json["links"][0]["kind"], "parent-stub");
    }
}
