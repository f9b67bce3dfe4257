use std::collections::HashMap;
use std::path::Path;

use ochart::layout::{Axis, InvalidInput, LinkKind, NodeId, NodeLayout};
use ochart::layout_dump::write_layout_dump;
use ochart::{
    Layout, LayoutError, LayoutWarning, OrgNode, Orientation, RenderOptions, layout_chart, parse_charts,
    render_svg,
};

fn assert_valid_svg(svg: &str, fixture: &str) {
    assert!(svg.contains("<svg"), "{fixture}: missing <svg tag");
    assert!(svg.contains("</svg>"), "{fixture}: missing </svg tag");
}

fn fixture_path(name: &str) -> std::path::PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn load_fixture(name: &str) -> Vec<Option<OrgNode>> {
    let input = std::fs::read_to_string(fixture_path(name)).expect("fixture read failed");
    parse_charts(&input).expect("parse failed")
}

/// Centering, spacing and link-count invariants of a finished layout.
fn check_layout(layout: &Layout, interval: f32, fixture: &str) {
    let main = layout.orientation.main_axis();
    let by_id: HashMap<NodeId, &NodeLayout> = layout.nodes.iter().map(|node| (node.id, node)).collect();
    let mut children: HashMap<NodeId, Vec<NodeId>> = HashMap::new();
    for node in &layout.nodes {
        if let Some(parent) = node.parent {
            children.entry(parent).or_default().push(node.id);
        }
    }
    for list in children.values_mut() {
        list.sort();
    }

    let subtree_end = |root: NodeId| -> f32 {
        let mut end = f32::NEG_INFINITY;
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            end = end.max(by_id[&id].rect.end(main));
            if let Some(kids) = children.get(&id) {
                stack.extend(kids);
            }
        }
        end
    };

    let mut branching = 0;
    for (parent, kids) in &children {
        let first = by_id[&kids[0]].rect;
        let last = by_id[&kids[kids.len() - 1]].rect;
        let expected = (first.start(main) + last.end(main)) / 2.0;
        assert!(
            (by_id[parent].rect.mid(main) - expected).abs() < 1e-2,
            "{fixture}: node {} is not centered over its children",
            by_id[parent].label
        );
        if kids.len() > 1 {
            branching += 1;
        }
        for pair in kids.windows(2) {
            let gap = by_id[&pair[1]].rect.start(main) - subtree_end(pair[0]);
            let reported = layout.warnings.iter().any(|warning| match warning {
                LayoutWarning::UnresolvedOverlap { node, next, .. } => *node == pair[0] && *next == pair[1],
            });
            assert!(
                gap + 1e-2 >= interval || reported,
                "{fixture}: {} and {} are {gap} apart",
                by_id[&pair[0]].label,
                by_id[&pair[1]].label
            );
        }
    }

    let edges = layout.nodes.len() - 1;
    assert_eq!(
        layout.links.len(),
        edges + children.len() + branching,
        "{fixture}: unexpected link count"
    );
    let bridges = layout.links.iter().filter(|link| link.kind == LinkKind::Bridge).count();
    assert_eq!(bridges, branching, "{fixture}: one bridge per branching node");
}

#[test]
fn render_all_fixtures() {
    let fixtures = ["company.json", "team.json5", "forest.json", "single.json"];
    for fixture in fixtures {
        for orientation in [Orientation::TopDown, Orientation::LeftRight] {
            for options in [RenderOptions::classic(), RenderOptions::modern()] {
                let options = options.with_orientation(orientation);
                for root in load_fixture(fixture) {
                    let layout = layout_chart(root.as_ref(), &options)
                        .unwrap_or_else(|err| panic!("{fixture}: layout failed: {err}"));
                    assert_eq!(
                        layout.nodes.len(),
                        root.as_ref().map_or(0, OrgNode::node_count),
                        "{fixture}: node count"
                    );
                    check_layout(&layout, options.layout.interval, fixture);
                    let svg = render_svg(&layout, &options.theme, &options.layout, &options.render);
                    assert_valid_svg(&svg, fixture);
                }
            }
        }
    }
}

#[test]
fn company_chart_layers_by_depth() {
    let charts = load_fixture("company.json");
    let options = RenderOptions::classic();
    let layout = layout_chart(charts[0].as_ref(), &options).unwrap();
    for node in &layout.nodes {
        assert_eq!(node.rect.y, node.depth as f32 * options.layout.layer_spacing);
    }
    let root = layout.root().unwrap();
    assert_eq!(root.label, "董事会");
    assert!(root.rect.width > root.rect.height);
    let leaf = layout.find("基础架构").unwrap();
    assert!(leaf.rect.height > leaf.rect.width);
}

#[test]
fn null_child_fixture_is_rejected() {
    let charts = load_fixture("null_child.json");
    let err = layout_chart(charts[0].as_ref(), &RenderOptions::default()).unwrap_err();
    assert_eq!(
        err,
        LayoutError::InvalidInput(InvalidInput::NullChild {
            parent: "Root".to_string(),
            index: 1,
        })
    );
}

#[test]
fn deep_chain_lines_up_under_the_root() {
    let mut node = OrgNode::new("leaf");
    for depth in (0..2000).rev() {
        node = OrgNode::new(format!("n{depth}")).with_child(node);
    }
    let layout = layout_chart(Some(&node), &RenderOptions::default()).unwrap();
    assert_eq!(layout.nodes.len(), 2001);
    let root_mid = layout.root().unwrap().rect.mid(Axis::X);
    assert!(layout.nodes.iter().all(|n| (n.rect.mid(Axis::X) - root_mid).abs() < 1e-2));
    assert!(layout.warnings.is_empty());
    assert_eq!(layout.links.len(), 2000 * 2);
}

#[test]
fn wide_fan_out_keeps_siblings_apart() {
    let mut root = OrgNode::new("hub");
    for index in 0..300 {
        root = root.with_child(OrgNode::new(format!("spoke {index}")));
    }
    let options = RenderOptions::modern();
    let layout = layout_chart(Some(&root), &options).unwrap();
    check_layout(&layout, options.layout.interval, "fan-out");
    assert!(layout.warnings.is_empty());
    assert_eq!(layout.links.len(), 300 + 2);
}

#[test]
fn layout_dump_round_trips_through_json() {
    let charts = load_fixture("team.json5");
    let layout = layout_chart(charts[0].as_ref(), &RenderOptions::default()).unwrap();
    let path = std::env::temp_dir().join(format!("ochart-dump-{}.json", std::process::id()));
    write_layout_dump(&path, &layout).unwrap();

    let dump: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    let _ = std::fs::remove_file(&path);
    assert_eq!(dump["orientation"], "top-down");
    assert_eq!(dump["nodes"].as_array().map(Vec::len), Some(layout.nodes.len()));
    assert_eq!(dump["links"].as_array().map(Vec::len), Some(layout.links.len()));
    assert_eq!(dump["nodes"][layout.nodes.len() - 1]["label"], "Head of Engineering");
}
