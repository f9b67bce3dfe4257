use crate::config::{LayoutConfig, RenderConfig};
use crate::layout::{LabelSizer, Layout, NodeLayout};
use crate::theme::Theme;
use anyhow::Result;
use std::path::Path;

/// Static SVG for a finished layout.
///
/// Layout coordinates may be negative, so everything is drawn inside a
/// group translated by the layout bounds plus `render.padding`. The canvas
/// grows to `render.min_width` x `render.min_height` with the chart
/// centered in it.
pub fn render_svg(layout: &Layout, theme: &Theme, config: &LayoutConfig, render: &RenderConfig) -> String {
    let padding = render.padding.max(0.0);
    let content_width = layout.width + padding * 2.0;
    let content_height = layout.height + padding * 2.0;
    let width = content_width.max(render.min_width);
    let height = content_height.max(render.min_height);
    let dx = padding - layout.bounds.x + (width - content_width) / 2.0;
    let dy = padding - layout.bounds.y + (height - content_height) / 2.0;
    let sizer = LabelSizer::new(theme, config);

    let mut svg = String::new();
    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width:.2}\" height=\"{height:.2}\" viewBox=\"0 0 {width:.2} {height:.2}\" data-orientation=\"{}\">",
        layout.orientation.as_str()
    ));
    svg.push_str(&format!(
        "<rect width=\"100%\" height=\"100%\" fill=\"{}\"/>",
        render.background
    ));
    svg.push_str(&format!("<g transform=\"translate({dx:.2},{dy:.2})\">"));

    svg.push_str(&format!(
        "<g class=\"links\" stroke=\"{}\" stroke-width=\"{}\" fill=\"none\">",
        theme.line_color, theme.line_width
    ));
    for link in &layout.links {
        svg.push_str(&format!(
            "<line class=\"{}\" x1=\"{:.2}\" y1=\"{:.2}\" x2=\"{:.2}\" y2=\"{:.2}\"/>",
            link.kind.as_str(),
            link.p1.x,
            link.p1.y,
            link.p2.x,
            link.p2.y
        ));
    }
    svg.push_str("</g>");

    svg.push_str("<g class=\"nodes\">");
    for node in &layout.nodes {
        svg.push_str(&node_svg(node, theme, &sizer, config));
    }
    svg.push_str("</g>");

    svg.push_str("</g></svg>");
    svg
}

fn node_svg(node: &NodeLayout, theme: &Theme, sizer: &LabelSizer<'_>, config: &LayoutConfig) -> String {
    let rect = node.rect;
    let mut out = format!(
        "<g class=\"node\" data-depth=\"{}\"><rect x=\"{:.2}\" y=\"{:.2}\" width=\"{:.2}\" height=\"{:.2}\" rx=\"{r}\" ry=\"{r}\" fill=\"{}\" stroke=\"{}\" stroke-width=\"{}\"/>",
        node.depth,
        rect.x,
        rect.y,
        rect.width,
        rect.height,
        theme.node_fill,
        theme.node_border_color,
        theme.border_width,
        r = theme.corner_radius,
    );

    // Lines are stacked top to bottom for both flows; vertical labels just
    // carry one character per line.
    let block = sizer.measure(&node.label, node.label_flow);
    let line_height = theme.font_size * config.label_line_height;
    let center = rect.center();
    let top = center.y - line_height * block.lines.len() as f32 / 2.0;
    out.push_str(&format!(
        "<text x=\"{:.2}\" text-anchor=\"middle\" dominant-baseline=\"central\" font-family=\"{}\" font-size=\"{}\" fill=\"{}\" data-flow=\"{}\">",
        center.x,
        escape_xml(&theme.font_family),
        theme.font_size,
        theme.node_text_color,
        node.label_flow.as_str()
    ));
    for (index, line) in block.lines.iter().enumerate() {
        let y = top + line_height * (index as f32 + 0.5);
        out.push_str(&format!(
            "<tspan x=\"{:.2}\" y=\"{y:.2}\">{}</tspan>",
            center.x,
            escape_xml(line)
        ));
    }
    out.push_str("</text></g>");
    out
}

pub fn write_output_svg(svg: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, svg)?;
        }
        None => {
            print!("{}", svg);
        }
    }
    Ok(())
}

#[cfg(feature = "png")]
pub fn write_output_png(svg: &str, output: &Path, font_family: &str) -> Result<()> {
    let mut opt = usvg::Options::default();
    opt.font_family = font_family
        .split(',')
        .map(|name| name.trim().trim_matches('"'))
        .find(|name| !name.is_empty())
        .unwrap_or("sans-serif")
        .to_string();
    opt.fontdb_mut().load_system_fonts();

    let tree = usvg::Tree::from_str(svg, &opt)?;
    let size = tree.size().to_int_size();
    let mut pixmap = resvg::tiny_skia::Pixmap::new(size.width(), size.height())
        .ok_or_else(|| anyhow::anyhow!("Failed to allocate pixmap"))?;

    let mut pixmap_mut = pixmap.as_mut();
    resvg::render(&tree, resvg::tiny_skia::Transform::default(), &mut pixmap_mut);
    pixmap.save_png(output)?;
    Ok(())
}

fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::OrgNode;
    use crate::layout::compute_layout;

    fn chart() -> OrgNode {
        OrgNode::new("CEO & Board")
            .with_child(OrgNode::new("研发中心"))
            .with_child(OrgNode::new("Sales"))
    }

    #[test]
    fn render_svg_basic() {
        let theme = Theme::classic();
        let config = LayoutConfig::default();
        let layout = compute_layout(Some(&chart()), &LabelSizer::new(&theme, &config), &config).unwrap();
        let svg = render_svg(&layout, &theme, &config, &RenderConfig::default());
        assert!(svg.starts_with("<svg"));
        assert!(svg.ends_with("</svg>"));
        assert!(svg.contains("CEO &amp; Board"));
        assert!(svg.contains(">研</tspan>"));
        assert_eq!(svg.matches("<line ").count(), layout.links.len());
        assert_eq!(svg.matches("class=\"node\"").count(), 3);
        assert!(svg.contains("rx=\"5\""));
    }

    #[test]
    fn canvas_covers_negative_coordinates() {
        let theme = Theme::modern();
        let config = LayoutConfig::default();
        let render = RenderConfig {
            padding: 10.0,
            ..RenderConfig::default()
        };
        let layout = compute_layout(Some(&chart()), &LabelSizer::new(&theme, &config), &config).unwrap();
        let svg = render_svg(&layout, &theme, &config, &render);
        let expected = format!("width=\"{:.2}\"", layout.width + 20.0);
        assert!(svg.contains(&expected));
        let translate = format!(
            "translate({:.2},{:.2})",
            10.0 - layout.bounds.x,
            10.0 - layout.bounds.y
        );
        assert!(svg.contains(&translate));
    }

    #[test]
    fn small_chart_is_centered_on_minimum_canvas() {
        let theme = Theme::classic();
        let config = LayoutConfig::default();
        let render = RenderConfig {
            min_width: 2000.0,
            min_height: 1000.0,
            padding: 10.0,
            ..RenderConfig::default()
        };
        let layout = compute_layout(Some(&chart()), &LabelSizer::new(&theme, &config), &config).unwrap();
        assert!(layout.width + 20.0 < 2000.0);
        let svg = render_svg(&layout, &theme, &config, &render);
        assert!(svg.contains("width=\"2000.00\" height=\"1000.00\""));
        let translate = format!(
            "translate({:.2},{:.2})",
            10.0 - layout.bounds.x + (2000.0 - (layout.width + 20.0)) / 2.0,
            10.0 - layout.bounds.y + (1000.0 - (layout.height + 20.0)) / 2.0
        );
        assert!(svg.contains(&translate));

        // A chart larger than the minimum keeps its own size.
        let tight = RenderConfig {
            min_width: 1.0,
            min_height: 1.0,
            padding: 10.0,
            ..RenderConfig::default()
        };
        let svg = render_svg(&layout, &theme, &config, &tight);
        assert!(svg.contains(&format!("width=\"{:.2}\"", layout.width + 20.0)));
    }

    #[test]
    fn escape_xml_covers_markup() {
        assert_eq!(escape_xml("<a href='x'>&\"</a>"), "&lt;a href=&apos;x&apos;&gt;&amp;&quot;&lt;/a&gt;");
    }
}
