#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod ir;
pub mod layout;
pub mod layout_dump;
pub mod render;
pub mod text_metrics;
pub mod theme;

#[cfg(feature = "cli")]
pub use cli::run;
pub use config::{Config, LayerPolicy, LayoutConfig, Orientation, RenderConfig, load_config, parse_config};
pub use ir::{OrgNode, parse_charts};
pub use layout::{LabelSizer, Layout, LayoutError, LayoutWarning, NodeSizing, RawNode, compute_layout};
pub use render::render_svg;
pub use theme::Theme;

/// Everything needed to turn chart input into SVG.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub theme: Theme,
    pub layout: LayoutConfig,
    pub render: RenderConfig,
}

impl RenderOptions {
    pub fn classic() -> Self {
        Self::from(Config::default())
    }

    pub fn modern() -> Self {
        let theme = Theme::modern();
        let render = RenderConfig {
            background: theme.background.clone(),
            ..RenderConfig::default()
        };
        Self {
            theme,
            layout: LayoutConfig::default(),
            render,
        }
    }

    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.layout.orientation = orientation;
        self
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self::classic()
    }
}

impl From<Config> for RenderOptions {
    fn from(config: Config) -> Self {
        Self {
            theme: config.theme,
            layout: config.layout,
            render: config.render,
        }
    }
}

/// Lay out one chart, sizing nodes from their labels.
pub fn layout_chart(root: Option<&OrgNode>, options: &RenderOptions) -> Result<Layout, LayoutError> {
    let sizer = LabelSizer::new(&options.theme, &options.layout);
    compute_layout(root, &sizer, &options.layout)
}

/// Render every chart in `input` (JSON or JSON5), one SVG per chart.
pub fn render_all_with_options(input: &str, options: &RenderOptions) -> anyhow::Result<Vec<String>> {
    parse_charts(input)?
        .iter()
        .map(|root| -> anyhow::Result<String> {
            let layout = layout_chart(root.as_ref(), options)?;
            Ok(render_svg(&layout, &options.theme, &options.layout, &options.render))
        })
        .collect()
}

/// Render a single chart. Forest input must hold exactly one tree.
pub fn render_with_options(input: &str, options: RenderOptions) -> anyhow::Result<String> {
    let mut svgs = render_all_with_options(input, &options)?;
    if svgs.len() != 1 {
        anyhow::bail!("expected exactly one chart, found {}", svgs.len());
    }
    Ok(svgs.remove(0))
}

pub fn render(input: &str) -> anyhow::Result<String> {
    render_with_options(input, RenderOptions::default())
}
