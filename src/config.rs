use crate::layout::{Axis, InvalidInput, LayoutError};
use crate::theme::Theme;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Direction in which depth advances.
///
/// Config files also accept the older names: "horizontal" for top-down
/// (siblings spread horizontally) and "vertical" for left-right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Orientation {
    #[default]
    #[serde(alias = "horizontal", alias = "TD", alias = "TB")]
    TopDown,
    #[serde(alias = "vertical", alias = "LR")]
    LeftRight,
}

impl Orientation {
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "TD" | "TB" | "top-down" | "horizontal" => Some(Self::TopDown),
            "LR" | "left-right" | "vertical" => Some(Self::LeftRight),
            _ => None,
        }
    }

    /// Axis along which siblings are spread out.
    pub fn main_axis(self) -> Axis {
        match self {
            Orientation::TopDown => Axis::X,
            Orientation::LeftRight => Axis::Y,
        }
    }

    /// Axis along which depth advances.
    pub fn cross_axis(self) -> Axis {
        self.main_axis().other()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Orientation::TopDown => "top-down",
            Orientation::LeftRight => "left-right",
        }
    }
}

/// How a node's layer (cross-axis) coordinate is derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LayerPolicy {
    /// `depth * layer_spacing`: every depth shares one layer line.
    #[default]
    FixedDepth,
    /// Start `layer_spacing` past the deepest-reaching node among the
    /// parent's own layer siblings. Layers follow tall labels instead of a
    /// fixed grid.
    DeepestSibling,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutConfig {
    pub orientation: Orientation,
    /// Distance between the starts of consecutive depth layers.
    pub layer_spacing: f32,
    /// Minimum gap between adjacent sibling subtrees.
    pub interval: f32,
    /// Main-axis coordinate of the root before centering.
    pub root_offset: f32,
    pub layer_policy: LayerPolicy,
    pub node_padding_x: f32,
    pub node_padding_y: f32,
    pub label_line_height: f32,
    /// Labels shorter than this still reserve room for this many characters.
    pub min_label_chars: usize,
    pub fast_text_metrics: bool,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            orientation: Orientation::TopDown,
            layer_spacing: 100.0,
            interval: 15.0,
            root_offset: 0.0,
            layer_policy: LayerPolicy::FixedDepth,
            node_padding_x: 15.0,
            node_padding_y: 10.0,
            label_line_height: 1.125,
            min_label_chars: 5,
            fast_text_metrics: true,
        }
    }
}

impl LayoutConfig {
    pub fn validate(&self) -> Result<(), LayoutError> {
        check(
            "layer_spacing",
            self.layer_spacing,
            self.layer_spacing.is_finite() && self.layer_spacing > 0.0,
            "must be greater than 0",
        )?;
        check(
            "interval",
            self.interval,
            self.interval.is_finite() && self.interval >= 0.0,
            "must not be negative",
        )?;
        check(
            "root_offset",
            self.root_offset,
            self.root_offset.is_finite() && self.root_offset >= 0.0,
            "must not be negative",
        )?;
        check(
            "node_padding_x",
            self.node_padding_x,
            self.node_padding_x.is_finite() && self.node_padding_x >= 0.0,
            "must not be negative",
        )?;
        check(
            "node_padding_y",
            self.node_padding_y,
            self.node_padding_y.is_finite() && self.node_padding_y >= 0.0,
            "must not be negative",
        )?;
        check(
            "label_line_height",
            self.label_line_height,
            self.label_line_height.is_finite() && self.label_line_height > 0.0,
            "must be greater than 0",
        )
    }
}

fn check(field: &'static str, value: f32, ok: bool, reason: &'static str) -> Result<(), LayoutError> {
    if ok {
        Ok(())
    } else {
        Err(InvalidInput::Config {
            field,
            value,
            reason,
        }
        .into())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Smallest canvas width. A smaller chart is centered inside it.
    pub min_width: f32,
    pub min_height: f32,
    pub padding: f32,
    pub background: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            min_width: 0.0,
            min_height: 0.0,
            padding: 20.0,
            background: "#FFFFFF".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub theme: Theme,
    pub layout: LayoutConfig,
    pub render: RenderConfig,
}

impl Default for Config {
    fn default() -> Self {
        let theme = Theme::classic();
        let render = RenderConfig {
            background: theme.background.clone(),
            ..Default::default()
        };
        Self {
            theme,
            layout: LayoutConfig::default(),
            render,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    theme: Option<String>,
    theme_variables: Option<ThemeVariables>,
    layout: Option<LayoutConfigFile>,
    render: Option<RenderConfigFile>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ThemeVariables {
    font_family: Option<String>,
    font_size: Option<f32>,
    primary_color: Option<String>,
    primary_text_color: Option<String>,
    primary_border_color: Option<String>,
    line_color: Option<String>,
    background: Option<String>,
    corner_radius: Option<f32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LayoutConfigFile {
    #[serde(alias = "orient")]
    orientation: Option<Orientation>,
    #[serde(alias = "layerHeight")]
    layer_spacing: Option<f32>,
    interval: Option<f32>,
    root_offset: Option<f32>,
    layer_policy: Option<LayerPolicy>,
    node_padding_x: Option<f32>,
    node_padding_y: Option<f32>,
    label_line_height: Option<f32>,
    min_label_chars: Option<usize>,
    fast_text_metrics: Option<bool>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RenderConfigFile {
    #[serde(alias = "width")]
    min_width: Option<f32>,
    #[serde(alias = "height")]
    min_height: Option<f32>,
    padding: Option<f32>,
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let Some(path) = path else {
        return Ok(Config::default());
    };
    let contents = std::fs::read_to_string(path)?;
    parse_config(&contents)
}

pub fn parse_config(contents: &str) -> anyhow::Result<Config> {
    let mut config = Config::default();
    let parsed: ConfigFile = serde_json::from_str(contents)?;

    if let Some(theme_name) = parsed.theme.as_deref() {
        match theme_name {
            "modern" => config.theme = Theme::modern(),
            "classic" | "default" | "base" => config.theme = Theme::classic(),
            other => anyhow::bail!("unknown theme '{other}'"),
        }
    }

    if let Some(vars) = parsed.theme_variables {
        if let Some(v) = vars.font_family {
            config.theme.font_family = v;
        }
        if let Some(v) = vars.font_size {
            config.theme.font_size = v;
        }
        if let Some(v) = vars.primary_color {
            config.theme.node_fill = v;
        }
        if let Some(v) = vars.primary_text_color {
            config.theme.node_text_color = v;
        }
        if let Some(v) = vars.primary_border_color {
            config.theme.node_border_color = v;
        }
        if let Some(v) = vars.line_color {
            config.theme.line_color = v;
        }
        if let Some(v) = vars.background {
            config.theme.background = v;
        }
        if let Some(v) = vars.corner_radius {
            config.theme.corner_radius = v;
        }
    }

    if let Some(layout) = parsed.layout {
        if let Some(v) = layout.orientation {
            config.layout.orientation = v;
        }
        if let Some(v) = layout.layer_spacing {
            config.layout.layer_spacing = v;
        }
        if let Some(v) = layout.interval {
            config.layout.interval = v;
        }
        if let Some(v) = layout.root_offset {
            config.layout.root_offset = v;
        }
        if let Some(v) = layout.layer_policy {
            config.layout.layer_policy = v;
        }
        if let Some(v) = layout.node_padding_x {
            config.layout.node_padding_x = v;
        }
        if let Some(v) = layout.node_padding_y {
            config.layout.node_padding_y = v;
        }
        if let Some(v) = layout.label_line_height {
            config.layout.label_line_height = v;
        }
        if let Some(v) = layout.min_label_chars {
            config.layout.min_label_chars = v;
        }
        if let Some(v) = layout.fast_text_metrics {
            config.layout.fast_text_metrics = v;
        }
    }

    if let Some(render) = parsed.render {
        if let Some(v) = render.min_width {
            config.render.min_width = v;
        }
        if let Some(v) = render.min_height {
            config.render.min_height = v;
        }
        if let Some(v) = render.padding {
            config.render.padding = v;
        }
    }

    config.layout.validate()?;
    config.render.background = config.theme.background.clone();

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_spacing_values() {
        let config = LayoutConfig::default();
        assert_eq!(config.orientation, Orientation::TopDown);
        assert_eq!(config.layer_spacing, 100.0);
        assert_eq!(config.interval, 15.0);
        assert_eq!(config.root_offset, 0.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn orientation_tokens() {
        assert_eq!(Orientation::from_token("LR"), Some(Orientation::LeftRight));
        assert_eq!(Orientation::from_token("vertical"), Some(Orientation::LeftRight));
        assert_eq!(Orientation::from_token("TB"), Some(Orientation::TopDown));
        assert_eq!(Orientation::from_token("diagonal"), None);
        assert_eq!(Orientation::TopDown.main_axis(), Axis::X);
        assert_eq!(Orientation::LeftRight.cross_axis(), Axis::X);
    }

    #[test]
    fn parses_overrides_and_legacy_aliases() {
        let config = parse_config(
            r##"{
                "theme": "modern",
                "themeVariables": { "lineColor": "#123456" },
                "layout": { "orient": "vertical", "layerHeight": 80, "interval": 4, "layerPolicy": "deepest-sibling" }
            }"##,
        )
        .unwrap();
        assert_eq!(config.layout.orientation, Orientation::LeftRight);
        assert_eq!(config.layout.layer_spacing, 80.0);
        assert_eq!(config.layout.interval, 4.0);
        assert_eq!(config.layout.layer_policy, LayerPolicy::DeepestSibling);
        assert_eq!(config.theme.line_color, "#123456");
        assert_eq!(config.render.background, config.theme.background);
    }

    #[test]
    fn render_section_sets_minimum_canvas() {
        let config = parse_config(r#"{ "render": { "minWidth": 1600, "height": 900, "padding": 30 } }"#).unwrap();
        assert_eq!(config.render.min_width, 1600.0);
        assert_eq!(config.render.min_height, 900.0);
        assert_eq!(config.render.padding, 30.0);
        assert_eq!(Config::default().render.min_width, 0.0);
    }

    #[test]
    fn rejects_out_of_range_values() {
        let err = parse_config(r#"{ "layout": { "layerSpacing": 0 } }"#).unwrap_err();
        assert!(err.to_string().contains("layer_spacing"));

        let config = LayoutConfig {
            interval: -1.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(LayoutError::InvalidInput(InvalidInput::Config { field: "interval", .. }))
        ));
    }

    #[test]
    fn rejects_unknown_theme() {
        assert!(parse_config(r#"{ "theme": "neon" }"#).is_err());
    }
}
