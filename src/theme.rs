use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Theme {
    pub font_family: String,
    /// Font size in px; also the advance of one character in the
    /// monospace measurement model.
    pub font_size: f32,
    pub node_fill: String,
    pub node_text_color: String,
    pub node_border_color: String,
    pub line_color: String,
    pub background: String,
    pub corner_radius: f32,
    pub border_width: f32,
    pub line_width: f32,
}

impl Theme {
    /// White boxes with black strokes and a 5px corner radius.
    pub fn classic() -> Self {
        Self {
            font_family: "\"Microsoft YaHei\", \"PingFang SC\", sans-serif".to_string(),
            font_size: 16.0,
            node_fill: "#FFFFFF".to_string(),
            node_text_color: "#000000".to_string(),
            node_border_color: "#000000".to_string(),
            line_color: "#000000".to_string(),
            background: "#FFFFFF".to_string(),
            corner_radius: 5.0,
            border_width: 1.0,
            line_width: 1.0,
        }
    }

    pub fn modern() -> Self {
        Self {
            font_family: "Inter, Segoe UI, system-ui, -apple-system, sans-serif".to_string(),
            font_size: 14.0,
            node_fill: "#F8FAFF".to_string(),
            node_text_color: "#1C2430".to_string(),
            node_border_color: "#C7D2E5".to_string(),
            line_color: "#7A8AA6".to_string(),
            background: "#FFFFFF".to_string(),
            corner_radius: 8.0,
            border_width: 1.4,
            line_width: 1.4,
        }
    }
}
