use ochart::{Orientation, RenderOptions, render_with_options};
use serde::Deserialize;
use wasm_bindgen::prelude::*;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct OrgChartRenderOptions {
    theme: Option<String>,
    orientation: Option<Orientation>,
    font_family: Option<String>,
    font_size: Option<f32>,
    interval: Option<f32>,
    layer_spacing: Option<f32>,
}

fn build_render_options(options: OrgChartRenderOptions) -> RenderOptions {
    let mut render_options = if options.theme.as_deref() == Some("modern") {
        RenderOptions::modern()
    } else {
        RenderOptions::classic()
    };

    if let Some(orientation) = options.orientation {
        render_options.layout.orientation = orientation;
    }
    if let Some(font_family) = options.font_family {
        render_options.theme.font_family = font_family;
    }
    if let Some(font_size) = options.font_size {
        render_options.theme.font_size = font_size;
    }
    if let Some(interval) = options.interval {
        render_options.layout.interval = interval;
    }
    if let Some(layer_spacing) = options.layer_spacing {
        render_options.layout.layer_spacing = layer_spacing;
    }
    // No system fonts inside the browser sandbox.
    render_options.layout.fast_text_metrics = true;

    render_options
}

#[wasm_bindgen]
pub fn render_org_chart_svg(json: &str, options_json: Option<String>) -> Result<String, JsValue> {
    let options = if let Some(raw_options) = options_json {
        serde_json::from_str::<OrgChartRenderOptions>(&raw_options)
            .map_err(|error| JsValue::from_str(&error.to_string()))?
    } else {
        OrgChartRenderOptions::default()
    };

    let render_options = build_render_options(options);
    render_with_options(json, render_options).map_err(|error| JsValue::from_str(&error.to_string()))
}
