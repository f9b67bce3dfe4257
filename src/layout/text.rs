use crate::config::LayoutConfig;
use crate::text_metrics;
use crate::theme::Theme;

use super::LabelFlow;

#[derive(Debug, Clone, PartialEq)]
pub struct TextBlock {
    /// Rendered lines; for vertical labels one character per line.
    pub lines: Vec<String>,
    pub width: f32,
    pub height: f32,
}

pub(crate) fn measure_label(
    text: &str,
    flow: LabelFlow,
    theme: &Theme,
    config: &LayoutConfig,
) -> TextBlock {
    let font_size = theme.font_size;
    let line_height = font_size * config.label_line_height;
    let min_chars = config.min_label_chars;

    match flow {
        LabelFlow::Horizontal => {
            let lines = split_lines(text);
            let widest = lines
                .iter()
                .map(|line| {
                    text_width(
                        line,
                        font_size,
                        theme.font_family.as_str(),
                        config.fast_text_metrics,
                    )
                })
                .fold(0.0, f32::max);
            let width = widest.max(min_chars as f32 * font_size);
            let height = lines.len() as f32 * line_height;
            TextBlock {
                lines,
                width,
                height,
            }
        }
        LabelFlow::Vertical => {
            let lines: Vec<String> = split_lines(text)
                .concat()
                .chars()
                .filter(|ch| !ch.is_whitespace())
                .map(String::from)
                .collect();
            let rows = lines.len().max(min_chars).max(1);
            TextBlock {
                lines,
                width: font_size,
                height: rows as f32 * line_height,
            }
        }
    }
}

pub(crate) fn split_lines(text: &str) -> Vec<String> {
    let current = text
        .replace("<br/>", "\n")
        .replace("<br>", "\n")
        .replace("\\n", "\n");
    current.split('\n').map(|line| line.trim().to_string()).collect()
}

pub(crate) fn text_width(text: &str, font_size: f32, font_family: &str, fast_metrics: bool) -> f32 {
    if fast_metrics {
        return monospace_width(text, font_size);
    }
    text_metrics::measure_text_width(text, font_size, font_family)
        .unwrap_or_else(|| monospace_width(text, font_size))
}

/// Every character advances by one font size. Exact for CJK labels and
/// deterministic across machines.
fn monospace_width(text: &str, font_size: f32) -> f32 {
    text.chars().count() as f32 * font_size
}
