use crate::config::{Config, Orientation, load_config};
use crate::ir::parse_charts;
use crate::layout::Layout;
use crate::layout_dump::{print_layout_dump, write_layout_dump};
use crate::render::{render_svg, write_output_svg};
use crate::{RenderOptions, layout_chart};
use anyhow::Result;
use clap::{Parser, ValueEnum};
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Parser, Debug)]
#[command(name = "ochart", version, about = "Organization chart renderer")]
pub struct Args {
    /// Input file (.json/.json5) or '-' for stdin
    #[arg(short = 'i', long = "input")]
    pub input: Option<PathBuf>,

    /// Output file. Defaults to stdout for SVG and JSON if omitted.
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short = 'e', long = "outputFormat", value_enum, default_value = "svg")]
    pub output_format: OutputFormat,

    /// Config JSON file (theme, themeVariables, layout, render)
    #[arg(short = 'c', long = "configFile")]
    pub config: Option<PathBuf>,

    /// Tree orientation: top-down (TD) or left-right (LR)
    #[arg(long = "orientation", value_parser = parse_orientation)]
    pub orientation: Option<Orientation>,

    /// Minimum canvas width; smaller charts are centered
    #[arg(short = 'w', long = "width")]
    pub width: Option<f32>,

    /// Minimum canvas height; smaller charts are centered
    #[arg(short = 'H', long = "height")]
    pub height: Option<f32>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Svg,
    Png,
    Json,
}

impl OutputFormat {
    fn extension(self) -> &'static str {
        match self {
            OutputFormat::Svg => "svg",
            OutputFormat::Png => "png",
            OutputFormat::Json => "json",
        }
    }
}

fn parse_orientation(value: &str) -> Result<Orientation, String> {
    Orientation::from_token(value)
        .ok_or_else(|| format!("unknown orientation '{value}' (expected top-down, left-right, TD or LR)"))
}

pub fn run() -> Result<()> {
    let _ = tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .with(EnvFilter::from_default_env())
        .try_init();

    let args = Args::parse();
    let mut config = load_config(args.config.as_deref())?;
    apply_overrides(&mut config, &args);
    let options = RenderOptions::from(config);

    let input = read_input(args.input.as_deref())?;
    let charts = parse_charts(&input)?;
    if charts.is_empty() {
        return Err(anyhow::anyhow!("No charts found in input"));
    }

    if charts.len() == 1 {
        let layout = layout_chart(charts[0].as_ref(), &options)?;
        return write_chart(&layout, &options, args.output_format, args.output.as_deref());
    }

    // Forest input: one output file per tree
    info!(charts = charts.len(), "rendering forest");
    let outputs = resolve_multi_outputs(args.output.as_deref(), args.output_format, charts.len())?;
    for (root, output) in charts.iter().zip(&outputs) {
        let layout = layout_chart(root.as_ref(), &options)?;
        write_chart(&layout, &options, args.output_format, Some(output))?;
        info!(output = %output.display(), "wrote chart");
    }

    Ok(())
}

/// Flags given on the command line win over the config file.
fn apply_overrides(config: &mut Config, args: &Args) {
    if let Some(width) = args.width {
        config.render.min_width = width;
    }
    if let Some(height) = args.height {
        config.render.min_height = height;
    }
    if let Some(orientation) = args.orientation {
        config.layout.orientation = orientation;
    }
}

fn write_chart(
    layout: &Layout,
    options: &RenderOptions,
    format: OutputFormat,
    output: Option<&Path>,
) -> Result<()> {
    match format {
        OutputFormat::Json => match output {
            Some(path) => write_layout_dump(path, layout),
            None => print_layout_dump(layout),
        },
        OutputFormat::Svg => {
            let svg = render_svg(layout, &options.theme, &options.layout, &options.render);
            write_output_svg(&svg, output)
        }
        OutputFormat::Png => {
            let output = ensure_output(output, "png")?;
            write_png(layout, options, output)
        }
    }
}

#[cfg(feature = "png")]
fn write_png(layout: &Layout, options: &RenderOptions, output: &Path) -> Result<()> {
    let svg = render_svg(layout, &options.theme, &options.layout, &options.render);
    crate::render::write_output_png(&svg, output, &options.theme.font_family)
}

#[cfg(not(feature = "png"))]
fn write_png(_layout: &Layout, _options: &RenderOptions, _output: &Path) -> Result<()> {
    Err(anyhow::anyhow!("PNG output requires the `png` feature"))
}

fn read_input(path: Option<&Path>) -> Result<String> {
    if let Some(path) = path
        && path != Path::new("-")
    {
        return Ok(std::fs::read_to_string(path)?);
    }

    let mut buf = String::new();
    io::stdin().read_to_string(&mut buf)?;
    Ok(buf)
}

fn ensure_output<'a>(output: Option<&'a Path>, ext: &str) -> Result<&'a Path> {
    output.ok_or_else(|| anyhow::anyhow!("Output path required for {} output", ext))
}

fn resolve_multi_outputs(
    output: Option<&Path>,
    format: OutputFormat,
    count: usize,
) -> Result<Vec<PathBuf>> {
    let ext = format.extension();
    let base = output.ok_or_else(|| anyhow::anyhow!("Output path required for multi-chart input"))?;
    if base.is_dir() {
        return Ok((1..=count)
            .map(|idx| base.join(format!("chart-{idx}.{ext}")))
            .collect());
    }
    let stem = base.file_stem().and_then(|s| s.to_str()).unwrap_or("chart");
    let parent = base.parent().unwrap_or_else(|| Path::new("."));
    Ok((1..=count)
        .map(|idx| parent.join(format!("{stem}-{idx}.{ext}")))
        .collect())
}
